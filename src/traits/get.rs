//! Get trait for fetching single entities.

use async_trait::async_trait;

use crate::client::OtxClient;
use crate::error::Result;

/// Fetch a single entity by ID.
///
/// # Example
///
/// ```ignore
/// use otxapi::{OtxClient, Pulse, Get};
///
/// let client = OtxClient::from_env()?;
/// let pulse = Pulse::get(&client, "60a5f0c4e1b2a3d4c5f6a7b8".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// The ID type for this entity.
    type Id: Send;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns an [`OtxError::Api`](crate::OtxError::Api) carrying the HTTP
    /// status if the server rejects the request, or a transport/decode error.
    async fn get(client: &OtxClient, id: Self::Id) -> Result<Self>;
}
