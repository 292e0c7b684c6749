//! User model.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::client::OtxClient;
use crate::error::Result;
use crate::traits::Get;

/// Path of the current-user endpoint.
pub const USER_PATH: &str = "api/v1/user/";

/// Profile of the user owning the API key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDetail {
    #[serde(default)]
    pub user_id: Option<i64>,

    #[serde(default)]
    pub username: Option<String>,

    /// Date the account was created, as reported by the server.
    #[serde(default)]
    pub member_since: Option<String>,

    #[serde(default)]
    pub award_count: Option<i64>,

    #[serde(default)]
    pub follower_count: Option<i64>,

    #[serde(default)]
    pub subscriber_count: Option<i64>,

    #[serde(default)]
    pub indicator_count: Option<i64>,

    #[serde(default)]
    pub pulse_count: Option<i64>,
}

#[async_trait]
impl Get for UserDetail {
    /// The endpoint always describes the key's owner.
    type Id = ();

    #[tracing::instrument(skip(client))]
    async fn get(client: &OtxClient, _id: ()) -> Result<Self> {
        client.get(USER_PATH).await
    }
}

/// Fetch the profile of the user owning the client's API key.
pub async fn get_user_details(client: &OtxClient) -> Result<UserDetail> {
    UserDetail::get(client, ()).await
}
