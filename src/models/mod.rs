//! OTX API model types.

mod indicator;
mod pulse;
mod search;
mod user;

pub use indicator::*;
pub use pulse::*;
pub use search::*;
pub use user::*;

use serde::{Deserialize, Deserializer};

/// Deserialize a list that the server may send as `null`.
pub(crate) fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
