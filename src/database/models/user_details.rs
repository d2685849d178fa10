//! User details model, stored in the `user_details` collection.

use serde::{Deserialize, Serialize};

/// A user details row.
///
/// Serialized with camelCase field names, both in the collection and in API
/// responses. Missing text fields read as `None` and serialize as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub password: Option<String>,
    /// Account status code.
    #[serde(default)]
    pub status: i32,
}
