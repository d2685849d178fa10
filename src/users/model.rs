//! In-memory user model.

use serde::{Deserialize, Serialize};

/// A user from the static in-memory list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    pub age: u32,
}

impl User {
    pub fn new(username: impl Into<String>, age: u32) -> Self {
        Self {
            username: username.into(),
            age,
        }
    }
}
