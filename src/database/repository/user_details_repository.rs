//! User details repository.

use anyhow::Result;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::doc;
use mongodb::options::FindOptions;
use tracing::debug;

use crate::database::Database;
use crate::database::models::UserDetails;

/// Read access to stored user details.
#[async_trait]
pub trait UserDetailsRepository: Send + Sync {
    /// All user details, ordered by user ID.
    async fn find_all(&self) -> Result<Vec<UserDetails>>;
}

/// MongoDB-backed user details repository.
pub struct MongoUserDetailsRepository {
    collection: Collection<UserDetails>,
}

impl MongoUserDetailsRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection("user_details"),
        }
    }
}

#[async_trait]
impl UserDetailsRepository for MongoUserDetailsRepository {
    async fn find_all(&self) -> Result<Vec<UserDetails>> {
        let options = FindOptions::builder().sort(doc! { "userId": 1 }).build();

        let cursor = self.collection.find(doc! {}).with_options(options).await?;
        let details: Vec<UserDetails> = cursor.try_collect().await?;

        debug!("DB loaded {} user details", details.len());
        Ok(details)
    }
}
