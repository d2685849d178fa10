//! MongoDB database wrapper.

use mongodb::bson::doc;
use mongodb::{Client, Collection, options::ClientOptions};
use tracing::info;

/// Application name reported to the MongoDB server.
const APP_NAME: &str = "userscache";

/// Handle to the service database.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB and verify the connection with a ping.
    ///
    /// # Errors
    /// Returns error if the URI is invalid or the server is unreachable.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let mut options = ClientOptions::parse(uri).await?;
        options.app_name = Some(APP_NAME.to_string());
        let client = Client::with_options(options)?;

        let db = Self {
            db: client.database(db_name),
        };
        db.ping().await?;

        info!("Successfully connected to MongoDB database '{}'", db_name);
        Ok(db)
    }

    /// Round-trip a `ping` command to the server.
    pub async fn ping(&self) -> anyhow::Result<()> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }

    /// Get a typed collection from the database.
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
