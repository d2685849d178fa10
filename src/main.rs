//! Userscache - cached user listing service.
//!
//! Serves a static user list and a MongoDB-backed user details list through
//! named caches, and clears all caches on request or on a schedule.
//!
//! ## Architecture
//!
//! - `config` - Environment configuration
//! - `cache` - Named caches with cache-aside lookups (Moka)
//! - `invalidation` - On-demand and scheduled clearing of all caches
//! - `database` - MongoDB integration
//! - `users` - The two cached user lists
//! - `server` - HTTP routes (axum)

mod cache;
mod config;
mod database;
mod invalidation;
mod server;
mod users;

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::CacheRegistry;
use config::Config;
use database::{Database, MongoUserDetailsRepository};
use invalidation::{CacheInvalidator, SystemClock};
use server::AppState;
use users::{StaticUserSource, UserService};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file first (before anything else)
    dotenvy::dotenv().ok();

    // If RUST_LOG is not set, default to "info" level for our crate
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("userscache=info,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    info!("Starting userscache...");

    let config = Config::from_env()?;
    info!("Configuration loaded successfully");

    info!("Connecting to MongoDB...");
    let db = Database::connect(&config.mongodb_uri, &config.mongodb_database).await?;

    let cache = CacheRegistry::new();

    let users = UserService::new(
        cache.clone(),
        Arc::new(StaticUserSource::new(config.users_latency)),
        Arc::new(MongoUserDetailsRepository::new(&db)),
    );

    let invalidator = Arc::new(CacheInvalidator::new(Arc::new(cache)));

    let scheduler = if config.cache_clear_enabled {
        Some(invalidator.spawn_scheduled(config.cache_clear_schedule.clone(), Arc::new(SystemClock)))
    } else {
        info!("Scheduled cache clearing disabled");
        None
    };

    let router = server::build_router(AppState::new(users, invalidator));
    let served = server::serve(&config.host, config.port, router).await;

    if let Some(scheduler) = scheduler {
        scheduler.shutdown().await;
    }

    served
}
