//! Repository module - data access layer.

mod user_details_repository;

pub use user_details_repository::{MongoUserDetailsRepository, UserDetailsRepository};
