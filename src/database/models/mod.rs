//! Database models.

pub mod user_details;

pub use user_details::UserDetails;
