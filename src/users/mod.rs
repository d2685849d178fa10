//! Users - the two cached user lists.

mod model;
mod service;
mod source;

pub use model::User;
pub use service::UserService;
pub use source::{DEFAULT_LATENCY, StaticUserSource};

#[cfg(test)]
pub(crate) use service::tests as test_support;
