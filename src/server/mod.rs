//! HTTP server.

mod error;
mod handlers;
mod router;
mod runtime;

pub use router::{AppState, build_router};
pub use runtime::serve;
