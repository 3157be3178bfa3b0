pub mod auth;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod reviews;
pub mod router;
pub mod state;

// Re-export the router builder so the binary and the integration tests share it.
pub use router::build_router;
pub use state::AppState;
