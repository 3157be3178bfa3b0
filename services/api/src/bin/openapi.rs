//! services/api/src/bin/openapi.rs
//!
//! Writes the bookstore's OpenAPI document to disk, by default to
//! `openapi.json`; pass a path as the first argument to write elsewhere.

use api_lib::{error::ApiError, web::rest::render_api_doc};
use tracing::info;

fn main() -> Result<(), ApiError> {
    tracing_subscriber::fmt().with_target(false).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());
    std::fs::write(&path, render_api_doc()?)?;

    info!("OpenAPI document written to {}", path);
    Ok(())
}
