//! services/api/src/lib.rs
//!
//! The bookstore HTTP service: in-memory adapters for the core ports and the
//! Axum web layer that exposes them.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
