//! Shared types for the kitchen reporting platform
//!
//! Common types used across crates: the unified error system, the response
//! envelope and the domain models exchanged over the API.

pub mod error;
pub mod models;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
