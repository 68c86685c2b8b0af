//! Data models
//!
//! Shared between kitchen-server and its API consumers.
//! All IDs are `i64`; instants are UTC.

pub mod kitchen_report;
pub mod order_token;
pub mod settings;

// Re-exports
pub use kitchen_report::*;
pub use order_token::*;
pub use settings::SettingsSnapshot;
