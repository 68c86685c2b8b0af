//! Repository Module
//!
//! | Trait | PostgreSQL | In-memory |
//! |-------|------------|-----------|
//! | [`OrderTokenSource`] | [`PgOrderTokenRepository`] | [`MemoryOrderTokenSource`] |
//! | [`SettingsSource`] | [`PgSettingsRepository`] | [`MemorySettingsSource`] |

pub mod order_token;
pub mod settings;

pub use order_token::{MemoryOrderTokenSource, OrderTokenSource, PgOrderTokenRepository};
pub use settings::{MemorySettingsSource, PgSettingsRepository, SettingsSource};
