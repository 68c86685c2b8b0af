//! Global Settings Snapshot
//!
//! Process-wide settings (loyalty conversion, reservation toggle) are read from a
//! key-value table and handed to consumers as an immutable snapshot.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Setting keys understood by the snapshot builder
pub mod keys {
    pub const LOYALTY_POINTS_PER_UNIT: &str = "loyalty.points_per_unit";
    pub const LOYALTY_POINT_VALUE: &str = "loyalty.point_value";
    pub const RESERVATIONS_ENABLED: &str = "reservations.enabled";
}

/// Immutable settings snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSnapshot {
    /// Points earned per one currency unit spent
    pub loyalty_points_per_unit: Decimal,
    /// Currency value of one point
    pub loyalty_point_value: Decimal,
    pub reservations_enabled: bool,
    /// When this snapshot was built
    pub loaded_at: DateTime<Utc>,
}

impl SettingsSnapshot {
    pub fn defaults(loaded_at: DateTime<Utc>) -> Self {
        Self {
            loyalty_points_per_unit: Decimal::ONE,
            loyalty_point_value: Decimal::new(1, 2),
            reservations_enabled: true,
            loaded_at,
        }
    }
}
