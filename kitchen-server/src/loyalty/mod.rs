//! Loyalty points arithmetic

use rust_decimal::prelude::*;
use serde::Serialize;
use shared::models::SettingsSnapshot;

use crate::utils::{AppError, AppResult, ErrorCode};

/// Conversion rates taken from one settings snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoyaltyCalculator {
    points_per_unit: Decimal,
    point_value: Decimal,
}

/// GET /api/loyalty/quote
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoyaltyQuote {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_earned: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points_value: Option<f64>,
}

impl LoyaltyCalculator {
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        Self {
            points_per_unit: snapshot.loyalty_points_per_unit,
            point_value: snapshot.loyalty_point_value,
        }
    }

    /// Whole points earned for spending `amount`
    pub fn points_for_amount(&self, amount: Decimal) -> AppResult<i64> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(AppError::invalid_field(
                ErrorCode::LoyaltyNegativeAmount,
                "amount",
                "amount must not be negative",
            ));
        }
        amount
            .checked_mul(self.points_per_unit)
            .and_then(|points| points.floor().to_i64())
            .ok_or_else(|| {
                AppError::invalid_field(ErrorCode::ValueOutOfRange, "amount", "amount is too large")
            })
    }

    /// Currency value of `points`, rounded to 2 decimals
    pub fn value_of_points(&self, points: i64) -> AppResult<Decimal> {
        if points < 0 {
            return Err(AppError::invalid_field(
                ErrorCode::LoyaltyNegativePoints,
                "points",
                "points must not be negative",
            ));
        }
        Decimal::from(points)
            .checked_mul(self.point_value)
            .map(|value| value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
            .ok_or_else(|| {
                AppError::invalid_field(ErrorCode::ValueOutOfRange, "points", "points value is too large")
            })
    }
}
