//! Loyalty API Handlers

use axum::extract::{Query, State};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::core::ServerState;
use crate::loyalty::{LoyaltyCalculator, LoyaltyQuote};
use crate::utils::money::to_f64;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    pub amount: Option<String>,
    pub points: Option<String>,
}

fn parse_param<T: std::str::FromStr>(raw: Option<&str>, field: &str) -> AppResult<Option<T>> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<T>().map_err(|_| {
                AppError::invalid_field(
                    ErrorCode::InvalidFormat,
                    field,
                    format!("Invalid {field}: '{v}'"),
                )
            })
        })
        .transpose()
}

/// GET /api/loyalty/quote?amount=25.50&points=120
pub async fn quote(
    State(state): State<ServerState>,
    Query(query): Query<QuoteQuery>,
) -> AppResult<ApiResponse<LoyaltyQuote>> {
    let amount: Option<Decimal> = parse_param(query.amount.as_deref(), "amount")?;
    let points: Option<i64> = parse_param(query.points.as_deref(), "points")?;
    if amount.is_none() && points.is_none() {
        return Err(AppError::invalid_field(
            ErrorCode::RequiredField,
            "amount",
            "amount or points is required",
        ));
    }

    let calculator = LoyaltyCalculator::from_snapshot(&state.settings.snapshot());

    let points_earned = amount.map(|a| calculator.points_for_amount(a)).transpose()?;
    let points_value = points.map(|p| calculator.value_of_points(p)).transpose()?;

    Ok(ApiResponse::success_with_message(
        "Loyalty quote calculated",
        LoyaltyQuote {
            amount: amount.map(to_f64),
            points_earned,
            points,
            points_value: points_value.map(to_f64),
        },
    ))
}
