//! Summary report: token count, sales, status breakdown, mean preparation time

use rust_decimal::Decimal;
use shared::models::{KitchenSummary, OrderToken, StatusBreakdown, TokenStatus};

use super::preparation_times;
use crate::utils::money::{mean, to_f64};

pub fn summarize(tokens: &[OrderToken]) -> KitchenSummary {
    let mut breakdown = StatusBreakdown::default();
    let mut total_sales = Decimal::ZERO;

    for token in tokens {
        total_sales += token.revenue();
        let bucket = match token.status {
            TokenStatus::Pending => &mut breakdown.pending,
            TokenStatus::Preparing => &mut breakdown.preparing,
            TokenStatus::Ready => &mut breakdown.ready,
            TokenStatus::Delivered => &mut breakdown.delivered,
            TokenStatus::Cancelled => &mut breakdown.cancelled,
        };
        *bucket += 1;
    }

    KitchenSummary {
        total_orders: tokens.len() as u64,
        total_sales: to_f64(total_sales),
        status_breakdown: breakdown,
        avg_preparation_time: mean(&preparation_times(tokens)),
    }
}
