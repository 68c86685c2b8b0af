//! Kitchen reports
//!
//! Window resolution, the five aggregators and the caching service that ties
//! them to a token source.

pub mod comparison;
pub mod efficiency;
pub mod items;
pub mod peak_hours;
pub mod range;
pub mod service;
pub mod summary;

use std::fmt;
use std::str::FromStr;

use shared::models::OrderToken;

use crate::utils::{AppError, ErrorCode};

pub use range::{DateRange, ReportQuery, resolve_range};
pub use service::KitchenReportService;

/// Report metrics, named as they appear in routes and cache keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportMetric {
    Summary,
    Efficiency,
    ItemPerformance,
    PeakHours,
    Comparison,
}

impl ReportMetric {
    pub const ALL: [ReportMetric; 5] = [
        ReportMetric::Summary,
        ReportMetric::Efficiency,
        ReportMetric::ItemPerformance,
        ReportMetric::PeakHours,
        ReportMetric::Comparison,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Efficiency => "efficiency",
            Self::ItemPerformance => "item-performance",
            Self::PeakHours => "peak-hours",
            Self::Comparison => "comparison",
        }
    }
}

impl FromStr for ReportMetric {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| {
                AppError::invalid_field(
                    ErrorCode::UnknownReportMetric,
                    "metric",
                    format!("Unknown report metric: '{s}'"),
                )
            })
    }
}

impl fmt::Display for ReportMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defined preparation times (minutes) of `tokens`
pub(crate) fn preparation_times<'a, I>(tokens: I) -> Vec<f64>
where
    I: IntoIterator<Item = &'a OrderToken>,
{
    tokens
        .into_iter()
        .filter_map(OrderToken::preparation_minutes)
        .collect()
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::models::{
        ItemRef, OrderItemLine, OrderRef, OrderToken, TokenPriority, TokenStatus, TokenType,
    };

    /// Fluent token fixture, created 2024-05-01 12:00 UTC by default
    pub struct TokenBuilder {
        token: OrderToken,
    }

    impl TokenBuilder {
        pub fn new(id: i64, token_type: TokenType) -> Self {
            Self {
                token: OrderToken {
                    id,
                    token: format!("{}-{id:03}", &token_type.as_str()[..1]),
                    token_type,
                    status: TokenStatus::Pending,
                    priority: TokenPriority::Normal,
                    created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
                    ready_at: None,
                    order: OrderRef {
                        id: 1000 + id,
                        order_number: format!("ORD-{id}"),
                    },
                    items: Vec::new(),
                },
            }
        }

        pub fn status(mut self, status: TokenStatus) -> Self {
            self.token.status = status;
            self
        }

        pub fn priority(mut self, priority: TokenPriority) -> Self {
            self.token.priority = priority;
            self
        }

        pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
            self.token.created_at = at;
            self
        }

        pub fn ready_after(mut self, minutes: i64) -> Self {
            self.token.ready_at = Some(self.token.created_at + Duration::minutes(minutes));
            self
        }

        /// Add a line; `total` is a decimal string such as "12.50"
        pub fn line(mut self, item_id: Option<i64>, quantity: i32, total: &str) -> Self {
            let total_price: Decimal = total.parse().unwrap();
            self.token.items.push(OrderItemLine {
                quantity,
                unit_price: total_price / Decimal::from(quantity.max(1)),
                total_price,
                item: item_id.map(|id| ItemRef {
                    id,
                    name: format!("Item {id}"),
                }),
            });
            self
        }

        pub fn build(self) -> OrderToken {
            self.token
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_names() {
        for metric in ReportMetric::ALL {
            assert_eq!(metric.as_str().parse::<ReportMetric>().unwrap(), metric);
        }
        assert_eq!(
            "Peak-Hours".parse::<ReportMetric>().unwrap(),
            ReportMetric::PeakHours
        );
        let err = "revenue".parse::<ReportMetric>().unwrap_err();
        assert_eq!(err.field(), Some("metric"));
    }
}
