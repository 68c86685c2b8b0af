//! Kitchen Report Models
//!
//! Derived, stateless results of the kitchen report aggregators.
//! Money and minutes are already rounded to 2 decimals when these are built.

use serde::{Deserialize, Serialize};

use super::order_token::{TokenPriority, TokenType};

/// Token count per status, zero-filled
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBreakdown {
    pub pending: u64,
    pub preparing: u64,
    pub ready: u64,
    pub delivered: u64,
    pub cancelled: u64,
}

impl StatusBreakdown {
    pub fn total(&self) -> u64 {
        self.pending + self.preparing + self.ready + self.delivered + self.cancelled
    }
}

/// GET /api/kitchen-reports/summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenSummary {
    pub total_orders: u64,
    pub total_sales: f64,
    pub status_breakdown: StatusBreakdown,
    /// Minutes
    pub avg_preparation_time: f64,
}

/// Preparation time histogram
///
/// Buckets are left-inclusive, right-exclusive; the last one is open.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeDistribution {
    pub under5_min: u64,
    pub five_to15_min: u64,
    pub fifteen_to30_min: u64,
    pub over30_min: u64,
}

impl TimeDistribution {
    pub fn total(&self) -> u64 {
        self.under5_min + self.five_to15_min + self.fifteen_to30_min + self.over30_min
    }
}

/// Per-priority row of the efficiency report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityStats {
    pub priority: TokenPriority,
    pub count: u64,
    pub avg_preparation_time: f64,
    /// Percentage of READY/DELIVERED tokens (0..=100)
    pub completion_rate: f64,
}

/// GET /api/kitchen-reports/efficiency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KitchenEfficiency {
    pub avg_preparation_time: f64,
    pub min_preparation_time: f64,
    pub max_preparation_time: f64,
    pub time_distribution: TimeDistribution,
    pub priority_breakdown: Vec<PriorityStats>,
}

/// GET /api/kitchen-reports/item-performance (one row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPerformance {
    pub item_id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub revenue: f64,
    /// Share of the revenue of all items in the window (0..=100)
    pub percentage: f64,
}

/// GET /api/kitchen-reports/peak-hours (one row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakHour {
    /// 0..=23 in the business timezone
    pub hour: u32,
    pub order_count: u64,
    pub revenue: f64,
}

/// Summary metrics of one token type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMetrics {
    pub token_type: TokenType,
    pub total_sales: f64,
    pub order_count: u64,
    pub avg_order_value: f64,
    pub avg_preparation_time: f64,
}

/// GET /api/kitchen-reports/comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenBarComparison {
    pub kitchen: TypeMetrics,
    pub bar: TypeMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_distribution_field_names() {
        let dist = TimeDistribution {
            under5_min: 1,
            five_to15_min: 1,
            fifteen_to30_min: 0,
            over30_min: 1,
        };
        let json = serde_json::to_value(&dist).unwrap();
        assert_eq!(json["under5Min"], 1);
        assert_eq!(json["fiveTo15Min"], 1);
        assert_eq!(json["fifteenTo30Min"], 0);
        assert_eq!(json["over30Min"], 1);
        assert_eq!(dist.total(), 3);
    }

    #[test]
    fn test_summary_field_names() {
        let summary = KitchenSummary {
            total_orders: 2,
            total_sales: 12.5,
            status_breakdown: StatusBreakdown {
                ready: 2,
                ..Default::default()
            },
            avg_preparation_time: 4.25,
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalOrders"], 2);
        assert_eq!(json["totalSales"], 12.5);
        assert_eq!(json["statusBreakdown"]["ready"], 2);
        assert_eq!(json["avgPreparationTime"], 4.25);
    }
}
