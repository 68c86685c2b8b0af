//! Peak hours: order count and revenue per local hour of day

use chrono_tz::Tz;
use rust_decimal::Decimal;
use shared::models::{OrderToken, PeakHour};

use crate::utils::money::to_f64;
use crate::utils::time::local_hour;

const HOURS_PER_DAY: usize = 24;

/// Always 24 rows, hour 0 to 23
pub fn peak_hours(tokens: &[OrderToken], tz: Tz) -> Vec<PeakHour> {
    let mut counts = [0u64; HOURS_PER_DAY];
    let mut revenue = [Decimal::ZERO; HOURS_PER_DAY];

    for token in tokens {
        let hour = local_hour(token.created_at, tz) as usize;
        counts[hour] += 1;
        revenue[hour] += token.revenue();
    }

    (0..HOURS_PER_DAY)
        .map(|hour| PeakHour {
            hour: hour as u32,
            order_count: counts[hour],
            revenue: to_f64(revenue[hour]),
        })
        .collect()
}
