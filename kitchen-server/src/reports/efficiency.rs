//! Efficiency report: preparation time statistics, histogram, per-priority rows

use shared::models::{KitchenEfficiency, OrderToken, PriorityStats, TimeDistribution, TokenPriority};

use super::preparation_times;
use crate::utils::money::{mean, round2};

/// Histogram bucket edges in minutes
const FIVE_MINUTES: f64 = 5.0;
const FIFTEEN_MINUTES: f64 = 15.0;
const THIRTY_MINUTES: f64 = 30.0;

fn distribution(times: &[f64]) -> TimeDistribution {
    let mut dist = TimeDistribution::default();
    for &minutes in times {
        if minutes < FIVE_MINUTES {
            dist.under5_min += 1;
        } else if minutes < FIFTEEN_MINUTES {
            dist.five_to15_min += 1;
        } else if minutes < THIRTY_MINUTES {
            dist.fifteen_to30_min += 1;
        } else {
            dist.over30_min += 1;
        }
    }
    dist
}

fn priority_stats(tokens: &[OrderToken], priority: TokenPriority) -> PriorityStats {
    let scoped: Vec<&OrderToken> = tokens.iter().filter(|t| t.priority == priority).collect();
    let count = scoped.len() as u64;
    let completed = scoped.iter().filter(|t| t.status.is_completed()).count();
    let completion_rate = if count == 0 {
        0.0
    } else {
        round2(completed as f64 * 100.0 / count as f64)
    };

    PriorityStats {
        priority,
        count,
        avg_preparation_time: mean(&preparation_times(scoped.iter().copied())),
        completion_rate,
    }
}

pub fn efficiency(tokens: &[OrderToken]) -> KitchenEfficiency {
    let times = preparation_times(tokens);
    let min = times.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = times.iter().copied().reduce(f64::max).unwrap_or(0.0);

    KitchenEfficiency {
        avg_preparation_time: mean(&times),
        min_preparation_time: round2(min),
        max_preparation_time: round2(max),
        time_distribution: distribution(&times),
        priority_breakdown: TokenPriority::ALL
            .iter()
            .map(|&p| priority_stats(tokens, p))
            .collect(),
    }
}
