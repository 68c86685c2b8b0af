//! Item performance: revenue ranking per menu item

use std::collections::HashMap;

use rust_decimal::Decimal;
use shared::models::{ItemPerformance, OrderToken};

use crate::utils::money::{percentage, to_f64};

struct ItemTotals<'a> {
    name: &'a str,
    quantity: i64,
    revenue: Decimal,
}

/// Top `limit` items by revenue, ties broken by item id ascending
///
/// `percentage` is relative to the revenue of every item in the window, not
/// only the returned rows. Lines without a resolved item are skipped.
pub fn item_performance(tokens: &[OrderToken], limit: usize) -> Vec<ItemPerformance> {
    let mut totals: HashMap<i64, ItemTotals<'_>> = HashMap::new();

    for line in tokens.iter().flat_map(|t| &t.items) {
        let Some(item) = &line.item else {
            continue;
        };
        let entry = totals.entry(item.id).or_insert(ItemTotals {
            name: &item.name,
            quantity: 0,
            revenue: Decimal::ZERO,
        });
        entry.quantity += i64::from(line.quantity);
        entry.revenue += line.total_price;
    }

    let grand_total: Decimal = totals.values().map(|t| t.revenue).sum();

    let mut ranked: Vec<(i64, ItemTotals<'_>)> = totals.into_iter().collect();
    ranked.sort_by(|(a_id, a), (b_id, b)| b.revenue.cmp(&a.revenue).then(a_id.cmp(b_id)));

    ranked
        .into_iter()
        .take(limit)
        .map(|(item_id, t)| ItemPerformance {
            item_id,
            item_name: t.name.to_string(),
            quantity: t.quantity,
            revenue: to_f64(t.revenue),
            percentage: percentage(t.revenue, grand_total),
        })
        .collect()
}
