//! Kitchen vs bar comparison

use rust_decimal::Decimal;
use shared::models::{KitchenBarComparison, OrderToken, TokenType, TypeMetrics};

use super::preparation_times;
use crate::utils::money::{mean, to_f64};

fn type_metrics(tokens: &[OrderToken], token_type: TokenType) -> TypeMetrics {
    let scoped: Vec<&OrderToken> = tokens.iter().filter(|t| t.token_type == token_type).collect();
    let total_sales: Decimal = scoped.iter().map(|t| t.revenue()).sum();
    let order_count = scoped.len() as u64;
    let avg_order_value = if order_count == 0 {
        0.0
    } else {
        to_f64(total_sales / Decimal::from(order_count))
    };

    TypeMetrics {
        token_type,
        total_sales: to_f64(total_sales),
        order_count,
        avg_order_value,
        avg_preparation_time: mean(&preparation_times(scoped.iter().copied())),
    }
}

/// Split one type-unfiltered window into kitchen and bar metrics
pub fn compare(tokens: &[OrderToken]) -> KitchenBarComparison {
    KitchenBarComparison {
        kitchen: type_metrics(tokens, TokenType::Kitchen),
        bar: type_metrics(tokens, TokenType::Bar),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::test_support::*;

    #[test]
    fn test_counts_add_up_to_window() {
        let tokens = vec![
            TokenBuilder::new(1, TokenType::Kitchen).line(Some(1), 1, "10.00").ready_after(12).build(),
            TokenBuilder::new(2, TokenType::Kitchen).line(Some(1), 2, "20.00").ready_after(8).build(),
            TokenBuilder::new(3, TokenType::Kitchen).line(Some(2), 1, "0.01").build(),
            TokenBuilder::new(4, TokenType::Bar).line(Some(3), 3, "9.00").ready_after(2).build(),
        ];
        let cmp = compare(&tokens);

        assert_eq!(cmp.kitchen.order_count + cmp.bar.order_count, tokens.len() as u64);
        assert_eq!(cmp.kitchen.token_type, TokenType::Kitchen);
        assert_eq!(cmp.kitchen.total_sales, 30.01);
        assert_eq!(cmp.kitchen.avg_order_value, 10.0);
        assert_eq!(cmp.kitchen.avg_preparation_time, 10.0);

        assert_eq!(cmp.bar.order_count, 1);
        assert_eq!(cmp.bar.avg_order_value, 9.0);
        assert_eq!(cmp.bar.avg_preparation_time, 2.0);
    }

    #[test]
    fn test_missing_type_is_zeroed() {
        let tokens = vec![TokenBuilder::new(1, TokenType::Kitchen).line(Some(1), 1, "5.00").build()];
        let cmp = compare(&tokens);
        assert_eq!(cmp.bar.order_count, 0);
        assert_eq!(cmp.bar.total_sales, 0.0);
        assert_eq!(cmp.bar.avg_order_value, 0.0);
        assert_eq!(cmp.bar.avg_preparation_time, 0.0);
    }
}
