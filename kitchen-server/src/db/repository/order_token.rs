//! Order Token Repository
//!
//! Loads kitchen/bar tokens created inside a reporting window, with their
//! parent order and routed order-item lines.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::models::{ItemRef, OrderItemLine, OrderRef, OrderToken, TokenType};
use sqlx::PgPool;

use crate::db::RepoResult;
use crate::reports::DateRange;

/// Source of order tokens for the report aggregators
#[async_trait]
pub trait OrderTokenSource: Send + Sync {
    /// Tokens with `start <= created_at <= end`, ordered by `created_at`
    ///
    /// `token_type = None` returns both kitchen and bar tokens.
    async fn fetch_tokens(
        &self,
        range: &DateRange,
        token_type: Option<TokenType>,
    ) -> RepoResult<Vec<OrderToken>>;
}

// =========================================================================
// PostgreSQL
// =========================================================================

#[derive(sqlx::FromRow)]
struct TokenRow {
    id: i64,
    token: String,
    token_type: String,
    status: String,
    priority: String,
    created_at: DateTime<Utc>,
    ready_at: Option<DateTime<Utc>>,
    order_id: i64,
    order_number: String,
}

#[derive(sqlx::FromRow)]
struct LineRow {
    order_token_id: i64,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    item_id: Option<i64>,
    item_name: Option<String>,
}

impl TokenRow {
    fn into_token(self) -> RepoResult<OrderToken> {
        Ok(OrderToken {
            id: self.id,
            token: self.token,
            token_type: self.token_type.parse()?,
            status: self.status.parse()?,
            priority: self.priority.parse()?,
            created_at: self.created_at,
            ready_at: self.ready_at,
            order: OrderRef {
                id: self.order_id,
                order_number: self.order_number,
            },
            items: Vec::new(),
        })
    }
}

impl LineRow {
    fn into_line(self) -> OrderItemLine {
        let item = match (self.item_id, self.item_name) {
            (Some(id), Some(name)) => Some(ItemRef { id, name }),
            _ => None,
        };
        OrderItemLine {
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            item,
        }
    }
}

/// PostgreSQL-backed token source
///
/// Two round trips per fetch: tokens joined to orders, then every line of the
/// fetched tokens joined to items.
#[derive(Clone)]
pub struct PgOrderTokenRepository {
    pool: PgPool,
}

impl PgOrderTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_token_rows(
        &self,
        range: &DateRange,
        token_type: Option<TokenType>,
    ) -> RepoResult<Vec<TokenRow>> {
        let rows: Vec<TokenRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.token, t.token_type, t.status, t.priority,
                   t.created_at, t.ready_at, o.id AS order_id, o.order_number
            FROM order_tokens t
            JOIN orders o ON o.id = t.order_id
            WHERE t.created_at >= $1 AND t.created_at <= $2
              AND ($3::TEXT IS NULL OR t.token_type = $3)
            ORDER BY t.created_at ASC, t.id ASC
            "#,
        )
        .bind(range.start)
        .bind(range.end)
        .bind(token_type.map(|t| t.as_str()))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn fetch_line_rows(&self, token_ids: &[i64]) -> RepoResult<Vec<LineRow>> {
        let rows: Vec<LineRow> = sqlx::query_as(
            r#"
            SELECT oi.order_token_id, oi.quantity, oi.unit_price, oi.total_price,
                   i.id AS item_id, i.name AS item_name
            FROM order_items oi
            LEFT JOIN items i ON i.id = oi.item_id
            WHERE oi.order_token_id = ANY($1)
            ORDER BY oi.order_token_id, oi.id
            "#,
        )
        .bind(token_ids)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl OrderTokenSource for PgOrderTokenRepository {
    async fn fetch_tokens(
        &self,
        range: &DateRange,
        token_type: Option<TokenType>,
    ) -> RepoResult<Vec<OrderToken>> {
        let token_rows = self.fetch_token_rows(range, token_type).await?;
        if token_rows.is_empty() {
            return Ok(Vec::new());
        }

        let mut tokens = token_rows
            .into_iter()
            .map(TokenRow::into_token)
            .collect::<RepoResult<Vec<_>>>()?;

        let ids: Vec<i64> = tokens.iter().map(|t| t.id).collect();
        let mut lines_by_token: HashMap<i64, Vec<OrderItemLine>> = HashMap::new();
        for row in self.fetch_line_rows(&ids).await? {
            lines_by_token
                .entry(row.order_token_id)
                .or_default()
                .push(row.into_line());
        }

        for token in &mut tokens {
            if let Some(lines) = lines_by_token.remove(&token.id) {
                token.items = lines;
            }
        }

        tracing::debug!(
            count = tokens.len(),
            start = %range.start,
            end = %range.end,
            token_type = ?token_type,
            "Fetched order tokens"
        );
        Ok(tokens)
    }
}

// =========================================================================
// In-memory
// =========================================================================

/// In-memory token source for tests and local runs
#[derive(Clone, Default)]
pub struct MemoryOrderTokenSource {
    tokens: Arc<RwLock<Vec<OrderToken>>>,
}

impl MemoryOrderTokenSource {
    pub fn new(tokens: Vec<OrderToken>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(tokens)),
        }
    }

    pub fn push(&self, token: OrderToken) {
        self.tokens.write().push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.read().is_empty()
    }
}

#[async_trait]
impl OrderTokenSource for MemoryOrderTokenSource {
    async fn fetch_tokens(
        &self,
        range: &DateRange,
        token_type: Option<TokenType>,
    ) -> RepoResult<Vec<OrderToken>> {
        let mut tokens: Vec<OrderToken> = self
            .tokens
            .read()
            .iter()
            .filter(|t| range.contains(t.created_at))
            .filter(|t| token_type.is_none_or(|ty| t.token_type == ty))
            .cloned()
            .collect();
        tokens.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::models::{TokenPriority, TokenStatus};

    fn token(id: i64, token_type: TokenType, created_at: DateTime<Utc>) -> OrderToken {
        OrderToken {
            id,
            token: format!("T-{id:03}"),
            token_type,
            status: TokenStatus::Pending,
            priority: TokenPriority::Normal,
            created_at,
            ready_at: None,
            order: OrderRef {
                id: 100 + id,
                order_number: format!("ORD-{id}"),
            },
            items: Vec::new(),
        }
    }

    fn may_first() -> DateRange {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        DateRange {
            start,
            end: start + Duration::days(1) - Duration::milliseconds(1),
        }
    }

    #[tokio::test]
    async fn test_memory_source_filters_by_inclusive_range() {
        let range = may_first();
        let source = MemoryOrderTokenSource::new(vec![
            token(1, TokenType::Kitchen, range.start - Duration::milliseconds(1)),
            token(2, TokenType::Kitchen, range.start),
            token(3, TokenType::Bar, range.end),
            token(4, TokenType::Bar, range.end + Duration::milliseconds(1)),
        ]);

        let ids: Vec<i64> = source
            .fetch_tokens(&range, None)
            .await
            .unwrap()
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_memory_source_filters_by_type_and_sorts() {
        let range = may_first();
        let source = MemoryOrderTokenSource::default();
        source.push(token(1, TokenType::Kitchen, range.start + Duration::hours(5)));
        source.push(token(2, TokenType::Bar, range.start + Duration::hours(1)));
        source.push(token(3, TokenType::Kitchen, range.start + Duration::hours(2)));
        assert_eq!(source.len(), 3);

        let kitchen = source
            .fetch_tokens(&range, Some(TokenType::Kitchen))
            .await
            .unwrap();
        let ids: Vec<i64> = kitchen.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn test_token_row_rejects_unknown_status() {
        let row = TokenRow {
            id: 1,
            token: "K-1".into(),
            token_type: "KITCHEN".into(),
            status: "LOST".into(),
            priority: "NORMAL".into(),
            created_at: Utc::now(),
            ready_at: None,
            order_id: 1,
            order_number: "ORD-1".into(),
        };
        assert!(matches!(
            row.into_token(),
            Err(crate::db::RepoError::Corrupt(_))
        ));
    }

    #[test]
    fn test_line_row_without_item() {
        let line = LineRow {
            order_token_id: 1,
            quantity: 2,
            unit_price: Decimal::new(500, 2),
            total_price: Decimal::new(1000, 2),
            item_id: None,
            item_name: None,
        }
        .into_line();
        assert!(line.item.is_none());
        assert_eq!(line.total_price, Decimal::new(1000, 2));
    }
}
