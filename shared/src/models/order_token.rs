//! Order Token Model (kitchen / bar work tickets)
//!
//! An order is split into one token per routing destination when it is placed.
//! Tokens move through their own status lifecycle, independent of the order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when an enum value cannot be parsed from its text form
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} value: {value}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Routing destination of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenType {
    Kitchen,
    Bar,
}

impl TokenType {
    pub const ALL: [TokenType; 2] = [TokenType::Kitchen, TokenType::Bar];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Kitchen => "KITCHEN",
            Self::Bar => "BAR",
        }
    }
}

impl FromStr for TokenType {
    type Err = UnknownVariant;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "KITCHEN" => Ok(Self::Kitchen),
            "BAR" => Ok(Self::Bar),
            _ => Err(UnknownVariant {
                kind: "token_type",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token status lifecycle
///
/// PENDING → PREPARING → READY → DELIVERED, or CANCELLED at any point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl TokenStatus {
    pub const ALL: [TokenStatus; 5] = [
        TokenStatus::Pending,
        TokenStatus::Preparing,
        TokenStatus::Ready,
        TokenStatus::Delivered,
        TokenStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Preparing => "PREPARING",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// READY or DELIVERED
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Ready | Self::Delivered)
    }
}

impl FromStr for TokenStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Self::Pending),
            "PREPARING" => Ok(Self::Preparing),
            "READY" => Ok(Self::Ready),
            "DELIVERED" => Ok(Self::Delivered),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(UnknownVariant {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Kitchen priority of a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenPriority {
    Normal,
    High,
    Urgent,
}

impl TokenPriority {
    /// Fixed report order
    pub const ALL: [TokenPriority; 3] = [
        TokenPriority::Normal,
        TokenPriority::High,
        TokenPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl FromStr for TokenPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            _ => Err(UnknownVariant {
                kind: "priority",
                value: s.to_string(),
            }),
        }
    }
}

/// Menu item referenced by an order line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub id: i64,
    pub name: String,
}

/// Order-item line routed to a token (read-only view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemLine {
    pub quantity: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
    /// None when the menu item no longer resolves
    pub item: Option<ItemRef>,
}

/// Parent order of a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: i64,
    pub order_number: String,
}

/// Kitchen- or bar-scoped work ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderToken {
    pub id: i64,
    /// Display token, e.g. "K-042"
    pub token: String,
    pub token_type: TokenType,
    pub status: TokenStatus,
    pub priority: TokenPriority,
    pub created_at: DateTime<Utc>,
    /// Set once the token reached READY
    pub ready_at: Option<DateTime<Utc>>,
    pub order: OrderRef,
    #[serde(default)]
    pub items: Vec<OrderItemLine>,
}

impl OrderToken {
    /// Minutes between creation and READY
    ///
    /// None while `ready_at` is unset or when the clock went backwards.
    pub fn preparation_minutes(&self) -> Option<f64> {
        let ready_at = self.ready_at?;
        let elapsed = ready_at.signed_duration_since(self.created_at);
        let millis = elapsed.num_milliseconds();
        if millis < 0 {
            return None;
        }
        Some(millis as f64 / 60_000.0)
    }

    /// Sum of line totals
    pub fn revenue(&self) -> Decimal {
        self.items.iter().map(|line| line.total_price).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn token(ready_after_minutes: Option<i64>) -> OrderToken {
        let created_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        OrderToken {
            id: 1,
            token: "K-001".into(),
            token_type: TokenType::Kitchen,
            status: TokenStatus::Ready,
            priority: TokenPriority::Normal,
            created_at,
            ready_at: ready_after_minutes.map(|m| created_at + Duration::minutes(m)),
            order: OrderRef {
                id: 10,
                order_number: "ORD-10".into(),
            },
            items: vec![
                OrderItemLine {
                    quantity: 2,
                    unit_price: Decimal::new(450, 2),
                    total_price: Decimal::new(900, 2),
                    item: None,
                },
                OrderItemLine {
                    quantity: 1,
                    unit_price: Decimal::new(1, 1),
                    total_price: Decimal::new(2, 1),
                    item: None,
                },
            ],
        }
    }

    #[test]
    fn test_preparation_minutes() {
        assert_eq!(token(Some(7)).preparation_minutes(), Some(7.0));
        assert_eq!(token(None).preparation_minutes(), None);
        assert_eq!(token(Some(-3)).preparation_minutes(), None);
        assert_eq!(token(Some(0)).preparation_minutes(), Some(0.0));
    }

    #[test]
    fn test_revenue_sums_line_totals() {
        assert_eq!(token(None).revenue(), Decimal::new(920, 2));
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("bar".parse::<TokenType>(), Ok(TokenType::Bar));
        assert_eq!("Kitchen".parse::<TokenType>(), Ok(TokenType::Kitchen));
        assert_eq!("ready".parse::<TokenStatus>(), Ok(TokenStatus::Ready));
        assert_eq!("URGENT".parse::<TokenPriority>(), Ok(TokenPriority::Urgent));
        let err = "grill".parse::<TokenType>().unwrap_err();
        assert_eq!(err.kind, "token_type");
    }

    #[test]
    fn test_serialized_names_are_uppercase() {
        assert_eq!(
            serde_json::to_string(&TokenStatus::Delivered).unwrap(),
            "\"DELIVERED\""
        );
        assert_eq!(serde_json::to_string(&TokenType::Bar).unwrap(), "\"BAR\"");
    }
}
