//! Unified error codes for the kitchen reporting platform
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 4xxx: Report errors
//! - 5xxx: Loyalty errors
//! - 9xxx: System errors

use std::fmt;

/// Unified error code enum
///
/// Codes are `u16` values; the response envelope carries them as plain numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 4xxx: Report ====================
    /// Start of the reporting window is after its end
    InvalidDateRange = 4001,
    /// filterType is not month, year or custom
    UnknownFilterType = 4002,
    /// tokenType is not KITCHEN or BAR
    UnknownTokenType = 4003,
    /// Report metric name is not known
    UnknownReportMetric = 4004,

    // ==================== 5xxx: Loyalty ====================
    /// Spend amount must not be negative
    LoyaltyNegativeAmount = 5001,
    /// Point balance must not be negative
    LoyaltyNegativePoints = 5002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Operation timeout
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,
    /// Report cache failure
    CacheError = 9006,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Report
            ErrorCode::InvalidDateRange => "Start date must not be after end date",
            ErrorCode::UnknownFilterType => "Filter type must be month, year or custom",
            ErrorCode::UnknownTokenType => "Token type must be KITCHEN or BAR",
            ErrorCode::UnknownReportMetric => "Unknown report metric",

            // Loyalty
            ErrorCode::LoyaltyNegativeAmount => "Amount must not be negative",
            ErrorCode::LoyaltyNegativePoints => "Points must not be negative",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::CacheError => "Report cache error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
