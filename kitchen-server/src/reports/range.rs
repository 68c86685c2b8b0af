//! Reporting window resolution
//!
//! Query parameters → inclusive `[start, end]` UTC instants, bucketed by whole
//! days in the business timezone.
//!
//! Priority: `date` > `startDate`/`endDate` (or `filterType=custom`) >
//! `filterType=month|year` > today.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use shared::models::TokenType;

use crate::utils::time::{day_end, day_start, local_date, parse_date};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Default number of rows returned by item performance
pub const DEFAULT_ITEM_LIMIT: usize = 10;
/// Largest accepted `limit`
pub const MAX_ITEM_LIMIT: usize = 100;

/// Raw report query parameters
///
/// Everything arrives as text so that each parameter can be validated with an
/// error naming it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub filter_type: Option<String>,
    pub filter_value: Option<String>,
    pub token_type: Option<String>,
    pub limit: Option<String>,
}

/// Inclusive instant range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Whole local days `first..=last`
    pub fn days(first: NaiveDate, last: NaiveDate, tz: Tz) -> Self {
        Self {
            start: day_start(first, tz),
            end: day_end(last, tz),
        }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// RFC 3339 (UTC, millisecond precision) bounds used as cache key params
    pub fn key_params(&self) -> [String; 2] {
        [
            self.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            self.end.to_rfc3339_opts(SecondsFormat::Millis, true),
        ]
    }
}

/// `filterType` values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterType {
    Month,
    Year,
    Custom,
}

impl FromStr for FilterType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "custom" => Ok(Self::Custom),
            _ => Err(AppError::invalid_field(
                ErrorCode::UnknownFilterType,
                "filterType",
                format!("Invalid filterType: '{s}' (expected month, year or custom)"),
            )),
        }
    }
}

/// Treat empty query values as absent
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    value.ok_or_else(|| {
        AppError::invalid_field(
            ErrorCode::RequiredField,
            field,
            format!("{field} is required"),
        )
    })
}

impl ReportQuery {
    /// Optional token type filter (`KITCHEN` / `BAR`, case-insensitive)
    pub fn token_type(&self) -> AppResult<Option<TokenType>> {
        present(&self.token_type)
            .map(|raw| {
                raw.parse::<TokenType>().map_err(|_| {
                    AppError::invalid_field(
                        ErrorCode::UnknownTokenType,
                        "tokenType",
                        format!("Invalid tokenType: '{raw}' (expected KITCHEN or BAR)"),
                    )
                })
            })
            .transpose()
    }

    /// Row limit for item performance
    pub fn limit(&self) -> AppResult<usize> {
        let Some(raw) = present(&self.limit) else {
            return Ok(DEFAULT_ITEM_LIMIT);
        };
        let limit: usize = raw.parse().map_err(|_| {
            AppError::invalid_field(
                ErrorCode::InvalidFormat,
                "limit",
                format!("Invalid limit: '{raw}' (expected a positive integer)"),
            )
        })?;
        if !(1..=MAX_ITEM_LIMIT).contains(&limit) {
            return Err(AppError::invalid_field(
                ErrorCode::ValueOutOfRange,
                "limit",
                format!("limit must be between 1 and {MAX_ITEM_LIMIT}"),
            ));
        }
        Ok(limit)
    }
}

/// Resolve the reporting window
///
/// Every supplied date parameter is validated even when a higher-priority
/// parameter wins.
pub fn resolve_range(query: &ReportQuery, tz: Tz, now: DateTime<Utc>) -> AppResult<DateRange> {
    let date = present(&query.date)
        .map(|v| parse_date(v, "date"))
        .transpose()?;
    let start_date = present(&query.start_date)
        .map(|v| parse_date(v, "startDate"))
        .transpose()?;
    let end_date = present(&query.end_date)
        .map(|v| parse_date(v, "endDate"))
        .transpose()?;
    let filter_type = present(&query.filter_type)
        .map(FilterType::from_str)
        .transpose()?;

    if let Some(day) = date {
        return Ok(DateRange::days(day, day, tz));
    }

    if start_date.is_some() || end_date.is_some() || filter_type == Some(FilterType::Custom) {
        let start = start_date.ok_or_else(|| missing("startDate"))?;
        let end = end_date.ok_or_else(|| missing("endDate"))?;
        if start > end {
            return Err(AppError::invalid_field(
                ErrorCode::InvalidDateRange,
                "startDate",
                format!("startDate {start} is after endDate {end}"),
            ));
        }
        return Ok(DateRange::days(start, end, tz));
    }

    match filter_type {
        Some(FilterType::Month) => {
            let value = required(present(&query.filter_value), "filterValue")?;
            let first = parse_month(value)?;
            Ok(DateRange::days(first, last_day_of_month(first), tz))
        }
        Some(FilterType::Year) => {
            let value = required(present(&query.filter_value), "filterValue")?;
            let year = parse_year(value)?;
            let first = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| bad_year(value))?;
            let last = NaiveDate::from_ymd_opt(year, 12, 31).ok_or_else(|| bad_year(value))?;
            Ok(DateRange::days(first, last, tz))
        }
        // Custom handled above
        Some(FilterType::Custom) | None => {
            let today = local_date(now, tz);
            Ok(DateRange::days(today, today, tz))
        }
    }
}

fn missing(field: &str) -> AppError {
    AppError::invalid_field(
        ErrorCode::RequiredField,
        field,
        format!("{field} is required for a custom date range"),
    )
}

fn bad_month(value: &str) -> AppError {
    AppError::invalid_field(
        ErrorCode::InvalidFormat,
        "filterValue",
        format!("Invalid filterValue: '{value}' (expected YYYY-MM)"),
    )
}

fn bad_year(value: &str) -> AppError {
    AppError::invalid_field(
        ErrorCode::InvalidFormat,
        "filterValue",
        format!("Invalid filterValue: '{value}' (expected YYYY)"),
    )
}

/// `YYYY-MM` → first day of that month
fn parse_month(value: &str) -> AppResult<NaiveDate> {
    let (year, month) = value.split_once('-').ok_or_else(|| bad_month(value))?;
    if year.len() != 4 || month.len() != 2 || !is_digits(year) || !is_digits(month) {
        return Err(bad_month(value));
    }
    let year: i32 = year.parse().map_err(|_| bad_month(value))?;
    let month: u32 = month.parse().map_err(|_| bad_month(value))?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| bad_month(value))
}

fn is_digits(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

fn parse_year(value: &str) -> AppResult<i32> {
    if value.len() != 4 || !is_digits(value) {
        return Err(bad_year(value));
    }
    value.parse().map_err(|_| bad_year(value))
}

fn last_day_of_month(first: NaiveDate) -> NaiveDate {
    let (year, month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 17, 15, 30, 0).unwrap()
    }

    fn q() -> ReportQuery {
        ReportQuery::default()
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_defaults_to_today_in_business_timezone() {
        let tz = chrono_tz::Asia::Kolkata;
        // 2024-05-17 23:00 UTC is already the 18th in Kolkata
        let late = Utc.with_ymd_and_hms(2024, 5, 17, 23, 0, 0).unwrap();
        let range = resolve_range(&q(), tz, late).unwrap();
        assert_eq!(range, DateRange::days(ymd(2024, 5, 18), ymd(2024, 5, 18), tz));
    }

    #[test]
    fn test_exact_date_end_is_next_midnight_minus_one_ms() {
        let query = ReportQuery {
            date: Some("2024-05-01".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
        assert_eq!(
            range.end + Duration::milliseconds(1),
            Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_exact_date_wins_over_other_params() {
        let query = ReportQuery {
            date: Some("2024-05-01".into()),
            start_date: Some("2024-01-01".into()),
            end_date: Some("2024-01-31".into()),
            filter_type: Some("year".into()),
            filter_value: Some("2023".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range, DateRange::days(ymd(2024, 5, 1), ymd(2024, 5, 1), chrono_tz::UTC));
    }

    #[test]
    fn test_invalid_date_names_field() {
        let query = ReportQuery {
            date: Some("2024-13-40".into()),
            ..q()
        };
        let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
        assert_eq!(err.field(), Some("date"));
        assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_malformed_lower_priority_date_is_still_rejected() {
        let query = ReportQuery {
            date: Some("2024-05-01".into()),
            end_date: Some("yesterday".into()),
            ..q()
        };
        let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
        assert_eq!(err.field(), Some("endDate"));
    }

    #[test]
    fn test_explicit_range() {
        let query = ReportQuery {
            start_date: Some("2024-05-01".into()),
            end_date: Some("2024-05-07".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range, DateRange::days(ymd(2024, 5, 1), ymd(2024, 5, 7), chrono_tz::UTC));
    }

    #[test]
    fn test_explicit_range_wins_over_month_filter() {
        let query = ReportQuery {
            start_date: Some("2024-05-01".into()),
            end_date: Some("2024-05-02".into()),
            filter_type: Some("month".into()),
            filter_value: Some("2023-01".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range.start, Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_partial_range_names_missing_param() {
        let query = ReportQuery {
            start_date: Some("2024-05-01".into()),
            ..q()
        };
        let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
        assert_eq!(err.field(), Some("endDate"));

        let query = ReportQuery {
            filter_type: Some("custom".into()),
            end_date: Some("2024-05-01".into()),
            ..q()
        };
        let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
        assert_eq!(err.field(), Some("startDate"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let query = ReportQuery {
            start_date: Some("2024-05-07".into()),
            end_date: Some("2024-05-01".into()),
            ..q()
        };
        let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidDateRange);
        assert_eq!(err.field(), Some("startDate"));
    }

    #[test]
    fn test_month_filter() {
        let query = ReportQuery {
            filter_type: Some("month".into()),
            filter_value: Some("2024-02".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range, DateRange::days(ymd(2024, 2, 1), ymd(2024, 2, 29), chrono_tz::UTC));

        let query = ReportQuery {
            filter_type: Some("MONTH".into()),
            filter_value: Some("2023-12".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range.end, day_end(ymd(2023, 12, 31), chrono_tz::UTC));
    }

    #[test]
    fn test_year_filter() {
        let query = ReportQuery {
            filter_type: Some("year".into()),
            filter_value: Some("2023".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range, DateRange::days(ymd(2023, 1, 1), ymd(2023, 12, 31), chrono_tz::UTC));
    }

    #[test]
    fn test_filter_errors_name_fields() {
        let cases = [
            (Some("week"), Some("2024-01"), "filterType"),
            (Some("month"), None, "filterValue"),
            (Some("month"), Some("2024-13"), "filterValue"),
            (Some("month"), Some("2024"), "filterValue"),
            (Some("month"), Some("2024-+1"), "filterValue"),
            (Some("month"), Some("+202-01"), "filterValue"),
            (Some("year"), Some("24"), "filterValue"),
            (Some("year"), Some("+202"), "filterValue"),
            (Some("custom"), None, "startDate"),
        ];
        for (filter_type, filter_value, field) in cases {
            let query = ReportQuery {
                filter_type: filter_type.map(String::from),
                filter_value: filter_value.map(String::from),
                ..q()
            };
            let err = resolve_range(&query, chrono_tz::UTC, now()).unwrap_err();
            assert_eq!(err.field(), Some(field), "{filter_type:?} {filter_value:?}");
        }
    }

    #[test]
    fn test_filter_value_without_type_is_ignored() {
        let query = ReportQuery {
            filter_value: Some("2020".into()),
            ..q()
        };
        let range = resolve_range(&query, chrono_tz::UTC, now()).unwrap();
        assert_eq!(range, DateRange::days(ymd(2024, 5, 17), ymd(2024, 5, 17), chrono_tz::UTC));
    }

    #[test]
    fn test_empty_values_are_absent() {
        let query = ReportQuery {
            date: Some("".into()),
            token_type: Some(" ".into()),
            ..q()
        };
        assert!(resolve_range(&query, chrono_tz::UTC, now()).is_ok());
        assert_eq!(query.token_type().unwrap(), None);
    }

    #[test]
    fn test_token_type_param() {
        let query = ReportQuery {
            token_type: Some("bar".into()),
            ..q()
        };
        assert_eq!(query.token_type().unwrap(), Some(TokenType::Bar));

        let query = ReportQuery {
            token_type: Some("grill".into()),
            ..q()
        };
        assert_eq!(query.token_type().unwrap_err().field(), Some("tokenType"));
    }

    #[test]
    fn test_limit_param() {
        assert_eq!(q().limit().unwrap(), DEFAULT_ITEM_LIMIT);
        let with = |v: &str| ReportQuery {
            limit: Some(v.into()),
            ..q()
        };
        assert_eq!(with("25").limit().unwrap(), 25);
        assert_eq!(with("0").limit().unwrap_err().code, ErrorCode::ValueOutOfRange);
        assert_eq!(with("101").limit().unwrap_err().field(), Some("limit"));
        assert_eq!(with("ten").limit().unwrap_err().code, ErrorCode::InvalidFormat);
    }

    #[test]
    fn test_key_params_are_utc_rfc3339() {
        let range = DateRange::days(ymd(2024, 5, 1), ymd(2024, 5, 1), chrono_tz::Asia::Kolkata);
        let [start, end] = range.key_params();
        assert_eq!(start, "2024-04-30T18:30:00.000Z");
        assert_eq!(end, "2024-05-01T18:29:59.999Z");
    }
}
