//! The `Date` scalar: timestamps exchanged as RFC 3339 text.
//!
//! Inbound values that are not strings, or strings that do not parse, have no
//! value rather than producing an error.

use async_graphql::dynamic::Scalar;
use async_graphql::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};

pub const DATE: &str = "Date";

/// The scalar as registered in the schema. Any string input is accepted; one
/// that does not parse reads as no value through [`parse_value`].
pub fn date_scalar() -> Scalar {
    Scalar::new(DATE)
        .description("The custom Date scalar type")
        .validator(|value| matches!(value, Value::String(_)))
}

/// Render an instant as RFC 3339, using `Z` for UTC.
pub fn serialize(instant: &DateTime<FixedOffset>) -> Value {
    Value::String(instant.to_rfc3339_opts(SecondsFormat::AutoSi, true))
}

/// Read an argument value, whether it came from a variable or a literal.
pub fn parse_value(value: &Value) -> Option<DateTime<FixedOffset>> {
    parse_literal(&value.clone().into_value())
}

/// Read a literal written in the query document.
pub fn parse_literal(value: &async_graphql_value::Value) -> Option<DateTime<FixedOffset>> {
    match value {
        async_graphql_value::Value::String(text) => parse_rfc3339(text),
        _ => None,
    }
}

fn parse_rfc3339(text: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(text).ok()
}

/// Read a timestamp the way the database renders one as text: RFC 3339,
/// `2024-01-02 03:04:05.678+00`, a zoneless timestamp (taken as UTC) or a bare
/// date (taken as midnight UTC).
pub fn from_storage_text(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_rfc3339(text)
        .or_else(|| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z").ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
                .ok()
                .map(as_utc)
        })
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(as_utc)
        })
}

fn as_utc(naive: NaiveDateTime) -> DateTime<FixedOffset> {
    Utc.from_utc_datetime(&naive).into()
}
