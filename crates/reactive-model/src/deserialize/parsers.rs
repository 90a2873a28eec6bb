//! Primitive coercers.
//!
//! Each coercer takes a non-null value; null short-circuiting happens in the
//! factory wrapper before any coercer runs. Payload-shape mismatches never
//! raise: a non-numeric string coerces to NaN, an unparseable date degrades
//! to null.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::schema::Primitive;
use crate::value::FieldValue;

use super::DeserializeFn;

/// Builds the deserializer for a primitive kind, with the null
/// short-circuit applied.
pub(crate) fn primitive(kind: Primitive) -> DeserializeFn {
    let coerce: fn(&FieldValue) -> FieldValue = match kind {
        Primitive::String => string,
        Primitive::Boolean => boolean,
        Primitive::Number => number,
        Primitive::Date => date,
        Primitive::Object => object,
        Primitive::Array => array,
    };
    Arc::new(move |value, _store| {
        if value.is_null() {
            Ok(FieldValue::Null)
        } else {
            Ok(coerce(value))
        }
    })
}

/// Identity passthrough. A string field does not stringify non-strings.
pub fn string(value: &FieldValue) -> FieldValue {
    value.clone()
}

/// Truthiness coercion.
pub fn boolean(value: &FieldValue) -> FieldValue {
    FieldValue::Bool(truthy(value))
}

/// Numeric coercion. Non-numeric input coerces to NaN, never an error.
pub fn number(value: &FieldValue) -> FieldValue {
    FieldValue::Number(to_number(value))
}

/// Date coercion. Unparseable input degrades to null.
pub fn date(value: &FieldValue) -> FieldValue {
    match to_date(value) {
        Some(d) => FieldValue::Date(d),
        None => FieldValue::Null,
    }
}

/// Identity passthrough; the raw structure is used unchanged.
pub fn object(value: &FieldValue) -> FieldValue {
    value.clone()
}

/// Identity passthrough; the raw structure is used unchanged.
pub fn array(value: &FieldValue) -> FieldValue {
    value.clone()
}

/// Truthiness of a non-null value: `false`, `0`, NaN and `""` are false;
/// everything else is true.
pub fn truthy(value: &FieldValue) -> bool {
    match value {
        FieldValue::Null => false,
        FieldValue::Bool(b) => *b,
        FieldValue::Number(n) => *n != 0.0 && !n.is_nan(),
        FieldValue::String(s) => !s.is_empty(),
        FieldValue::Date(_)
        | FieldValue::Array(_)
        | FieldValue::Object(_)
        | FieldValue::Model(_) => true,
    }
}

/// Numeric value of a non-null value. Strings are trimmed and parsed
/// (empty/whitespace parses to 0); dates yield epoch milliseconds;
/// structures yield NaN.
pub fn to_number(value: &FieldValue) -> f64 {
    match value {
        FieldValue::Null => 0.0,
        FieldValue::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        FieldValue::Number(n) => *n,
        FieldValue::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse().unwrap_or(f64::NAN)
            }
        }
        FieldValue::Date(d) => d.timestamp_millis() as f64,
        FieldValue::Array(_) | FieldValue::Object(_) | FieldValue::Model(_) => f64::NAN,
    }
}

/// Date value of a raw representation: RFC 3339 string, plain `YYYY-MM-DD`
/// string (UTC midnight), epoch-millisecond number, or an existing date.
pub fn to_date(value: &FieldValue) -> Option<DateTime<Utc>> {
    match value {
        FieldValue::Date(d) => Some(*d),
        FieldValue::String(s) => parse_date_str(s.trim()),
        FieldValue::Number(n) => {
            if n.is_finite() {
                Utc.timestamp_millis_opt(*n as i64).single()
            } else {
                None
            }
        }
        _ => None,
    }
}

fn parse_date_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}
