//! @ai:module:intent Tolerant decoders for user-entered fields in saved projects
//! @ai:module:layer infrastructure
//! @ai:module:public_api amount, id, date, text, optional_text, or_default
//! @ai:module:stateless true
//!
//! Saved projects come from form input, so numbers may arrive as strings,
//! `null`, or garbage. None of that is allowed to fail a whole project load.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// @ai:intent Decode a decimal amount, treating anything unusable as zero
/// @ai:post result is finite
/// @ai:effects pure
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(number_from_value).unwrap_or(0.0))
}

/// @ai:intent Decode an identifier from a number or numeric string
/// @ai:effects pure
pub fn id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(id_from_value).unwrap_or(0))
}

/// @ai:intent Decode an ISO date, yielding None when absent or malformed
/// @ai:effects pure
pub fn date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => parse_date(&s),
        _ => None,
    })
}

/// @ai:intent Decode free text, accepting scalars and mapping null to empty
/// @ai:effects pure
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;

    Ok(match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

/// @ai:intent Decode optional free text, mapping empty strings to None
/// @ai:effects pure
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = text(deserializer)?;
    Ok(if text.trim().is_empty() { None } else { Some(text) })
}

/// @ai:intent Decode a value, mapping an explicit null to its default
/// @ai:effects pure
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// @ai:intent Interpret a JSON value as a finite number
/// @ai:effects pure
pub(crate) fn number_from_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

fn id_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|v| v.is_finite() && *v >= 0.0)
                    .map(|v| v as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    }
}

/// @ai:intent Parse a YYYY-MM-DD date string
/// @ai:effects pure
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}
