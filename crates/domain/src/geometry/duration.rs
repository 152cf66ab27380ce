//! Duration normalization
//!
//! Routing providers report durations in incompatible shapes: plain seconds,
//! protobuf-style `"300s"` strings, localized text such as `"5 mins"` or
//! `"5분"`, or objects like `{"seconds": 125}`. [`DurationValue`] parses them
//! as a tagged union and [`DurationValue::to_minutes`] applies an ordered
//! fallback chain that degrades to `0` instead of failing.

use serde::Deserialize;

/// A provider-reported duration in any of the supported shapes
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    /// Plain number of seconds
    Number(f64),
    /// Textual duration
    Text(String),
    /// Object carrying a seconds-like field
    Object(DurationObject),
}

/// Object form of a duration
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct DurationObject {
    /// Seconds (protobuf JSON may encode this as a string)
    #[serde(default)]
    pub seconds: Option<NumericField>,
    /// Seconds under the legacy `value` key
    #[serde(default)]
    pub value: Option<NumericField>,
}

/// A number that may arrive as JSON number or numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    /// JSON number
    Number(f64),
    /// Numeric string
    Text(String),
}

impl NumericField {
    fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl DurationValue {
    /// Convert to whole minutes
    ///
    /// Priority: object seconds field, `"<n>s"` strings, hour tokens, minute
    /// tokens (`min`, `분`), bare numbers as seconds, otherwise `0`.
    /// Seconds are always rounded up to the next whole minute.
    #[must_use]
    pub fn to_minutes(&self) -> u32 {
        match self {
            Self::Object(object) => object
                .seconds
                .as_ref()
                .and_then(NumericField::as_f64)
                .filter(|s| *s > 0.0)
                .or_else(|| object.value.as_ref().and_then(NumericField::as_f64))
                .map_or(0, seconds_to_minutes),
            Self::Text(text) => text_to_minutes(text),
            Self::Number(seconds) => seconds_to_minutes(*seconds),
        }
    }
}

/// Normalize an arbitrary JSON duration to minutes (`0` when unrecognized)
#[must_use]
pub fn to_minutes(value: &serde_json::Value) -> u32 {
    DurationValue::deserialize(value).map_or(0, |d| d.to_minutes())
}

/// Round seconds up to whole minutes; non-finite or non-positive yields 0
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn seconds_to_minutes(seconds: f64) -> u32 {
    if !seconds.is_finite() || seconds <= 0.0 {
        return 0;
    }
    (seconds / 60.0).ceil().min(f64::from(u32::MAX)) as u32
}

fn text_to_minutes(text: &str) -> u32 {
    let text = text.trim();

    if let Some(seconds) = text
        .strip_suffix('s')
        .and_then(|number| number.trim().parse::<f64>().ok())
    {
        return seconds_to_minutes(seconds);
    }

    let numbers = integers(text);

    if text.contains("hour") || text.contains("시간") {
        let hours = numbers.first().copied().unwrap_or(0);
        let minutes = if text.contains("min") || text.contains('분') {
            numbers.get(1).copied().unwrap_or(0)
        } else {
            0
        };
        return hours.saturating_mul(60).saturating_add(minutes);
    }

    if text.contains("min") || text.contains('분') {
        return numbers.first().copied().unwrap_or(0);
    }

    text.parse::<f64>().map_or(0, seconds_to_minutes)
}

/// All unsigned integer runs in the text, in order
fn integers(text: &str) -> Vec<u32> {
    text.split(|c: char| !c.is_ascii_digit())
        .filter(|run| !run.is_empty())
        .filter_map(|run| run.parse().ok())
        .collect()
}
