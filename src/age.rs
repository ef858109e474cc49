use regex::Regex;
use serde_json::Value;

/// Result of parsing a free-text age field.
///
/// The parser never fails; a value that carries no numeric interpretation
/// comes back as [`Age::NotANumber`] so that one bad cell cannot abort a
/// whole column computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Age {
    Years(f64),
    NotANumber,
}

impl Age {
    /// Numeric view: the parsed value, or NaN for [`Age::NotANumber`].
    pub fn as_f64(&self) -> f64 {
        match self {
            Age::Years(value) => *value,
            Age::NotANumber => f64::NAN,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Age::Years(_))
    }
}

/// Convert heterogeneous age representations into a single number.
///
/// Strings are trimmed, then en dash, em dash and the phrase `" to "` are
/// normalized to a plain hyphen. All decimal numbers are extracted; two or
/// more yield the mean of the first two (extras are ignored), exactly one is
/// returned as-is. Strings without any number, and non-string inputs, fall
/// through to direct numeric conversion.
pub fn parse_age(value: &Value) -> Age {
    if let Value::String(raw) = value {
        let normalized = raw
            .trim()
            .replace('\u{2013}', "-")
            .replace('\u{2014}', "-")
            .replace(" to ", "-");
        let number = Regex::new(r"\d+\.?\d*").unwrap();
        let nums: Vec<f64> = number
            .find_iter(&normalized)
            .filter_map(|m| m.as_str().parse().ok())
            .take(2)
            .collect();
        match nums.as_slice() {
            [low, high] => return Age::Years((low + high) / 2.0),
            [single] => return Age::Years(*single),
            _ => {}
        }
        return match raw.trim().parse::<f64>() {
            Ok(direct) => Age::Years(direct),
            Err(_) => Age::NotANumber,
        };
    }
    match value.as_f64() {
        Some(direct) => Age::Years(direct),
        None => Age::NotANumber,
    }
}
