use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Options forwarded to a conversion backend.
pub type ConverterOptions = BTreeMap<String, Scalar>;

/// Per-page metadata surfaced by a conversion backend.
pub type Meta = BTreeMap<String, Scalar>;

static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+$").unwrap());
static DECIMAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?(?:\d+\.)?\d+$").unwrap());
static NAV_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+(?:\.\d+)?$").unwrap());

const TRUE_WORDS: &[&str] = &["true", "yes", "y", "on", "1"];
const FALSE_WORDS: &[&str] = &["false", "no", "n", "off", "0"];

/// A loosely typed value from a flag, a config file or page metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Scalar {
    /// Converts a JSON value; null, arrays and objects are not scalars.
    pub fn from_json(value: &serde_json::Value) -> Option<Scalar> {
        use serde_json::Value;
        match value {
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Scalar::Int)
                .or_else(|| n.as_f64().map(Scalar::Float)),
            Value::String(s) => Some(Scalar::Str(s.clone())),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Scalar::Bool(b) => serde_json::Value::Bool(*b),
            Scalar::Int(i) => serde_json::Value::from(*i),
            Scalar::Float(f) => serde_json::Value::from(*f),
            Scalar::Str(s) => serde_json::Value::String(s.clone()),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric reading used for presentation ordering.
    ///
    /// Numbers are taken as-is; strings count only when they spell an
    /// integer or a plain decimal. Booleans are never numbers.
    pub fn as_nav_number(&self) -> Option<f64> {
        match self {
            Scalar::Int(i) => Some(*i as f64),
            Scalar::Float(f) if !f.is_nan() => Some(*f),
            Scalar::Float(_) | Scalar::Bool(_) => None,
            Scalar::Str(s) => {
                let trimmed = s.trim();
                if NAV_NUMBER.is_match(trimmed) {
                    trimmed.parse::<f64>().ok()
                } else {
                    None
                }
            }
        }
    }

    /// True when the scalar is empty text.
    pub fn is_blank(&self) -> bool {
        matches!(self, Scalar::Str(s) if s.trim().is_empty())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Bool(b) => write!(f, "{b}"),
            Scalar::Int(i) => write!(f, "{i}"),
            Scalar::Float(x) => write!(f, "{x}"),
            Scalar::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Str(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Str(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Int(value)
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

/// Coerces a raw flag value: booleans first, then integers, then decimals,
/// otherwise the original text.
pub fn coerce_scalar(raw: &str) -> Scalar {
    let lowered = raw.trim().to_ascii_lowercase();
    if TRUE_WORDS.contains(&lowered.as_str()) {
        return Scalar::Bool(true);
    }
    if FALSE_WORDS.contains(&lowered.as_str()) {
        return Scalar::Bool(false);
    }
    if INTEGER.is_match(raw) {
        if let Ok(i) = raw.parse::<i64>() {
            return Scalar::Int(i);
        }
    }
    if DECIMAL.is_match(raw) {
        if let Ok(f) = raw.parse::<f64>() {
            return Scalar::Float(f);
        }
    }
    Scalar::Str(raw.to_string())
}

/// Strict boolean reading for `--flag=value`; an empty value means true.
pub fn parse_flag_bool(raw: &str) -> Option<bool> {
    let lowered = raw.trim().to_ascii_lowercase();
    if lowered.is_empty() || TRUE_WORDS.contains(&lowered.as_str()) {
        Some(true)
    } else if FALSE_WORDS.contains(&lowered.as_str()) {
        Some(false)
    } else {
        None
    }
}

/// Lenient boolean reading for configuration values.
///
/// Recognized words map to their meaning; integers other than 0 and 1 and any
/// other non-empty text count as true.
pub fn loose_bool(value: &Scalar) -> bool {
    match value {
        Scalar::Bool(b) => *b,
        Scalar::Int(i) => *i != 0,
        Scalar::Float(f) => *f != 0.0,
        Scalar::Str(s) => {
            let lowered = s.trim().to_ascii_lowercase();
            if TRUE_WORDS.contains(&lowered.as_str()) {
                true
            } else if FALSE_WORDS.contains(&lowered.as_str()) {
                false
            } else {
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_prefers_booleans_over_numbers() {
        assert_eq!(coerce_scalar("1"), Scalar::Bool(true));
        assert_eq!(coerce_scalar("OFF"), Scalar::Bool(false));
        assert_eq!(coerce_scalar("80"), Scalar::Int(80));
        assert_eq!(coerce_scalar("-3"), Scalar::Int(-3));
        assert_eq!(coerce_scalar("1.5"), Scalar::Float(1.5));
        assert_eq!(coerce_scalar("alpha"), Scalar::Str("alpha".into()));
        assert_eq!(coerce_scalar("1.2.3"), Scalar::Str("1.2.3".into()));
    }

    #[test]
    fn nav_number_accepts_numeric_strings_only() {
        assert_eq!(Scalar::Int(10).as_nav_number(), Some(10.0));
        assert_eq!(Scalar::Float(2.5).as_nav_number(), Some(2.5));
        assert_eq!(Scalar::from("2.1").as_nav_number(), Some(2.1));
        assert_eq!(Scalar::from(" 7 ").as_nav_number(), Some(7.0));
        assert_eq!(Scalar::from("n/a").as_nav_number(), None);
        assert_eq!(Scalar::from("1e3").as_nav_number(), None);
        assert_eq!(Scalar::Bool(true).as_nav_number(), None);
    }

    #[test]
    fn flag_bool_rejects_unknown_words() {
        assert_eq!(parse_flag_bool(""), Some(true));
        assert_eq!(parse_flag_bool("Yes"), Some(true));
        assert_eq!(parse_flag_bool("0"), Some(false));
        assert_eq!(parse_flag_bool("maybe"), None);
    }

    #[test]
    fn loose_bool_falls_back_to_truthiness() {
        assert!(loose_bool(&Scalar::from("maybe")));
        assert!(!loose_bool(&Scalar::from("no")));
        assert!(!loose_bool(&Scalar::Int(0)));
        assert!(loose_bool(&Scalar::Int(5)));
    }

    #[test]
    fn json_conversion_skips_composites() {
        assert_eq!(
            Scalar::from_json(&serde_json::json!(3)),
            Some(Scalar::Int(3))
        );
        assert_eq!(
            Scalar::from_json(&serde_json::json!(2.5)),
            Some(Scalar::Float(2.5))
        );
        assert_eq!(Scalar::from_json(&serde_json::json!([1, 2])), None);
        assert_eq!(Scalar::from_json(&serde_json::Value::Null), None);
    }
}
