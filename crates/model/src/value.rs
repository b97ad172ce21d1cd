use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A token's value as it appears in a token file.
///
/// Objects keep their declared key order so composite values (typography,
/// multi-layer shadows) render their sub-properties in the order the author
/// wrote them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    String(String),
    Number(f64),
    Bool(bool),
    List(Vec<TokenValue>),
    Object(IndexMap<String, TokenValue>),
}

impl TokenValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, TokenValue>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Whether this value is a structured object or a list of objects
    /// (as opposed to a scalar literal).
    pub fn is_composite(&self) -> bool {
        matches!(self, Self::Object(_) | Self::List(_))
    }

    /// Parse the leading numeric part of the value, ignoring a trailing
    /// unit suffix (`"16px"` → 16.0). `None` when there is no leading number.
    pub fn leading_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::String(s) => parse_leading_number(s),
            _ => None,
        }
    }
}

/// Parse the longest numeric prefix of a string (`"1.5rem"` → 1.5,
/// `"-4px"` → -4.0). Mirrors how sizes are read out of unit-tagged values.
pub fn parse_leading_number(s: &str) -> Option<f64> {
    let s = s.trim();
    let mut end = 0;
    for (i, c) in s.char_indices() {
        if c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    if end == 0 {
        return None;
    }
    s[..end].parse().ok()
}

/// Format a number the way it appears in generated output: integral values
/// without a fractional part (`16` not `16.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(", "))
            }
            Self::Object(map) => {
                let parts: Vec<String> =
                    map.iter().map(|(k, v)| format!("{k}: {v}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for TokenValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<f64> for TokenValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_scalars_and_composites() {
        let v: TokenValue = serde_json::from_str("\"#ff0000\"").unwrap();
        assert_eq!(v.as_str(), Some("#ff0000"));

        let v: TokenValue = serde_json::from_str("16").unwrap();
        assert_eq!(v.as_number(), Some(16.0));

        let v: TokenValue =
            serde_json::from_str(r#"{"fontFamily": "Inter", "fontSize": "16"}"#).unwrap();
        let obj = v.as_object().unwrap();
        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, ["fontFamily", "fontSize"]);
    }

    #[test]
    fn object_key_order_is_preserved() {
        let v: TokenValue =
            serde_json::from_str(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys: Vec<_> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }

    #[test]
    fn leading_number_ignores_unit_suffix() {
        assert_eq!(TokenValue::from("16px").leading_number(), Some(16.0));
        assert_eq!(TokenValue::from("-1.5rem").leading_number(), Some(-1.5));
        assert_eq!(TokenValue::from("auto").leading_number(), None);
    }

    #[test]
    fn displays_numbers_without_trailing_zero() {
        assert_eq!(TokenValue::from(16.0).to_string(), "16");
        assert_eq!(TokenValue::from(1.5).to_string(), "1.5");
    }
}
