//! Deserialization helpers for query-string parameters.
//!
//! Query strings only carry text, so these helpers decide how blank and
//! loosely-typed values are read.

use serde::{Deserialize, Deserializer};

/// Deserializes an optional string into an optional i32.
///
/// Empty strings are treated as `None`.
pub fn deserialize_optional_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse::<i32>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Reads a query flag: only the literal `"true"` turns it on.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(matches!(s.as_deref(), Some("true")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Params {
        #[serde(default, deserialize_with = "deserialize_optional_i32")]
        min: Option<i32>,
        #[serde(default, deserialize_with = "deserialize_flag")]
        flag: bool,
    }

    #[test]
    fn test_optional_i32() {
        let p: Params = serde_json::from_str(r#"{"min":"250"}"#).unwrap();
        assert_eq!(p.min, Some(250));

        let p: Params = serde_json::from_str(r#"{"min":""}"#).unwrap();
        assert_eq!(p.min, None);

        let p: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.min, None);

        assert!(serde_json::from_str::<Params>(r#"{"min":"NaN"}"#).is_err());
    }

    #[test]
    fn test_flag_only_literal_true() {
        let p: Params = serde_json::from_str(r#"{"flag":"true"}"#).unwrap();
        assert!(p.flag);

        let p: Params = serde_json::from_str(r#"{"flag":"yes"}"#).unwrap();
        assert!(!p.flag);

        let p: Params = serde_json::from_str(r#"{"flag":"TRUE"}"#).unwrap();
        assert!(!p.flag);

        let p: Params = serde_json::from_str(r#"{}"#).unwrap();
        assert!(!p.flag);
    }
}
