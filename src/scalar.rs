//! Mixed integer/text keys and values for scripted tables

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::table::{Digest, digest_str};

/// A script token: an integer if it parses as one, text otherwise.
///
/// Integers digest to themselves and text uses the fixed string digest, so
/// `Int(10)` and `Text("10")` are different keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl Scalar {
    pub fn text(s: impl Into<String>) -> Self {
        Scalar::Text(s.into())
    }
}

impl Digest for Scalar {
    fn digest(&self) -> i128 {
        match self {
            Scalar::Int(n) => n.digest(),
            Scalar::Text(s) => digest_str(s),
        }
    }
}

impl FromStr for Scalar {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => Scalar::Int(n),
            Err(_) => Scalar::Text(s.to_string()),
        })
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Int(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{:?}", s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_integers() {
        assert_eq!("10".parse::<Scalar>().unwrap(), Scalar::Int(10));
        assert_eq!("-3".parse::<Scalar>().unwrap(), Scalar::Int(-3));
        assert_eq!("apple".parse::<Scalar>().unwrap(), Scalar::text("apple"));
        // Out of i64 range stays text
        assert_eq!(
            "99999999999999999999".parse::<Scalar>().unwrap(),
            Scalar::text("99999999999999999999")
        );
    }

    #[test]
    fn test_digest_matches_underlying() {
        assert_eq!(Scalar::Int(42).digest(), 42);
        assert_eq!(Scalar::text("apple").digest(), digest_str("apple"));
    }

    #[test]
    fn test_display_quotes_text() {
        assert_eq!(Scalar::Int(7).to_string(), "7");
        assert_eq!(Scalar::text("ten").to_string(), "\"ten\"");
    }

    #[test]
    fn test_serializes_untagged() {
        let json = serde_json::to_string(&vec![Scalar::Int(1), Scalar::text("a")]).unwrap();
        assert_eq!(json, r#"[1,"a"]"#);
    }
}
