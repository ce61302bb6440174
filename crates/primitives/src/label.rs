//! Series label definitions.

use derive_more::Display;
use polars::prelude::AnyValue;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Name under which a benchmark or risk-free series is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub struct Label(pub String);

impl Label {
    /// Create a new label.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the label as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Label {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Label {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Labels read out of a frame cell must be strings.
impl TryFrom<&AnyValue<'_>> for Label {
    type Error = ParseError;

    fn try_from(value: &AnyValue<'_>) -> Result<Self, Self::Error> {
        match value {
            AnyValue::String(s) => Ok(Self::from(*s)),
            AnyValue::StringOwned(s) => Ok(Self::from(s.as_str())),
            other => Err(ParseError::WrongArgumentType {
                expected: "string label",
                actual: other.dtype().to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_str() {
        let label: Label = "SPY".into();
        assert_eq!(label.as_str(), "SPY");
        assert_eq!(label.to_string(), "SPY");
    }

    #[test]
    fn label_from_any_value() {
        let label = Label::try_from(&AnyValue::String("rf")).unwrap();
        assert_eq!(label, Label::new("rf"));
    }

    #[test]
    fn label_from_non_string_any_value() {
        let err = Label::try_from(&AnyValue::Int32(3)).unwrap_err();
        assert!(matches!(err, ParseError::WrongArgumentType { .. }));
    }
}
