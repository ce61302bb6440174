//! Error types for parsing primitive values.

/// Errors raised when a boundary value does not name a known primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Unrecognized method name.
    #[error("unknown {kind} method: {value:?}")]
    UnknownMethod {
        /// Which family of methods was being looked up.
        kind: &'static str,
        /// The rejected name.
        value: String,
    },

    /// Unrecognized frequency alias.
    #[error("unknown frequency: {0:?}")]
    UnknownFrequency(String),

    /// Argument of the wrong kind.
    #[error("wrong argument type: expected {expected}, got {actual}")]
    WrongArgumentType {
        /// Expected kind of argument.
        expected: &'static str,
        /// Kind actually supplied.
        actual: String,
    },
}

impl ParseError {
    /// Returns whether this error rejects a method name.
    #[must_use]
    pub const fn is_unknown_method(&self) -> bool {
        matches!(self, Self::UnknownMethod { .. })
    }
}
