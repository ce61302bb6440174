//! Named computation methods accepted at the API boundary.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Convention used to aggregate a sequence of per-period returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CompoundMethod {
    /// `(1 + r1) * (1 + r2) * ... - 1`
    #[default]
    #[display("geometric")]
    Geometric,
    /// `r1 + r2 + ...`
    #[display("arithmetic")]
    Arithmetic,
    /// `exp(r1 + r2 + ...) - 1`
    #[display("continuous")]
    Continuous,
}

impl CompoundMethod {
    /// Every compounding method.
    pub const ALL: [Self; 3] = [Self::Geometric, Self::Arithmetic, Self::Continuous];
}

impl FromStr for CompoundMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "geometric" => Ok(Self::Geometric),
            "arithmetic" => Ok(Self::Arithmetic),
            "continuous" => Ok(Self::Continuous),
            _ => Err(ParseError::UnknownMethod { kind: "compounding", value: s.to_string() }),
        }
    }
}

/// Standard deviation estimator used for volatility.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum VolatilityMethod {
    /// Divide by `n - 1`.
    #[default]
    #[display("sample")]
    Sample,
    /// Divide by `n`.
    #[display("population")]
    Population,
}

impl VolatilityMethod {
    /// Delta degrees of freedom for this estimator.
    #[must_use]
    pub const fn ddof(&self) -> usize {
        match self {
            Self::Sample => 1,
            Self::Population => 0,
        }
    }
}

impl FromStr for VolatilityMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sample" => Ok(Self::Sample),
            "population" => Ok(Self::Population),
            _ => Err(ParseError::UnknownMethod { kind: "volatility", value: s.to_string() }),
        }
    }
}

/// Pairwise correlation coefficient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum CorrelationMethod {
    /// Linear (product-moment) correlation.
    #[default]
    #[display("pearson")]
    Pearson,
    /// Pearson correlation of average ranks.
    #[display("spearman")]
    Spearman,
    /// Kendall's tau-b.
    #[display("kendall")]
    Kendall,
}

impl CorrelationMethod {
    /// All correlation methods.
    pub const ALL: [Self; 3] = [Self::Pearson, Self::Spearman, Self::Kendall];
}

impl FromStr for CorrelationMethod {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pearson" => Ok(Self::Pearson),
            "spearman" => Ok(Self::Spearman),
            "kendall" => Ok(Self::Kendall),
            _ => Err(ParseError::UnknownMethod { kind: "correlation", value: s.to_string() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn compound_lookup() {
        assert_eq!("geometric".parse::<CompoundMethod>().unwrap(), CompoundMethod::Geometric);
        assert_eq!("arithmetic".parse::<CompoundMethod>().unwrap(), CompoundMethod::Arithmetic);
        assert_eq!("continuous".parse::<CompoundMethod>().unwrap(), CompoundMethod::Continuous);
    }

    #[rstest]
    #[case("contnuuous")]
    #[case("Geometric")]
    #[case("")]
    fn compound_lookup_rejects_unknown(#[case] name: &str) {
        let err = name.parse::<CompoundMethod>().unwrap_err();
        assert!(err.is_unknown_method());
    }

    #[test]
    fn volatility_ddof() {
        assert_eq!("sample".parse::<VolatilityMethod>().unwrap().ddof(), 1);
        assert_eq!("population".parse::<VolatilityMethod>().unwrap().ddof(), 0);
        assert!("std".parse::<VolatilityMethod>().unwrap_err().is_unknown_method());
    }

    #[test]
    fn correlation_lookup() {
        assert_eq!("kendall".parse::<CorrelationMethod>().unwrap(), CorrelationMethod::Kendall);
        assert!("cosine".parse::<CorrelationMethod>().is_err());
    }
}
