//! Sampling frequency definitions.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::ParseError;

/// Sampling cadence of a time series.
///
/// Variants are declared finest first, so the derived `Ord` is the
/// coarseness order: `Minute < Hourly < BusinessDay < ... < Annual`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
pub enum Frequency {
    /// One observation per minute.
    #[display("min")]
    Minute,
    /// One observation per hour.
    #[display("H")]
    Hourly,
    /// One observation per weekday.
    #[display("B")]
    BusinessDay,
    /// One observation per calendar day.
    #[display("D")]
    Daily,
    /// One observation per week (weeks end on Sunday).
    #[display("W")]
    Weekly,
    /// One observation per calendar month.
    #[display("M")]
    Monthly,
    /// One observation per calendar quarter.
    #[display("Q")]
    Quarterly,
    /// One observation per calendar year.
    #[display("A")]
    Annual,
}

impl Frequency {
    /// Every frequency, finest first.
    pub const ALL: [Self; 8] = [
        Self::Minute,
        Self::Hourly,
        Self::BusinessDay,
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Annual,
    ];

    /// Number of periods in one year, used for annualization.
    #[must_use]
    pub const fn periods_per_year(&self) -> f64 {
        match self {
            Self::Minute => 525_600.0,
            Self::Hourly => 8_760.0,
            Self::BusinessDay => 252.0,
            Self::Daily => 365.0,
            Self::Weekly => 52.0,
            Self::Monthly => 12.0,
            Self::Quarterly => 4.0,
            Self::Annual => 1.0,
        }
    }

    /// Returns true if `self` is coarser than or equal to `other`.
    #[must_use]
    pub fn is_lower_than_or_eq(&self, other: &Self) -> bool {
        self >= other
    }

    /// Returns true for sub-daily frequencies.
    #[must_use]
    pub const fn is_intraday(&self) -> bool {
        matches!(self, Self::Minute | Self::Hourly)
    }
}

/// Whether frequency `a` is coarser than or equal to frequency `b`.
///
/// Reflexive: `is_lower_freq(f, f)` holds for every `f`.
#[must_use]
pub fn is_lower_freq(a: Frequency, b: Frequency) -> bool {
    a.is_lower_than_or_eq(&b)
}

impl FromStr for Frequency {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Offset-style aliases are case sensitive ("M" is month, "min" is minute).
        let freq = match s {
            "T" | "min" => Self::Minute,
            "H" | "h" => Self::Hourly,
            "B" => Self::BusinessDay,
            "D" => Self::Daily,
            "W" | "W-SUN" => Self::Weekly,
            "M" | "ME" => Self::Monthly,
            "Q" | "QE" | "Q-DEC" => Self::Quarterly,
            "A" | "Y" | "YE" | "A-DEC" => Self::Annual,
            other => match other.to_ascii_lowercase().as_str() {
                "minute" | "minutely" => Self::Minute,
                "hour" | "hourly" => Self::Hourly,
                "business" | "bday" | "business_day" => Self::BusinessDay,
                "day" | "daily" => Self::Daily,
                "week" | "weekly" => Self::Weekly,
                "month" | "monthly" => Self::Monthly,
                "quarter" | "quarterly" => Self::Quarterly,
                "year" | "yearly" | "annual" | "annually" => Self::Annual,
                _ => return Err(ParseError::UnknownFrequency(s.to_string())),
            },
        };
        Ok(freq)
    }
}
