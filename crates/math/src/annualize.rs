//! Annualization of returns and volatilities.

use perform_primitives::CompoundMethod;

use crate::MathError;

/// Calendar days per year used to convert spans into years.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Observations per year implied by a sample.
///
/// `count / (span_days / 365.25)`: the number of observations divided by
/// the elapsed calendar span measured in years.
///
/// # Errors
/// Returns `MathError` if `count` is zero or the span is not positive.
pub fn samples_per_year(count: usize, span_days: f64) -> Result<f64, MathError> {
    if count == 0 {
        return Err(MathError::EmptyData);
    }
    if span_days <= 0.0 || !span_days.is_finite() {
        return Err(MathError::NonPositiveSpan(span_days));
    }
    Ok(count as f64 / (span_days / DAYS_PER_YEAR))
}

/// Convert a total return over `count` periods into an annual rate.
///
/// `total` must have been produced by the same compounding `method`:
///
/// * geometric: `(1 + total)^(ppy / count) - 1`
/// * arithmetic: `total * ppy / count`
/// * continuous: `exp(ln(1 + total) * ppy / count) - 1`
///
/// With `ppy` derived from [`samples_per_year`], the geometric exponent
/// reduces to `365.25 / span_days`.
///
/// # Errors
/// Returns `MathError::EmptyData` if `count` is zero.
pub fn annualize_return(
    total: f64,
    method: CompoundMethod,
    count: usize,
    periods_per_year: f64,
) -> Result<f64, MathError> {
    if count == 0 {
        return Err(MathError::EmptyData);
    }
    let scale = periods_per_year / count as f64;

    let annual = match method {
        CompoundMethod::Geometric => (1.0 + total).powf(scale) - 1.0,
        CompoundMethod::Arithmetic => total * scale,
        CompoundMethod::Continuous => {
            let log_total = total.ln_1p();
            (log_total * scale).exp() - 1.0
        }
    };
    Ok(annual)
}

/// Scale a per-period standard deviation to an annual one.
#[must_use]
pub fn annualize_volatility(per_period: f64, periods_per_year: f64) -> f64 {
    per_period * periods_per_year.sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{compound_arithmetic, compound_continuous};

    #[test]
    fn samples_per_year_from_span() {
        // 253 observations spanning exactly one Julian year
        assert_relative_eq!(samples_per_year(253, 365.25).unwrap(), 253.0, epsilon = 1e-12);
        assert_relative_eq!(samples_per_year(13, 730.5).unwrap(), 6.5, epsilon = 1e-12);
    }

    #[test]
    fn samples_per_year_rejects_empty_span() {
        assert_eq!(samples_per_year(1, 0.0).unwrap_err(), MathError::NonPositiveSpan(0.0));
        assert_eq!(samples_per_year(0, 10.0).unwrap_err(), MathError::EmptyData);
    }

    #[test]
    fn geometric_one_year_is_identity() {
        let annual = annualize_return(0.1, CompoundMethod::Geometric, 12, 12.0).unwrap();
        assert_relative_eq!(annual, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn geometric_two_years() {
        let annual = annualize_return(0.21, CompoundMethod::Geometric, 24, 12.0).unwrap();
        assert_relative_eq!(annual, 0.1, epsilon = 1e-12);
    }

    #[test]
    fn arithmetic_scales_linearly() {
        let returns = [0.01; 6];
        let total = compound_arithmetic(&returns);
        let annual = annualize_return(total, CompoundMethod::Arithmetic, 6, 12.0).unwrap();
        assert_relative_eq!(annual, 0.12, epsilon = 1e-12);
    }

    #[test]
    fn continuous_scales_log_return() {
        let returns = [0.01; 6];
        let total = compound_continuous(&returns);
        let annual = annualize_return(total, CompoundMethod::Continuous, 6, 12.0).unwrap();
        assert_relative_eq!(annual, 0.12_f64.exp() - 1.0, epsilon = 1e-12);
    }

    #[test]
    fn volatility_scaling() {
        assert_relative_eq!(annualize_volatility(0.01, 252.0), 0.01 * 252.0_f64.sqrt());
    }
}
