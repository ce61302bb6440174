//! Descriptive statistics over return slices.

use ndarray::ArrayView1;
use perform_primitives::CorrelationMethod;

use crate::MathError;

/// Arithmetic mean.
///
/// # Errors
/// Returns `MathError::EmptyData` if `values` is empty.
pub fn mean(values: &[f64]) -> Result<f64, MathError> {
    ArrayView1::from(values).mean().ok_or(MathError::EmptyData)
}

/// Standard deviation with `ddof` delta degrees of freedom.
///
/// `ddof = 1` gives the sample estimator, `ddof = 0` the population one.
///
/// # Errors
/// Returns `MathError::InsufficientData` unless there are more than `ddof`
/// observations.
pub fn std_dev(values: &[f64], ddof: usize) -> Result<f64, MathError> {
    let required = ddof + 1;
    if values.len() < required {
        return Err(MathError::InsufficientData { required, actual: values.len() });
    }
    Ok(ArrayView1::from(values).std(ddof as f64))
}

/// Pearson correlation coefficient.
///
/// Returns NaN when either input has zero variance.
///
/// # Errors
/// Returns `MathError` if lengths differ or fewer than 2 pairs are given.
pub fn pearson(x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    check_pairs(x, y)?;

    let x = ArrayView1::from(x);
    let y = ArrayView1::from(y);
    let mean_x = x.mean().ok_or(MathError::EmptyData)?;
    let mean_y = y.mean().ok_or(MathError::EmptyData)?;

    let dx = &x - mean_x;
    let dy = &y - mean_y;

    let cov = dx.dot(&dy);
    let denom = (dx.dot(&dx) * dy.dot(&dy)).sqrt();

    if denom > 0.0 { Ok(cov / denom) } else { Ok(f64::NAN) }
}

/// Spearman rank correlation (Pearson over average ranks).
///
/// # Errors
/// Returns `MathError` if lengths differ or fewer than 2 pairs are given.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    check_pairs(x, y)?;
    pearson(&average_ranks(x), &average_ranks(y))
}

/// Kendall's tau-b, which corrects for ties in either input.
///
/// # Errors
/// Returns `MathError` if lengths differ or fewer than 2 pairs are given.
pub fn kendall_tau(x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    check_pairs(x, y)?;

    let n = x.len();
    let mut concordant = 0_i64;
    let mut discordant = 0_i64;
    let mut ties_x = 0_i64;
    let mut ties_y = 0_i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let dx = x[i] - x[j];
            let dy = y[i] - y[j];
            if dx == 0.0 {
                ties_x += 1;
            }
            if dy == 0.0 {
                ties_y += 1;
            }
            if dx == 0.0 || dy == 0.0 {
                continue;
            }
            if (dx > 0.0) == (dy > 0.0) {
                concordant += 1;
            } else {
                discordant += 1;
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as i64;
    let denom = (((pairs - ties_x) * (pairs - ties_y)) as f64).sqrt();

    if denom > 0.0 { Ok((concordant - discordant) as f64 / denom) } else { Ok(f64::NAN) }
}

/// Correlation using the given method.
///
/// # Errors
/// Returns `MathError` if lengths differ or fewer than 2 pairs are given.
pub fn correlation(method: CorrelationMethod, x: &[f64], y: &[f64]) -> Result<f64, MathError> {
    match method {
        CorrelationMethod::Pearson => pearson(x, y),
        CorrelationMethod::Spearman => spearman(x, y),
        CorrelationMethod::Kendall => kendall_tau(x, y),
    }
}

/// 1-based ranks, ties sharing the mean of the ranks they span.
#[must_use]
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && values[order[end]] == values[order[start]] {
            end += 1;
        }
        // positions start..end are tied; their 1-based ranks average to this
        let rank = (start + end + 1) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = rank;
        }
        start = end;
    }

    ranks
}

fn check_pairs(x: &[f64], y: &[f64]) -> Result<(), MathError> {
    if x.len() != y.len() {
        return Err(MathError::LengthMismatch { left: x.len(), right: y.len() });
    }
    if x.len() < 2 {
        return Err(MathError::InsufficientData { required: 2, actual: x.len() });
    }
    Ok(())
}
