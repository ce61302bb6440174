//! Compounding conventions for per-period returns.
//!
//! Returns are decimals (3% is `0.03`). Every function folds left to right,
//! so results match sequential compounding bit for bit and the last value of
//! a cumulative sequence equals the corresponding total.

use perform_primitives::CompoundMethod;

/// Signature shared by the compounding functions.
pub type CompoundFn = fn(&[f64]) -> f64;

/// Geometric compounding: `(1 + r1) * (1 + r2) * ... - 1`.
#[must_use]
pub fn compound_geometric(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |acc, r| acc * (1.0 + r)) - 1.0
}

/// Arithmetic compounding: `r1 + r2 + ...`.
#[must_use]
pub fn compound_arithmetic(returns: &[f64]) -> f64 {
    returns.iter().fold(0.0, |acc, r| acc + r)
}

/// Continuous compounding: `exp(r1 + r2 + ...) - 1`.
#[must_use]
pub fn compound_continuous(returns: &[f64]) -> f64 {
    compound_arithmetic(returns).exp() - 1.0
}

/// Look up the compounding function for a method.
#[must_use]
pub fn compound(method: CompoundMethod) -> CompoundFn {
    match method {
        CompoundMethod::Geometric => compound_geometric,
        CompoundMethod::Arithmetic => compound_arithmetic,
        CompoundMethod::Continuous => compound_continuous,
    }
}

/// Running compounded value after each return.
///
/// The iterator borrows its input and never consumes it; clone it, or call
/// [`CumSeries::restart`], to walk the sequence again from the beginning.
#[derive(Debug, Clone)]
pub struct CumSeries<'a> {
    returns: &'a [f64],
    method: CompoundMethod,
    pos: usize,
    acc: f64,
}

impl<'a> CumSeries<'a> {
    /// Create a cumulative sequence over `returns`.
    #[must_use]
    pub const fn new(method: CompoundMethod, returns: &'a [f64]) -> Self {
        let acc = match method {
            CompoundMethod::Geometric => 1.0,
            CompoundMethod::Arithmetic | CompoundMethod::Continuous => 0.0,
        };
        Self { returns, method, pos: 0, acc }
    }

    /// A fresh sequence over the same input.
    #[must_use]
    pub const fn restart(&self) -> Self {
        Self::new(self.method, self.returns)
    }

    /// Compounding method of this sequence.
    #[must_use]
    pub const fn method(&self) -> CompoundMethod {
        self.method
    }
}

impl Iterator for CumSeries<'_> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let r = *self.returns.get(self.pos)?;
        self.pos += 1;

        let value = match self.method {
            CompoundMethod::Geometric => {
                self.acc *= 1.0 + r;
                self.acc - 1.0
            }
            CompoundMethod::Arithmetic => {
                self.acc += r;
                self.acc
            }
            CompoundMethod::Continuous => {
                self.acc += r;
                self.acc.exp() - 1.0
            }
        };
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.returns.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CumSeries<'_> {}

/// Cumulative geometric compounding.
#[must_use]
pub const fn cumseries_geometric(returns: &[f64]) -> CumSeries<'_> {
    CumSeries::new(CompoundMethod::Geometric, returns)
}

/// Cumulative arithmetic compounding.
#[must_use]
pub const fn cumseries_arithmetic(returns: &[f64]) -> CumSeries<'_> {
    CumSeries::new(CompoundMethod::Arithmetic, returns)
}

/// Cumulative continuous compounding.
#[must_use]
pub const fn cumseries_continuous(returns: &[f64]) -> CumSeries<'_> {
    CumSeries::new(CompoundMethod::Continuous, returns)
}

/// Cumulative sequence for a method.
#[must_use]
pub const fn cumseries(method: CompoundMethod, returns: &[f64]) -> CumSeries<'_> {
    CumSeries::new(method, returns)
}
