//! # perform
//!
//! Performance analytics for return series.
//!
//! This crate provides a unified interface to the perform crates.
//! Individual components can be enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all library components
//! - `csv` (default): CSV loading via [`read_csv`]
//! - `primitives`: Frequencies, method enums and labels
//! - `traits`: The risk-free source seam
//! - `math`: Compounding, statistics and annualization
//! - `series`: Time series, normalization and resampling
//! - `analytics`: The return series aggregate and metric tables
//! - `cli`: The `perform` binary
//!
//! ## Example
//!
//! ```rust,ignore
//! use perform::analytics::{ReturnSeries, TotalReturnOptions};
//!
//! let fund = perform::read_csv("fund.csv")?;
//! let rs = ReturnSeries::from_frame(&fund)?;
//! let total = rs.get_total_return(&TotalReturnOptions::default())?;
//! println!("{}", total.to_frame()?);
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use perform_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use perform_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use perform_math as math;
#[cfg(feature = "series")]
#[doc(inline)]
pub use perform_series as series;
#[cfg(feature = "analytics")]
#[doc(inline)]
pub use perform_analytics as analytics;

#[cfg(feature = "csv")]
mod csv;
#[cfg(feature = "csv")]
pub use csv::read_csv;

// Used by the `perform` binary only.
#[cfg(feature = "cli")]
use tracing_subscriber as _;
