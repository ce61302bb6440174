#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perform-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod series;
pub use series::{Aligned, TimeSeries};

mod normalize;
pub use normalize::normalize;

mod parse;
pub use parse::parse_timestamp;

mod freq;
pub use freq::{freq_floor, infer_freq, period_end};

mod resample;
pub use resample::to_freq;

mod error;
pub use error::SeriesError;
