#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perform-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frequency;
pub use frequency::{Frequency, is_lower_freq};

mod method;
pub use method::{CompoundMethod, CorrelationMethod, VolatilityMethod};

mod label;
pub use label::Label;

mod error;
pub use error::ParseError;

/// Re-export common date type.
pub type Date = chrono::NaiveDate;

/// Timestamp used to index every series.
pub type Timestamp = chrono::NaiveDateTime;
