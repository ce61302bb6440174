#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perform-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod return_series;
pub use return_series::ReturnSeries;

mod options;
pub use options::{
    AnnualizedReturnOptions, CorrelationOptions, DEFAULT_PAIRWISE_FREQ, SharpeOptions,
    TotalReturnOptions, VolatilityOptions,
};

mod result;
pub use result::{MetricMeta, MetricResult, MetricRow};

mod calendar;
pub use calendar::{MONTHS, calendar_returns};

mod source;
pub use source::ConstantRate;

mod error;
pub use error::AnalyticsError;
