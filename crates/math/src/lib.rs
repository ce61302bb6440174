#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/perform-rs/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod compound;
pub use compound::{
    CompoundFn, CumSeries, compound, compound_arithmetic, compound_continuous, compound_geometric,
    cumseries, cumseries_arithmetic, cumseries_continuous, cumseries_geometric,
};

mod stats;
pub use stats::{average_ranks, correlation, kendall_tau, mean, pearson, spearman, std_dev};

mod annualize;
pub use annualize::{DAYS_PER_YEAR, annualize_return, annualize_volatility, samples_per_year};

mod error;
pub use error::MathError;
