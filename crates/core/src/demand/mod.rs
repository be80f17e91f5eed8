//! Daily demand estimation from movement history.

pub mod estimator;

pub use estimator::{DemandEstimate, DemandEstimator};
