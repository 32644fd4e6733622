//! Synthetic manufacturing KPI generation.
//!
//! Monthly series per facility and metric with linear trend, annual
//! seasonality, facility-level scaling and noise, and rare injected shocks.

pub mod profiles;
pub mod sampler;

pub use profiles::{facility_profile, FacilityProfile, MetricProfile, METRIC_PROFILES};
pub use sampler::SampleGenerator;
