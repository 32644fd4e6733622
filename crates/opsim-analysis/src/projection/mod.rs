//! Scenario projection: Monte Carlo random-walk projections.
//!
//! Each projection extrapolates a historical series from its last value:
//! `x[t] = x[t-1] + trend * multiplier + volatility * z`, `z ~ N(0, 1)`,
//! for many independent paths, then collapses the paths into per-step
//! mean and percentile bands.

pub mod batch;
pub mod projector;
pub mod seed;
pub mod trend;
pub mod types;

pub use batch::{BatchOutcome, BatchRequest, CombinationFailure, ProjectionSettings, ScenarioEngine};
pub use projector::{project, ScenarioProjector, DEFAULT_NUM_PATHS, MIN_HISTORY};
pub use seed::{derive_path_seed, derive_run_seed};
pub use trend::{TrendMethod, Volatility};
pub use types::{FanRow, ProjectionResult, SimulationPath, StepSummary};
