//! Experiment statistics engine
//!
//! Two pure, stateless computations shared by every consumer:
//!
//! - [`evaluate_significance`]: pooled two-proportion z-test between a
//!   baseline and one treatment, with a two-tailed p-value from
//!   [`normal_cdf`].
//! - [`estimate_time_remaining`]: heuristic days-to-decision forecast built
//!   on the current p-value and a minimum-duration floor.
//!
//! Neither function fails. Input that cannot be evaluated produces
//! [`SignificanceVerdict::NEUTRAL`] or no forecast, and no `NaN` or infinity
//! escapes either one.
//!
//! Single-look test only: no sequential testing, multiple-comparison or
//! peeking correction.

mod forecast;
mod normal;
mod significance;

pub use forecast::{estimate_time_remaining, ForecastResult, LimitingFactor};
pub use normal::normal_cdf;
pub use significance::{
    evaluate_significance, SignificanceBand, SignificanceVerdict, HIGHLY_SIGNIFICANT_P,
    SIGNIFICANT_P,
};
