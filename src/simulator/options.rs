//! Simulation configuration

use serde::{Deserialize, Serialize};

use crate::error::HalflifeError;

/// Upper bound on the number of grid points a simulation may produce
pub const MAX_GRID_POINTS: usize = 1_000_000;

/// Parameters of a decay simulation
///
/// All times are in hours and all amounts in mg. The defaults reproduce the
/// fixed constants of the calculator (caffeine, half-life 5.7 h), so
/// `DecayOptions::default()` never fails validation.
///
/// # Example
///
/// ```rust
/// use halflife::simulator::DecayOptions;
///
/// let options = DecayOptions::default()
///     .with_half_life(4.0)
///     .with_threshold(5.0);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayOptions {
    /// Time for an amount to halve (default: 5.7)
    pub half_life: f64,
    /// Spacing of the time grid (default: 0.5)
    pub step: f64,
    /// Last grid point simulated (default: 48.0)
    pub max_hours: f64,
    /// Amount under which the simulation may stop early (default: 0.01)
    pub floor: f64,
    /// Early stop is only allowed strictly after this time (default: 12.0)
    pub min_stop_hours: f64,
    /// Reporting threshold for the crossing time (default: 2.0)
    pub threshold: f64,
}

impl Default for DecayOptions {
    fn default() -> Self {
        Self {
            half_life: 5.7,
            step: 0.5,
            max_hours: 48.0,
            floor: 0.01,
            min_stop_hours: 12.0,
            threshold: 2.0,
        }
    }
}

impl DecayOptions {
    pub fn with_half_life(mut self, half_life: f64) -> Self {
        self.half_life = half_life;
        self
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_max_hours(mut self, max_hours: f64) -> Self {
        self.max_hours = max_hours;
        self
    }

    /// Set the early-stop floor and the minimum time before it applies
    pub fn with_early_stop(mut self, floor: f64, min_stop_hours: f64) -> Self {
        self.floor = floor;
        self.min_stop_hours = min_stop_hours;
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Index of the last grid point, `floor(max_hours / step)`
    pub(crate) fn last_index(&self) -> usize {
        // tolerate representation error, e.g. 0.3 * 10 vs 3.0
        (self.max_hours / self.step + 1e-9).floor() as usize
    }

    /// Check that every option is usable
    ///
    /// # Errors
    ///
    /// [`HalflifeError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), HalflifeError> {
        positive("half_life", self.half_life)?;
        positive("step", self.step)?;
        non_negative("max_hours", self.max_hours)?;
        non_negative("floor", self.floor)?;
        non_negative("min_stop_hours", self.min_stop_hours)?;
        non_negative("threshold", self.threshold)?;

        if self.last_index() >= MAX_GRID_POINTS {
            return Err(invalid(
                "step",
                format!(
                    "{} (more than {} grid points up to {} h)",
                    self.step, MAX_GRID_POINTS, self.max_hours
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(param: &str, value: impl ToString) -> HalflifeError {
    HalflifeError::InvalidParameter {
        param: param.to_string(),
        value: value.to_string(),
    }
}

fn positive(param: &str, value: f64) -> Result<(), HalflifeError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(param, value))
    }
}

fn non_negative(param: &str, value: f64) -> Result<(), HalflifeError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(param, value))
    }
}
