//! Decay simulation of a dose schedule
//!
//! Every dose decays independently with first-order kinetics,
//!
//! ```text
//! A(t) = dosage * 0.5^((t - offset) / half_life)    for t >= offset
//! A(t) = 0                                          for t <  offset
//! ```
//!
//! where `offset` is the intake time in hours after the reference time. The
//! combined amount at a grid point is the sum over all doses (superposition).
//!
//! # Usage
//!
//! ```rust
//! use halflife::data::{normalize, DoseEntry};
//! use halflife::simulator::aggregate;
//!
//! let schedule = normalize(&[DoseEntry::new("100", "14:00")]).unwrap();
//! let result = aggregate(&schedule);
//!
//! assert_eq!(result.series().first().unwrap().amount, 100.0);
//! println!("Below 2 mg after {:.1} h", result.crossing_hour());
//! ```

pub mod options;
pub mod series;

pub use options::DecayOptions;
pub use series::{find_crossing, Crossing, SamplePoint, TimeSeries};

use serde::{Deserialize, Serialize};

use crate::data::DoseSchedule;
use crate::error::HalflifeError;

/// Output of one simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayResult {
    series: TimeSeries,
    crossing: Crossing,
}

impl DecayResult {
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    pub fn crossing(&self) -> Crossing {
        self.crossing
    }

    /// Hour the amount first fell below the threshold
    ///
    /// When the threshold was never crossed this is the last simulated hour;
    /// use [`DecayResult::crossing`] to tell the two cases apart.
    pub fn crossing_hour(&self) -> f64 {
        self.crossing.hour()
    }

    pub fn into_parts(self) -> (TimeSeries, Crossing) {
        (self.series, self.crossing)
    }
}

/// Amount left of `dosage` after `elapsed` hours, zero before intake
pub fn remaining(dosage: f64, elapsed: f64, half_life: f64) -> f64 {
    if elapsed < 0.0 {
        0.0
    } else {
        dosage * 0.5_f64.powf(elapsed / half_life)
    }
}

/// Combined amount of all doses at `hour` hours after the reference time
pub fn amount_at(schedule: &DoseSchedule, hour: f64, half_life: f64) -> f64 {
    schedule
        .doses()
        .iter()
        .map(|dose| remaining(dose.dosage(), hour - schedule.offset_hours(dose), half_life))
        .sum()
}

/// Simulate `schedule` with the default [`DecayOptions`]
pub fn aggregate(schedule: &DoseSchedule) -> DecayResult {
    simulate(schedule, &DecayOptions::default())
}

/// Simulate `schedule` with custom options
///
/// # Errors
///
/// [`HalflifeError::InvalidParameter`] if `options` fail [`DecayOptions::validate`].
pub fn aggregate_with(
    schedule: &DoseSchedule,
    options: &DecayOptions,
) -> Result<DecayResult, HalflifeError> {
    options.validate()?;
    Ok(simulate(schedule, options))
}

fn simulate(schedule: &DoseSchedule, options: &DecayOptions) -> DecayResult {
    let last_index = options.last_index();
    let mut series = TimeSeries::with_capacity(last_index + 1);
    let mut early_stop = false;

    for i in 0..=last_index {
        // index-based so hours stay exact multiples of the step
        let hour = i as f64 * options.step;
        let amount = amount_at(schedule, hour, options.half_life);
        series.push(hour, amount);

        if amount < options.floor && hour > options.min_stop_hours {
            early_stop = i < last_index;
            break;
        }
    }

    let crossing = find_crossing(&series, options.threshold);
    tracing::debug!(
        doses = schedule.len(),
        points = series.len(),
        early_stop,
        ?crossing,
        "aggregated decay series"
    );

    DecayResult { series, crossing }
}
