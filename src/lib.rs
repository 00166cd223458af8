//! Decay of timed doses under first-order kinetics
//!
//! `halflife` takes a handful of doses taken at different times of day, lets each
//! one decay with a fixed half-life and sums them into a single time series of
//! the amount left in the body. From that series it derives when the amount
//! first drops below a reporting threshold.
//!
//! The pipeline has three steps:
//!
//! 1. [`normalize`] validates raw [`DoseEntry`] values into a [`DoseSchedule`]
//!    whose earliest dose is hour 0.
//! 2. [`aggregate`] (or [`aggregate_with`]) samples the combined amount on a
//!    fixed grid and finds the threshold crossing.
//! 3. [`report`] shapes the result for a chart and a summary line.
//!
//! [`calculate`] runs all three at once.
//!
//! ```rust
//! use halflife::prelude::*;
//!
//! let entries = vec![DoseEntry::new("100", "08:00"), DoseEntry::new("100", "14:00")];
//! let calculation = calculate(&entries, &DecayOptions::default()).unwrap();
//!
//! assert_eq!(calculation.report.chart.labels[0], "08:00");
//! println!("{}", calculation.report.summary);
//! ```

pub mod data;
pub mod error;
pub mod report;
pub mod simulator;

pub use crate::data::{normalize, Dose, DoseEntry, DoseSchedule};
pub use crate::report::{ChartData, Report};
pub use crate::simulator::{aggregate, aggregate_with, Crossing, DecayOptions, DecayResult};
pub use error::HalflifeError;

/// Everything produced by one calculation
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub schedule: DoseSchedule,
    pub result: DecayResult,
    pub report: Report,
}

/// Normalize `entries`, simulate them and build the report
///
/// # Errors
///
/// * [`HalflifeError::InvalidInput`] if no entry is a valid dose. Nothing is
///   simulated in that case.
/// * [`HalflifeError::InvalidParameter`] if `options` are unusable.
pub fn calculate(
    entries: &[DoseEntry],
    options: &DecayOptions,
) -> Result<Calculation, HalflifeError> {
    let schedule = normalize(entries)?;
    let result = aggregate_with(&schedule, options)?;
    let report = Report::new(&result, schedule.reference_time(), options.threshold);

    Ok(Calculation {
        schedule,
        result,
        report,
    })
}

/// Read dose entries as CSV from `reader`, then run [`calculate`]
///
/// See [`data::parser::read_doses`] for the expected columns.
///
/// # Errors
///
/// [`HalflifeError::Parse`] if the CSV cannot be read, otherwise as [`calculate`].
pub fn calculate_from_reader<R: std::io::Read>(
    reader: R,
    options: &DecayOptions,
) -> Result<Calculation, HalflifeError> {
    let entries = data::parser::from_reader(reader)?;
    calculate(&entries, options)
}

pub mod prelude {
    pub mod data {
        pub use crate::data::parser::{from_reader, read_doses};
        pub use crate::data::{minutes_to_label, parse_time, time_to_minutes};
    }

    pub use crate::data::{normalize, Dose, DoseEntry, DoseSchedule};
    pub use crate::report::{format_duration, ChartData, Report};
    pub use crate::simulator::{
        aggregate, aggregate_with, Crossing, DecayOptions, DecayResult, SamplePoint, TimeSeries,
    };
    pub use crate::{calculate, calculate_from_reader, Calculation, HalflifeError};
}
