//! Dose entities and normalization
//!
//! Raw [`DoseEntry`] values come straight from a form or a file and are kept as
//! text. [`normalize`] turns them into a [`DoseSchedule`]: the valid doses plus
//! the reference time (the earliest dose) that defines hour 0 of a simulation.
//!
//! Invalid entries are dropped, not reported as errors. Only an empty result is
//! an error.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data::time::{parse_time, time_to_minutes};
use crate::error::HalflifeError;

/// A single dose as entered by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseEntry {
    /// Dosage in mg, as text
    pub dosage: String,
    /// Time of intake, `HH:MM`
    pub time: String,
}

impl DoseEntry {
    pub fn new(dosage: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            dosage: dosage.into(),
            time: time.into(),
        }
    }

    /// Validate the entry and convert it into a [`Dose`]
    pub fn parse(&self) -> Result<Dose, Rejection> {
        let dosage = self
            .dosage
            .trim()
            .parse::<f64>()
            .map_err(|_| Rejection::Dosage(self.dosage.clone()))?;
        if !is_valid_dosage(dosage) {
            return Err(Rejection::Dosage(self.dosage.clone()));
        }
        let time = parse_time(&self.time).ok_or_else(|| Rejection::Time(self.time.clone()))?;
        Ok(Dose::new(dosage, time))
    }
}

/// Reason a dose was left out of a schedule
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Rejection {
    #[error("dosage '{0}' is not a positive number")]
    Dosage(String),
    #[error("time '{0}' is not a HH:MM value")]
    Time(String),
    #[error("dosage {0} is not a positive number")]
    NonPositive(f64),
}

fn is_valid_dosage(dosage: f64) -> bool {
    dosage.is_finite() && dosage > 0.0
}

/// A validated dose: amount in mg taken at a wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dose {
    dosage: f64,
    time: NaiveTime,
}

impl Dose {
    pub fn new(dosage: f64, time: NaiveTime) -> Self {
        Self { dosage, time }
    }

    /// Create a dose at `hour:minute`, or `None` if the time of day is invalid
    pub fn at(dosage: f64, hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(|time| Self::new(dosage, time))
    }

    pub fn dosage(&self) -> f64 {
        self.dosage
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Minutes since midnight
    pub fn minutes(&self) -> u32 {
        time_to_minutes(self.time)
    }
}

/// The valid doses of one calculation together with their reference time
///
/// Never empty: construction fails with [`HalflifeError::InvalidInput`] when no
/// dose is usable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoseSchedule {
    doses: Vec<Dose>,
    reference_time: u32,
}

impl DoseSchedule {
    /// Build a schedule from typed doses
    ///
    /// Doses whose dosage is not a finite positive number are dropped, the same
    /// way [`normalize`] drops unusable entries.
    pub fn new(doses: Vec<Dose>) -> Result<Self, HalflifeError> {
        let doses = valid_doses(doses);
        let reference_time = doses
            .iter()
            .map(Dose::minutes)
            .min()
            .ok_or(HalflifeError::InvalidInput)?;

        Ok(Self {
            doses,
            reference_time,
        })
    }

    /// Build a schedule measured from an explicit reference time
    ///
    /// Lets several schedules share one hour 0, e.g. to compare a subset of
    /// doses against the full schedule. Invalid doses are dropped as in
    /// [`DoseSchedule::new`].
    ///
    /// # Errors
    ///
    /// * [`HalflifeError::InvalidInput`] if no dose is usable.
    /// * [`HalflifeError::InvalidParameter`] if `reference_time` is later
    ///   than any dose.
    pub fn with_reference(doses: Vec<Dose>, reference_time: u32) -> Result<Self, HalflifeError> {
        let doses = valid_doses(doses);
        let earliest = doses
            .iter()
            .map(Dose::minutes)
            .min()
            .ok_or(HalflifeError::InvalidInput)?;

        if reference_time > earliest {
            return Err(HalflifeError::InvalidParameter {
                param: "reference_time".to_string(),
                value: format!("{} (later than the first dose at {})", reference_time, earliest),
            });
        }

        Ok(Self {
            doses,
            reference_time,
        })
    }

    pub fn doses(&self) -> &[Dose] {
        &self.doses
    }

    /// Minutes since midnight of the earliest dose
    pub fn reference_time(&self) -> u32 {
        self.reference_time
    }

    pub fn len(&self) -> usize {
        self.doses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }

    /// Hours between the reference time and the intake of `dose`
    pub fn offset_hours(&self, dose: &Dose) -> f64 {
        (dose.minutes() as f64 - self.reference_time as f64) / 60.0
    }

    pub fn into_parts(self) -> (Vec<Dose>, u32) {
        (self.doses, self.reference_time)
    }
}

fn valid_doses(doses: Vec<Dose>) -> Vec<Dose> {
    doses
        .into_iter()
        .enumerate()
        .filter_map(|(index, dose)| {
            if is_valid_dosage(dose.dosage) {
                Some(dose)
            } else {
                let reason = Rejection::NonPositive(dose.dosage);
                tracing::debug!(index, %reason, "dropping dose");
                None
            }
        })
        .collect()
}

/// Validate raw entries and determine the reference time
///
/// Entries with a missing, non-numeric or non-positive dosage, or a time that is
/// not `HH:MM`, are skipped.
///
/// # Errors
///
/// [`HalflifeError::InvalidInput`] if no entry is valid.
pub fn normalize(entries: &[DoseEntry]) -> Result<DoseSchedule, HalflifeError> {
    let doses = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match entry.parse() {
            Ok(dose) => Some(dose),
            Err(reason) => {
                tracing::debug!(index, %reason, "dropping dose entry");
                None
            }
        })
        .collect();

    DoseSchedule::new(doses)
}
