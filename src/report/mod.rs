//! Presentation helpers
//!
//! Turns a [`DecayResult`] into what a front end needs: chart labels and values,
//! and a human-readable summary of the crossing time. Rendering itself is left
//! to the caller.

use serde::{Deserialize, Serialize};

use crate::data::minutes_to_label;
use crate::error::HalflifeError;
use crate::simulator::{Crossing, DecayResult, TimeSeries};

/// Series data shaped for a line chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    /// Dataset legend
    pub title: String,
    /// Wall-clock label (`HH:MM`) of each point
    pub labels: Vec<String>,
    /// Amount in mg of each point
    pub values: Vec<f64>,
}

impl ChartData {
    pub const DEFAULT_TITLE: &'static str = "Total in Body (mg)";

    /// Label each point with the wall-clock time `reference_time + hour`
    ///
    /// # Arguments
    /// * `series` - Simulated series
    /// * `reference_time` - Minutes since midnight of hour 0
    pub fn new(series: &TimeSeries, reference_time: u32) -> Self {
        let labels = series
            .iter()
            .map(|p| minutes_to_label(reference_time as f64 + p.hour * 60.0))
            .collect();

        Self {
            title: Self::DEFAULT_TITLE.to_string(),
            labels,
            values: series.amounts(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> Result<String, HalflifeError> {
        serde_json::to_string(self).map_err(|e| HalflifeError::Serialization(e.to_string()))
    }
}

/// Format a duration in hours, adding a days/hours breakdown past one day
///
/// ```rust
/// use halflife::report::format_duration;
///
/// assert_eq!(format_duration(6.5), "6.5 hours");
/// assert_eq!(format_duration(32.5), "32.5 hours (1 day 9 hours)");
/// ```
pub fn format_duration(hours: f64) -> String {
    let days = (hours / 24.0).floor() as u64;
    if days == 0 {
        return format!("{:.1} hours", hours);
    }

    let remaining = (hours % 24.0).round() as u64;
    format!(
        "{:.1} hours ({} day{} {} hour{})",
        hours,
        days,
        if days > 1 { "s" } else { "" },
        remaining,
        if remaining != 1 { "s" } else { "" }
    )
}

/// One-line summary of the crossing time
pub fn summary(crossing: &Crossing, threshold: f64) -> String {
    match crossing {
        Crossing::Reached { hour } => {
            format!("Less than {} mg after: {}", threshold, format_duration(*hour))
        }
        Crossing::NotReached { last_hour } => format!(
            "Still at or above {} mg after: {}",
            threshold,
            format_duration(*last_hour)
        ),
    }
}

/// Chart data and summary text of a simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub chart: ChartData,
    pub summary: String,
}

impl Report {
    pub fn new(result: &DecayResult, reference_time: u32, threshold: f64) -> Self {
        Self {
            chart: ChartData::new(result.series(), reference_time),
            summary: summary(&result.crossing(), threshold),
        }
    }
}
