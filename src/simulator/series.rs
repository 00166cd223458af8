//! Time series produced by a simulation and the threshold scan over it

use serde::{Deserialize, Serialize};

/// Combined amount in the body `hour` hours after the reference time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub hour: f64,
    pub amount: f64,
}

/// Ordered sample points on an evenly spaced grid starting at hour 0
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<SamplePoint>,
}

impl TimeSeries {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, hour: f64, amount: f64) {
        self.points.push(SamplePoint { hour, amount });
    }

    pub fn points(&self) -> &[SamplePoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SamplePoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&SamplePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&SamplePoint> {
        self.points.last()
    }

    pub fn hours(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.hour).collect()
    }

    pub fn amounts(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.amount).collect()
    }

    /// Amount at the grid point exactly at `hour`, if there is one
    pub fn amount_at(&self, hour: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| (p.hour - hour).abs() < 1e-9)
            .map(|p| p.amount)
    }

    /// Highest amount and the hour it occurs at (first one on ties)
    pub fn peak(&self) -> Option<SamplePoint> {
        self.points.iter().copied().fold(None, |best, p| match best {
            Some(b) if b.amount >= p.amount => Some(b),
            _ => Some(p),
        })
    }
}

impl<'a> IntoIterator for &'a TimeSeries {
    type Item = &'a SamplePoint;
    type IntoIter = std::slice::Iter<'a, SamplePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

/// When the combined amount first fell below the reporting threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Crossing {
    /// First grid point with an amount under the threshold
    Reached { hour: f64 },
    /// The series ended above the threshold; `last_hour` is its final point
    NotReached { last_hour: f64 },
}

impl Crossing {
    /// The reported hour: the crossing itself, or the end of the series
    pub fn hour(&self) -> f64 {
        match self {
            Crossing::Reached { hour } => *hour,
            Crossing::NotReached { last_hour } => *last_hour,
        }
    }

    pub fn is_reached(&self) -> bool {
        matches!(self, Crossing::Reached { .. })
    }
}

/// Scan `series` in order for the first amount strictly below `threshold`
pub fn find_crossing(series: &TimeSeries, threshold: f64) -> Crossing {
    match series.iter().find(|p| p.amount < threshold) {
        Some(p) => Crossing::Reached { hour: p.hour },
        None => Crossing::NotReached {
            last_hour: series.last().map(|p| p.hour).unwrap_or(0.0),
        },
    }
}
