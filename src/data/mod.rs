pub mod dose;
pub mod parser;
pub mod time;

pub use dose::{normalize, Dose, DoseEntry, DoseSchedule, Rejection};
pub use time::{minutes_to_label, parse_time, time_to_minutes};
