pub mod entries;

pub use entries::ParseError;
pub use entries::{from_reader, read_doses};
