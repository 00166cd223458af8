use thiserror::Error;

use crate::data::parser::ParseError;

#[derive(Error, Debug, Clone)]
pub enum HalflifeError {
    /// No dose entry survived validation
    #[error("Invalid input: at least one dose with a positive dosage and a HH:MM time is required")]
    InvalidInput,

    /// A simulation option is outside its usable range
    #[error("Invalid parameter: {param} = {value}")]
    InvalidParameter { param: String, value: String },

    #[error("Error reading dose data: {0}")]
    Parse(#[from] ParseError),

    #[error("Serialization error: {0}")]
    Serialization(String),
}
