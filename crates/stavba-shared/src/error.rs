use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// A required field is missing, unparsable, zero or negative.
    #[error("Invalid input: {field} must be a positive number")]
    InvalidInput { field: &'static str },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
}
