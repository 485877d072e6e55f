use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Enum input outside the column's declared option set.
    #[error("'{value}' is not a valid {column}")]
    InvalidOption { column: String, value: String },
    #[error("'{value}' is not an on/off value for {column}")]
    InvalidToggle { column: String, value: String },
}

pub type Result<T> = std::result::Result<T, FormatError>;
