use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("duplicate column: {0}")]
    DuplicateColumn(String),
    #[error("enum column {0} declares no options")]
    MissingOptions(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
