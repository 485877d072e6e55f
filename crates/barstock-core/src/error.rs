use barstock_format::FormatError;
use barstock_model::{ModelError, NaturalKey};
use thiserror::Error;

use crate::transport::TransportError;

/// Failures of a table operation. None of them leave a partial mutation
/// behind: the row store is only written after a request succeeds.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("row {index} not found ({len} rows loaded)")]
    NotFound { index: usize, len: usize },
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("column {0} is not editable")]
    NotEditable(String),
    #[error(transparent)]
    InvalidInput(#[from] FormatError),
    #[error("server rejected request: {0}")]
    ServerRejected(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Transport(TransportError),
    #[error("{key} is no longer in the table")]
    StaleRow { key: NaturalKey },
    #[error("cannot {action} while delete is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("csv export failed: {0}")]
    Export(#[from] csv::Error),
}

impl From<TransportError> for TableError {
    /// A body that could not be decoded is a malformed response, not a
    /// connection problem.
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Decode(message) => TableError::MalformedResponse(message),
            other => TableError::Transport(other),
        }
    }
}

impl TableError {
    /// Text shown to the operator at the point of interaction.
    pub fn user_message(&self) -> String {
        match self {
            TableError::ServerRejected(message) | TableError::MalformedResponse(message) => {
                format!("Error: {message}")
            }
            other => format!("Error: {other}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
