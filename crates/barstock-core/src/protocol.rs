//! Request and reply shapes of the item endpoints.
//!
//! Update: `{row_index, Bottle, Type, field, value}` answered by
//! `{status: "success", row_index, data}` or `{status: "error", message}`.
//! Delete: `{row_index, Bottle, Type}` answered by
//! `{status: "success", row_index, message}` or `{status: "error", message}`.

use barstock_model::{NaturalKey, Row};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{Result, TableError};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateRequest {
    pub row_index: usize,
    #[serde(rename = "Bottle")]
    pub bottle: String,
    #[serde(rename = "Type")]
    pub ingredient_type: String,
    pub field: String,
    pub value: String,
}

impl UpdateRequest {
    pub fn key(&self) -> NaturalKey {
        NaturalKey::new(self.bottle.clone(), self.ingredient_type.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    pub row_index: usize,
    #[serde(rename = "Bottle")]
    pub bottle: String,
    #[serde(rename = "Type")]
    pub ingredient_type: String,
}

impl DeleteRequest {
    pub fn key(&self) -> NaturalKey {
        NaturalKey::new(self.bottle.clone(), self.ingredient_type.clone())
    }
}

/// Reply body of the update and delete endpoints, before classification.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServerReply {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_index")]
    pub row_index: Option<usize>,
    #[serde(default)]
    pub data: Option<Row>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A reply the server marked as successful and that names a row.
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledged {
    pub row_index: usize,
    pub data: Option<Row>,
    pub message: Option<String>,
}

impl ServerReply {
    pub fn success(row_index: usize) -> Self {
        Self {
            status: Some(STATUS_SUCCESS.to_string()),
            row_index: Some(row_index),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Some(STATUS_ERROR.to_string()),
            message: Some(message.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_data(mut self, data: Row) -> Self {
        self.data = Some(data);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Splits the reply into an acknowledgment or the failure it reports.
    ///
    /// A row index of `0` counts as present.
    pub fn classify(self) -> Result<Acknowledged> {
        match self.status.as_deref() {
            Some(STATUS_SUCCESS) => {
                let row_index = self.row_index.ok_or_else(|| {
                    TableError::MalformedResponse("response missing 'row_index'".to_string())
                })?;
                Ok(Acknowledged {
                    row_index,
                    data: self.data,
                    message: self.message,
                })
            }
            Some(STATUS_ERROR) => Err(TableError::ServerRejected(
                self.message
                    .unwrap_or_else(|| "server reported an error".to_string()),
            )),
            Some(other) => Err(TableError::MalformedResponse(format!(
                "unknown response status '{other}'"
            ))),
            None => Err(TableError::MalformedResponse(
                "response missing 'status'".to_string(),
            )),
        }
    }
}

/// Collection bodies come either as a bare array or wrapped in `{"data": [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CollectionReply {
    Rows(Vec<Row>),
    Envelope { data: Vec<Row> },
}

impl CollectionReply {
    pub fn into_rows(self) -> Vec<Row> {
        match self {
            CollectionReply::Rows(rows) | CollectionReply::Envelope { data: rows } => rows,
        }
    }
}

/// Accepts `row_index` as a JSON number or a numeric string.
fn lenient_index<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawIndex {
        Number(u64),
        Text(String),
    }

    let raw = Option::<RawIndex>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawIndex::Number(number)) => usize::try_from(number).ok(),
        Some(RawIndex::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}
