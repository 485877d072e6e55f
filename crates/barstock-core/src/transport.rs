//! The seam between the controllers and whatever carries requests to the
//! inventory server.

use barstock_model::Row;
use thiserror::Error;

use crate::protocol::{DeleteRequest, ServerReply, UpdateRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request never produced a response.
    #[error("connection failed: {0}")]
    Connection(String),
    /// The server answered with a non-success HTTP status.
    #[error("server returned HTTP {code}")]
    Status { code: u16 },
    /// The response body could not be decoded.
    #[error("{0}")]
    Decode(String),
}

/// REST operations consumed by the table.
///
/// Calls block the caller until a reply or failure arrives. Implementations
/// must not retry on their own; a failed edit is reported to the operator,
/// who decides whether to submit it again.
pub trait Transport {
    /// `GET` the full collection in server order.
    fn load(&self) -> Result<Vec<Row>, TransportError>;

    /// `PUT` a single-field update.
    fn update(&self, request: &UpdateRequest) -> Result<ServerReply, TransportError>;

    /// `DELETE` a row.
    fn delete(&self, request: &DeleteRequest) -> Result<ServerReply, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn load(&self) -> Result<Vec<Row>, TransportError> {
        (**self).load()
    }

    fn update(&self, request: &UpdateRequest) -> Result<ServerReply, TransportError> {
        (**self).update(request)
    }

    fn delete(&self, request: &DeleteRequest) -> Result<ServerReply, TransportError> {
        (**self).delete(request)
    }
}
