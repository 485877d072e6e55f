//! Row store and mutation controllers for the bar inventory table.
//!
//! Everything runs on the caller's thread. The store changes only when a
//! server reply is reconciled; there are no optimistic updates.

#![deny(unsafe_code)]

pub mod delete;
pub mod edit;
pub mod error;
pub mod export;
pub mod protocol;
pub mod reconcile;
pub mod session;
pub mod store;
pub mod transport;

pub use delete::{DeleteController, DeleteState, PendingDelete};
pub use edit::{EditController, EditOutcome, PendingEdit};
pub use error::{Result, TableError};
pub use export::write_csv;
pub use protocol::{
    Acknowledged, CollectionReply, DeleteRequest, ServerReply, UpdateRequest,
};
pub use reconcile::ReconcilePolicy;
pub use session::TableSession;
pub use store::{RowStore, SortDirection};
pub use transport::{Transport, TransportError};
