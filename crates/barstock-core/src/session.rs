//! A loaded table bound to its transport.

use barstock_model::ColumnModel;
use tracing::{info, info_span};

use crate::Result;
use crate::delete::{DeleteController, PendingDelete};
use crate::edit::{EditController, EditOutcome};
use crate::reconcile::ReconcilePolicy;
use crate::store::RowStore;
use crate::transport::Transport;

/// Owns the column model, the row store and the transport for one table.
pub struct TableSession<T> {
    model: ColumnModel,
    store: RowStore,
    transport: T,
    policy: ReconcilePolicy,
}

impl<T: Transport> TableSession<T> {
    /// Loads the collection and returns a ready session.
    pub fn open(model: ColumnModel, transport: T, policy: ReconcilePolicy) -> Result<Self> {
        let mut session = Self {
            model,
            store: RowStore::new(),
            transport,
            policy,
        };
        session.reload()?;
        Ok(session)
    }

    /// Replaces the store with a fresh copy of the server's collection.
    pub fn reload(&mut self) -> Result<usize> {
        let span = info_span!("load");
        let _guard = span.enter();
        let rows = self.transport.load()?;
        let count = rows.len();
        self.store.load(rows);
        info!(rows = count, "collection loaded");
        Ok(count)
    }

    pub fn model(&self) -> &ColumnModel {
        &self.model
    }

    pub fn store(&self) -> &RowStore {
        &self.store
    }

    pub fn edit(&mut self, row_index: usize, column: &str, value: &str) -> Result<EditOutcome> {
        EditController::new(&self.model)
            .with_policy(self.policy)
            .submit(&mut self.store, &self.transport, row_index, column, value)
    }

    /// A fresh delete flow using this session's reconcile policy.
    pub fn delete_flow(&self) -> DeleteController {
        DeleteController::new().with_policy(self.policy)
    }

    /// Starts `flow` on `row_index`; see [`DeleteController::request_delete`].
    pub fn request_delete(
        &self,
        flow: &mut DeleteController,
        row_index: usize,
    ) -> Result<PendingDelete> {
        flow.request_delete(&self.store, row_index)
    }

    /// Sends a confirmed delete flow and applies the reply.
    pub fn run_delete(&mut self, flow: &mut DeleteController) -> Result<String> {
        flow.run(&mut self.store, &self.transport)
    }
}
