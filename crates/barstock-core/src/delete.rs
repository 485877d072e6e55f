//! Confirm-then-delete workflow.
//!
//! ```text
//! Idle -> ConfirmRequested -> Confirmed -> RequestSent -> Removed | Failed
//!              |                  |
//!              +---- cancel ------+--> Idle
//! ```
//!
//! The row's index and natural key are captured when the delete is first
//! requested, so the confirmation prompt and the final message describe the
//! row the operator chose even if an unrelated edit changes it meanwhile.

use barstock_model::NaturalKey;
use tracing::{info, info_span, warn};

use crate::protocol::{DeleteRequest, ServerReply};
use crate::reconcile::ReconcilePolicy;
use crate::store::RowStore;
use crate::transport::{Transport, TransportError};
use crate::{Result, TableError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub row_index: usize,
    pub key: NaturalKey,
}

impl PendingDelete {
    /// Question put to the operator before anything is sent.
    pub fn prompt(&self) -> String {
        format!(
            "Are you sure you want to remove {} from the database?",
            self.key
        )
    }

    pub fn request(&self) -> DeleteRequest {
        DeleteRequest {
            row_index: self.row_index,
            bottle: self.key.bottle.clone(),
            ingredient_type: self.key.ingredient_type.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeleteState {
    #[default]
    Idle,
    ConfirmRequested(PendingDelete),
    Confirmed(PendingDelete),
    RequestSent(PendingDelete),
    Removed {
        key: NaturalKey,
        message: String,
    },
    Failed {
        key: NaturalKey,
        message: String,
    },
}

impl DeleteState {
    pub fn name(&self) -> &'static str {
        match self {
            DeleteState::Idle => "idle",
            DeleteState::ConfirmRequested(_) => "awaiting confirmation",
            DeleteState::Confirmed(_) => "confirmed",
            DeleteState::RequestSent(_) => "in flight",
            DeleteState::Removed { .. } => "removed",
            DeleteState::Failed { .. } => "failed",
        }
    }

    pub fn pending(&self) -> Option<&PendingDelete> {
        match self {
            DeleteState::ConfirmRequested(pending)
            | DeleteState::Confirmed(pending)
            | DeleteState::RequestSent(pending) => Some(pending),
            _ => None,
        }
    }

    /// Operator-facing text for a finished flow.
    pub fn message(&self) -> Option<&str> {
        match self {
            DeleteState::Removed { message, .. } | DeleteState::Failed { message, .. } => {
                Some(message.as_str())
            }
            _ => None,
        }
    }
}

/// One delete flow. Independent flows may run for different rows.
#[derive(Debug, Clone, Default)]
pub struct DeleteController {
    state: DeleteState,
    policy: ReconcilePolicy,
}

impl DeleteController {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &DeleteState {
        &self.state
    }

    fn invalid(&self, action: &'static str) -> TableError {
        TableError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }

    /// Starts a delete for `row_index`, capturing its natural key now.
    ///
    /// Allowed from `Idle` or a finished flow.
    pub fn request_delete(&mut self, store: &RowStore, row_index: usize) -> Result<PendingDelete> {
        if !matches!(
            self.state,
            DeleteState::Idle | DeleteState::Removed { .. } | DeleteState::Failed { .. }
        ) {
            return Err(self.invalid("request a delete"));
        }
        let key = store.get_row(row_index)?.natural_key();
        let pending = PendingDelete { row_index, key };
        self.state = DeleteState::ConfirmRequested(pending.clone());
        Ok(pending)
    }

    /// Explicit operator confirmation.
    pub fn confirm(&mut self) -> Result<()> {
        match std::mem::take(&mut self.state) {
            DeleteState::ConfirmRequested(pending) => {
                self.state = DeleteState::Confirmed(pending);
                Ok(())
            }
            other => {
                self.state = other;
                Err(self.invalid("confirm"))
            }
        }
    }

    /// Abandons an unsent delete. Nothing is sent and the store is untouched.
    pub fn cancel(&mut self) -> Result<()> {
        match self.state {
            DeleteState::ConfirmRequested(_) | DeleteState::Confirmed(_) => {
                self.state = DeleteState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("cancel")),
        }
    }

    /// Moves a confirmed delete in flight and returns the request to send.
    pub fn dispatch(&mut self) -> Result<DeleteRequest> {
        match std::mem::take(&mut self.state) {
            DeleteState::Confirmed(pending) => {
                let request = pending.request();
                self.state = DeleteState::RequestSent(pending);
                Ok(request)
            }
            other => {
                self.state = other;
                Err(self.invalid("send a delete"))
            }
        }
    }

    /// Applies the server's answer to the in-flight delete.
    ///
    /// Returns the success message. On failure the flow ends in `Failed`
    /// with the operator-facing message and the store is untouched.
    pub fn reconcile(
        &mut self,
        store: &mut RowStore,
        reply: std::result::Result<ServerReply, TransportError>,
    ) -> Result<String> {
        let pending = match std::mem::take(&mut self.state) {
            DeleteState::RequestSent(pending) => pending,
            other => {
                self.state = other;
                return Err(self.invalid("apply a delete reply"));
            }
        };
        let policy = self.policy;
        let result = reply
            .map_err(TableError::from)
            .and_then(ServerReply::classify)
            .and_then(|ack| {
                let target = policy.resolve(store, pending.row_index, &pending.key)?;
                store.remove_row(target)?;
                Ok(ack)
            });
        match result {
            Ok(ack) => {
                info!(
                    row = pending.row_index,
                    server_message = ack.message.as_deref().unwrap_or_default(),
                    "delete applied"
                );
                let message = format!("Successfully removed {}.", pending.key);
                self.state = DeleteState::Removed {
                    key: pending.key,
                    message: message.clone(),
                };
                Ok(message)
            }
            Err(error) => {
                warn!(row = pending.row_index, %error, "delete not applied");
                self.state = DeleteState::Failed {
                    key: pending.key,
                    message: error.user_message(),
                };
                Err(error)
            }
        }
    }

    /// Sends a confirmed delete and applies the reply.
    pub fn run<T: Transport>(&mut self, store: &mut RowStore, transport: &T) -> Result<String> {
        let request = self.dispatch()?;
        let span = info_span!("delete", row = request.row_index);
        let _guard = span.enter();
        let reply = transport.delete(&request);
        self.reconcile(store, reply)
    }
}

#[cfg(test)]
mod tests {
    use barstock_model::Row;
    use barstock_model::column::{BOTTLE, TYPE};

    use super::*;

    fn store() -> RowStore {
        RowStore::from_rows(vec![
            Row::new().with(BOTTLE, "Luxardo").with(TYPE, "Maraschino"),
            Row::new().with(BOTTLE, "Fee Brothers").with(TYPE, "Orange Bitters"),
        ])
    }

    #[test]
    fn prompt_names_captured_row() {
        let store = store();
        let mut flow = DeleteController::new();
        let pending = flow.request_delete(&store, 1).unwrap();
        assert_eq!(
            pending.prompt(),
            "Are you sure you want to remove Fee Brothers (Orange Bitters) from the database?"
        );
    }

    #[test]
    fn cannot_dispatch_without_confirmation() {
        let store = store();
        let mut flow = DeleteController::new();
        flow.request_delete(&store, 0).unwrap();
        assert!(matches!(
            flow.dispatch(),
            Err(TableError::InvalidTransition { .. })
        ));
        assert!(matches!(flow.state(), DeleteState::ConfirmRequested(_)));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let store = store();
        let mut flow = DeleteController::new();
        flow.request_delete(&store, 0).unwrap();
        flow.confirm().unwrap();
        flow.cancel().unwrap();
        assert_eq!(flow.state(), &DeleteState::Idle);
        assert!(flow.confirm().is_err());
    }

    #[test]
    fn second_request_while_pending_is_rejected() {
        let store = store();
        let mut flow = DeleteController::new();
        flow.request_delete(&store, 0).unwrap();
        assert!(flow.request_delete(&store, 1).is_err());
        assert_eq!(flow.state().pending().unwrap().row_index, 0);
    }

    #[test]
    fn out_of_bounds_row_stays_idle() {
        let store = store();
        let mut flow = DeleteController::new();
        assert!(matches!(
            flow.request_delete(&store, 9),
            Err(TableError::NotFound { .. })
        ));
        assert_eq!(flow.state(), &DeleteState::Idle);
    }
}
