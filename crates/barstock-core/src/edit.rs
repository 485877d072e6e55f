//! Single-cell edits.
//!
//! An edit is prepared against the current row ([`EditController::propose_edit`]),
//! carried to the server as an [`UpdateRequest`], and the reply is applied
//! by [`EditController::reconcile`]. The two halves are separate so a
//! presentation layer can keep other rows interactive while a request is
//! outstanding; [`EditController::submit`] runs both around a blocking
//! transport call.

use barstock_format::{is_unchanged, normalize_input};
use barstock_model::{CellValue, ColumnModel, NaturalKey};
use barstock_model::column::{BOTTLE, TYPE};
use tracing::{debug, info, info_span, trace, warn};

use crate::protocol::{ServerReply, UpdateRequest};
use crate::reconcile::ReconcilePolicy;
use crate::store::RowStore;
use crate::transport::{Transport, TransportError};
use crate::{Result, TableError};

/// An edit between operator input and server acknowledgment.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub row_index: usize,
    pub column: String,
    pub old_value: CellValue,
    /// Trimmed, validated value as it will be sent.
    pub new_value: String,
    /// The row's identity as the server currently knows it.
    pub key: NaturalKey,
}

impl PendingEdit {
    pub fn request(&self) -> UpdateRequest {
        UpdateRequest {
            row_index: self.row_index,
            bottle: self.key.bottle.clone(),
            ingredient_type: self.key.ingredient_type.clone(),
            field: self.column.clone(),
            value: self.new_value.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The input matched the current value; nothing was sent.
    Unchanged,
    /// The server accepted the edit and the row at `row_index` was replaced.
    Applied { row_index: usize },
}

#[derive(Debug, Clone, Copy)]
pub struct EditController<'a> {
    model: &'a ColumnModel,
    policy: ReconcilePolicy,
}

impl<'a> EditController<'a> {
    pub fn new(model: &'a ColumnModel) -> Self {
        Self {
            model,
            policy: ReconcilePolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ReconcilePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Validates a proposed edit and builds the pending request.
    ///
    /// Returns `Ok(None)` when the trimmed input equals the current value.
    /// Unknown or read-only columns and enum values outside the declared
    /// option set are rejected here, before any request exists.
    pub fn propose_edit(
        &self,
        store: &RowStore,
        row_index: usize,
        column_name: &str,
        new_value: &str,
    ) -> Result<Option<PendingEdit>> {
        let row = store.get_row(row_index)?;
        let column = self.model.column(column_name)?;
        if !column.editable {
            return Err(TableError::NotEditable(column.name.clone()));
        }
        let old_value = row.value(column_name).clone();
        let new_value = normalize_input(column, new_value)?;
        if is_unchanged(column, &old_value, &new_value) {
            debug!(row = row_index, column = column_name, "edit unchanged; suppressed");
            return Ok(None);
        }

        // The key must name the row as the server knows it, so an edit to an
        // identity column sends that column's old value.
        let current = row.natural_key();
        let old_text = old_value.as_text().into_owned();
        let key = NaturalKey {
            bottle: if column_name == BOTTLE {
                old_text.clone()
            } else {
                current.bottle
            },
            ingredient_type: if column_name == TYPE {
                old_text
            } else {
                current.ingredient_type
            },
        };

        Ok(Some(PendingEdit {
            row_index,
            column: column_name.to_string(),
            old_value,
            new_value,
            key,
        }))
    }

    /// Applies the server's answer to a pending edit.
    ///
    /// On success the target row is overwritten with the returned data,
    /// never merged. Every failure leaves the store untouched.
    pub fn reconcile(
        &self,
        store: &mut RowStore,
        pending: &PendingEdit,
        reply: std::result::Result<ServerReply, TransportError>,
    ) -> Result<usize> {
        let result = reply
            .map_err(TableError::from)
            .and_then(ServerReply::classify)
            .and_then(|ack| {
                let data = ack.data.ok_or_else(|| {
                    TableError::MalformedResponse("response missing 'data'".to_string())
                })?;
                let target = self.policy.resolve(store, ack.row_index, &pending.key)?;
                store.replace_row(target, data)?;
                Ok(target)
            });
        match &result {
            Ok(target) => info!(
                row = target,
                column = %pending.column,
                "edit applied"
            ),
            Err(error) => warn!(
                row = pending.row_index,
                column = %pending.column,
                %error,
                "edit not applied"
            ),
        }
        result
    }

    /// Proposes, sends and reconciles an edit in one call.
    pub fn submit<T: Transport>(
        &self,
        store: &mut RowStore,
        transport: &T,
        row_index: usize,
        column_name: &str,
        new_value: &str,
    ) -> Result<EditOutcome> {
        let span = info_span!("edit", row = row_index, column = column_name);
        let _guard = span.enter();
        let Some(pending) = self.propose_edit(store, row_index, column_name, new_value)? else {
            return Ok(EditOutcome::Unchanged);
        };
        trace!("sending update");
        let reply = transport.update(&pending.request());
        let row_index = self.reconcile(store, &pending, reply)?;
        Ok(EditOutcome::Applied { row_index })
    }
}
