//! The authoritative in-memory row collection.
//!
//! Rows are only ever written here after the server acknowledges a
//! mutation, so what the store holds is always the initial load or the
//! server's last confirmed answer. The mutating operations are crate-private
//! to keep that true: only the controllers' reconciliation steps call them.
//!
//! An acknowledged edit to Bottle or Type changes a row's natural key. The
//! store remembers each such rename until the next load so a request that
//! captured the old key can still find the row.

use std::collections::BTreeMap;

use barstock_format::{SortKey, sort_key};
use barstock_model::{Column, NaturalKey, Row};
use tracing::debug;

use crate::{Result, TableError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowStore {
    rows: Vec<Row>,
    renames: BTreeMap<NaturalKey, NaturalKey>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from the collection the server returned.
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Self {
            rows,
            renames: BTreeMap::new(),
        }
    }

    /// Replaces the whole collection with a fresh load. Indices handed out
    /// before the reload no longer address the same rows.
    pub fn load(&mut self, rows: Vec<Row>) {
        debug!(rows = rows.len(), "row store loaded");
        self.rows = rows;
        self.renames.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn get_row(&self, index: usize) -> Result<&Row> {
        self.rows.get(index).ok_or(TableError::NotFound {
            index,
            len: self.rows.len(),
        })
    }

    /// Index of the first row whose natural key equals `key`.
    pub fn find_by_key(&self, key: &NaturalKey) -> Option<usize> {
        self.rows.iter().position(|row| &row.natural_key() == key)
    }

    /// Like [`find_by_key`](Self::find_by_key), but follows the renames
    /// acknowledged since the last load when `key` is no longer present.
    pub fn find_current(&self, key: &NaturalKey) -> Option<usize> {
        let mut current = key;
        // Each hop consumes one rename, so a cycle cannot loop forever.
        for _ in 0..=self.renames.len() {
            if let Some(index) = self.find_by_key(current) {
                return Some(index);
            }
            current = self.renames.get(current)?;
        }
        None
    }

    pub fn contains_key(&self, key: &NaturalKey) -> bool {
        self.find_by_key(key).is_some()
    }

    /// Row indices ordered by `column`'s sort key. Ties keep store order.
    pub fn sorted_indices(&self, column: &Column, direction: SortDirection) -> Vec<usize> {
        let mut keyed: Vec<(SortKey, usize)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, row)| (sort_key(column, row.value(&column.name)), index))
            .collect();
        keyed.sort_by(|(a, a_idx), (b, b_idx)| {
            let ordering = match direction {
                SortDirection::Ascending => a.cmp(b),
                SortDirection::Descending => b.cmp(a),
            };
            ordering.then(a_idx.cmp(b_idx))
        });
        keyed.into_iter().map(|(_, index)| index).collect()
    }

    /// Atomic whole-row replacement. Returns the row it replaced.
    pub(crate) fn replace_row(&mut self, index: usize, row: Row) -> Result<Row> {
        let len = self.rows.len();
        let slot = self
            .rows
            .get_mut(index)
            .ok_or(TableError::NotFound { index, len })?;
        let new_key = row.natural_key();
        let previous = std::mem::replace(slot, row);
        let old_key = previous.natural_key();
        if old_key != new_key {
            debug!(row = index, "natural key changed");
            self.renames.insert(old_key, new_key);
        }
        Ok(previous)
    }

    /// Removes a row; later rows shift down by one.
    pub(crate) fn remove_row(&mut self, index: usize) -> Result<Row> {
        if index >= self.rows.len() {
            return Err(TableError::NotFound {
                index,
                len: self.rows.len(),
            });
        }
        Ok(self.rows.remove(index))
    }
}
