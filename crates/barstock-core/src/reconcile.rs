//! Choosing which local row a server acknowledgment applies to.
//!
//! Responses name rows by index, and an index can shift between request
//! and response when a delete lands in between. `ByIndex` applies the
//! response to whatever row now sits at that index. `NaturalKey` checks the
//! row at that index against the key captured when the request was built
//! and otherwise searches for the key, following renames the store has
//! acknowledged since, failing with `StaleRow` if the row is gone.

use barstock_model::NaturalKey;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::store::RowStore;
use crate::{Result, TableError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcilePolicy {
    #[default]
    ByIndex,
    NaturalKey,
}

impl ReconcilePolicy {
    pub fn resolve(self, store: &RowStore, index: usize, key: &NaturalKey) -> Result<usize> {
        match self {
            ReconcilePolicy::ByIndex => store.get_row(index).map(|_| index),
            ReconcilePolicy::NaturalKey => {
                if store
                    .get_row(index)
                    .is_ok_and(|row| &row.natural_key() == key)
                {
                    return Ok(index);
                }
                match store.find_current(key) {
                    Some(found) => {
                        warn!(
                            requested = index,
                            resolved = found,
                            "row index was stale; resolved by natural key"
                        );
                        Ok(found)
                    }
                    None => Err(TableError::StaleRow { key: key.clone() }),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use barstock_model::Row;
    use barstock_model::column::{BOTTLE, TYPE};

    use super::*;

    fn store() -> RowStore {
        RowStore::from_rows(vec![
            Row::new().with(BOTTLE, "Campari").with(TYPE, "Bitter Liqueur"),
            Row::new().with(BOTTLE, "Aperol").with(TYPE, "Aperitivo"),
        ])
    }

    #[test]
    fn by_index_ignores_key() {
        let key = NaturalKey::new("Campari", "Bitter Liqueur");
        assert_eq!(ReconcilePolicy::ByIndex.resolve(&store(), 1, &key).unwrap(), 1);
        assert!(ReconcilePolicy::ByIndex.resolve(&store(), 2, &key).is_err());
    }

    #[test]
    fn natural_key_follows_shifted_row() {
        let key = NaturalKey::new("Aperol", "Aperitivo");
        assert_eq!(ReconcilePolicy::NaturalKey.resolve(&store(), 5, &key).unwrap(), 1);
        assert_eq!(ReconcilePolicy::NaturalKey.resolve(&store(), 0, &key).unwrap(), 1);
    }

    #[test]
    fn natural_key_reports_vanished_row() {
        let key = NaturalKey::new("Cynar", "Amaro");
        assert!(matches!(
            ReconcilePolicy::NaturalKey.resolve(&store(), 0, &key),
            Err(TableError::StaleRow { .. })
        ));
    }

    #[test]
    fn natural_key_follows_renamed_row() {
        let mut store = store();
        store
            .replace_row(1, Row::new().with(BOTTLE, "Select").with(TYPE, "Aperitivo"))
            .unwrap();
        let key = NaturalKey::new("Aperol", "Aperitivo");
        assert_eq!(ReconcilePolicy::NaturalKey.resolve(&store, 1, &key).unwrap(), 1);
        store.remove_row(0).unwrap();
        assert_eq!(ReconcilePolicy::NaturalKey.resolve(&store, 1, &key).unwrap(), 0);
    }

    #[test]
    fn policy_names_are_kebab_case() {
        let json = serde_json::to_string(&ReconcilePolicy::NaturalKey).unwrap();
        assert_eq!(json, "\"natural-key\"");
    }
}
