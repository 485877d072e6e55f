use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::column::{BOTTLE, TYPE};

/// A raw field value as the server stores it.
///
/// Deserialized untagged so rows arrive as plain JSON objects
/// (`{"ABV": 40.0, "In_Stock": true, ...}`). Arrays and objects in fields
/// outside the column model land in `Other` and are sent back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl CellValue {
    pub fn text(value: impl Into<String>) -> Self {
        CellValue::Text(value.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Interprets the value as a boolean. Numbers are truthy when non-zero
    /// and text accepts the usual spellings including the toggle's `on`/`off`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(value) => Some(*value),
            CellValue::Number(value) => Some(*value != 0.0),
            CellValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "on" | "yes" | "1" => Some(true),
                "false" | "off" | "no" | "0" | "" => Some(false),
                _ => None,
            },
            CellValue::Missing | CellValue::Other(_) => None,
        }
    }

    /// Interprets the value as a number. Numeric text is parsed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => text.trim().parse().ok(),
            CellValue::Bool(_) | CellValue::Missing | CellValue::Other(_) => None,
        }
    }

    /// Plain string form of the value; missing values are empty.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            CellValue::Text(text) => Cow::Borrowed(text.as_str()),
            CellValue::Number(value) => Cow::Owned(value.to_string()),
            CellValue::Bool(value) => Cow::Owned(value.to_string()),
            CellValue::Other(value) => Cow::Owned(value.to_string()),
            CellValue::Missing => Cow::Borrowed(""),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

/// One inventory row: a raw value per column, addressed by column name.
///
/// Fields the server returns beyond the declared columns are kept so that a
/// reconciled row is exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: BTreeMap<String, CellValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.cells.insert(column.into(), value.into());
        self
    }

    /// Value for `column`, if the row carries that field.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.cells.get(column)
    }

    /// Value for `column`, treating an absent field as missing.
    pub fn value(&self, column: &str) -> &CellValue {
        static MISSING: CellValue = CellValue::Missing;
        self.cells.get(column).unwrap_or(&MISSING)
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn natural_key(&self) -> NaturalKey {
        NaturalKey::new(
            self.value(BOTTLE).as_text().into_owned(),
            self.value(TYPE).as_text().into_owned(),
        )
    }
}

impl FromIterator<(String, CellValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, CellValue)>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// The (Bottle, Type) pair naming a row to humans and to the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NaturalKey {
    #[serde(rename = "Bottle")]
    pub bottle: String,
    #[serde(rename = "Type")]
    pub ingredient_type: String,
}

impl NaturalKey {
    pub fn new(bottle: impl Into<String>, ingredient_type: impl Into<String>) -> Self {
        Self {
            bottle: bottle.into(),
            ingredient_type: ingredient_type.into(),
        }
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.bottle, self.ingredient_type)
    }
}
