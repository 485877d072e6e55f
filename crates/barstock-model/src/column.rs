//! Static column metadata for the inventory table.
//!
//! A [`ColumnModel`] is the single description of what each column holds,
//! how it is formatted, and whether operators may edit it. It has no side
//! effects and is shared read-only by the formatter and the controllers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::{ModelError, Result};

pub const IN_STOCK: &str = "In_Stock";
pub const CATEGORY: &str = "Category";
pub const TYPE: &str = "Type";
pub const BOTTLE: &str = "Bottle";
pub const ABV: &str = "ABV";
pub const SIZE_ML: &str = "Size_mL";
pub const SIZE_OZ: &str = "Size_oz";
pub const PRICE_PAID: &str = "Price_Paid";
pub const COST_PER_OZ: &str = "Cost_per_oz";

/// Unit a volume column is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VolumeUnit {
    Milliliters,
    FluidOunces,
}

impl VolumeUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            VolumeUnit::Milliliters => "mL",
            VolumeUnit::FluidOunces => "oz",
        }
    }

    /// Fraction digits shown for this unit.
    pub fn decimals(&self) -> usize {
        match self {
            VolumeUnit::Milliliters => 0,
            VolumeUnit::FluidOunces => 1,
        }
    }
}

/// Semantic type of a column, including its formatting parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Boolean,
    Enum,
    Text,
    Percentage,
    Volume(VolumeUnit),
    Currency { decimals: usize },
    Count,
}

impl ColumnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Boolean => "Boolean",
            ColumnType::Enum => "Enum",
            ColumnType::Text => "Text",
            ColumnType::Percentage => "Percentage",
            ColumnType::Volume(_) => "Volume",
            ColumnType::Currency { .. } => "Currency",
            ColumnType::Count => "Count",
        }
    }

    /// Returns true for types whose raw value is a number.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Percentage
                | ColumnType::Volume(_)
                | ColumnType::Currency { .. }
                | ColumnType::Count
        )
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Volume(unit) => write!(f, "Volume ({})", unit.suffix()),
            ColumnType::Currency { decimals } => write!(f, "Currency ({decimals} dp)"),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One entry of an enum column's closed option set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumOption {
    pub value: String,
    pub label: String,
}

impl EnumOption {
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            label: value.clone(),
            value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub label: String,
    pub column_type: ColumnType,
    pub editable: bool,
    /// Closed option set, in canonical order. Empty unless the type is `Enum`.
    pub options: Vec<EnumOption>,
}

impl Column {
    pub fn new(name: impl Into<String>, label: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            column_type,
            editable: true,
            options: Vec::new(),
        }
    }

    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    #[must_use]
    pub fn with_options(mut self, options: Vec<EnumOption>) -> Self {
        self.options = options;
        self
    }

    /// Returns true if this column is part of the row's natural identity key.
    pub fn is_identity(&self) -> bool {
        self.name == BOTTLE || self.name == TYPE
    }

    /// Position of `value` in the declared option ordering.
    pub fn option_position(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }

    pub fn allows(&self, value: &str) -> bool {
        self.column_type != ColumnType::Enum || self.option_position(value).is_some()
    }
}

/// Ordered, name-unique set of columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnModel {
    columns: Vec<Column>,
}

impl ColumnModel {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(ModelError::DuplicateColumn(column.name.clone()));
            }
            if column.column_type == ColumnType::Enum && column.options.is_empty() {
                return Err(ModelError::MissingOptions(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// The bar inventory table.
    pub fn inventory() -> Self {
        let categories = Category::ALL
            .iter()
            .map(|category| EnumOption::new(category.as_str()))
            .collect();
        Self {
            columns: vec![
                Column::new(IN_STOCK, "In Stock", ColumnType::Boolean),
                Column::new(CATEGORY, "Category", ColumnType::Enum).with_options(categories),
                Column::new(TYPE, "Type", ColumnType::Text),
                Column::new(BOTTLE, "Bottle", ColumnType::Text),
                Column::new(ABV, "ABV", ColumnType::Percentage),
                Column::new(
                    SIZE_ML,
                    "Size (mL)",
                    ColumnType::Volume(VolumeUnit::Milliliters),
                ),
                Column::new(
                    SIZE_OZ,
                    "Size (oz)",
                    ColumnType::Volume(VolumeUnit::FluidOunces),
                ),
                Column::new(PRICE_PAID, "Price Paid", ColumnType::Currency { decimals: 2 }),
                Column::new(COST_PER_OZ, "$/oz", ColumnType::Currency { decimals: 3 }).read_only(),
            ],
        }
    }

    /// Look up a column by name.
    ///
    /// An unknown name means the caller and the model disagree about the
    /// table's shape; callers must abort the operation on this error.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|column| column.name == name)
            .ok_or_else(|| ModelError::UnknownColumn(name.to_string()))
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn editable(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|column| column.editable)
    }
}

impl Default for ColumnModel {
    fn default() -> Self {
        Self::inventory()
    }
}
