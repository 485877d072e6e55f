//! Per-type sort, display and edit transforms.
//!
//! Display and edit representations may diverge from the stored value: a
//! boolean shows as a toggle but crosses the transport boundary as
//! `"on"`/`"off"`. This module owns that mapping so the row store only ever
//! holds canonical values.

use std::cmp::Ordering;
use std::fmt;

use barstock_model::{CellValue, Column, ColumnType, EnumOption};

use crate::number::{PERCENT_BIAS, format_fixed, round_to};
use crate::{FormatError, Result};

/// Shown for a zero percentage.
pub const EM_DASH: &str = "—";

pub const TOGGLE_ON: &str = "on";
pub const TOGGLE_OFF: &str = "off";

/// Key used to order rows by a column.
///
/// Missing values sort first. Keys of different kinds only meet when a
/// column holds malformed data; they are then ordered by kind.
#[derive(Debug, Clone)]
pub enum SortKey {
    Missing,
    Int(i64),
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Int(_) => 1,
            SortKey::Number(_) => 2,
            SortKey::Text(_) => 3,
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Int(a), SortKey::Int(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// What a cell shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Text(String),
    Toggle { checked: bool },
}

impl DisplayValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            DisplayValue::Text(text) => Some(text),
            DisplayValue::Toggle { .. } => None,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Toggle { checked: true } => f.write_str("[x]"),
            DisplayValue::Toggle { checked: false } => f.write_str("[ ]"),
        }
    }
}

/// How a cell is offered for editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditInput {
    /// Closed list; submissions must be one of the option values.
    Choice {
        options: Vec<EnumOption>,
        selected: Option<String>,
    },
    Toggle { value: &'static str },
    FreeText(String),
}

/// All three representations of one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedCell {
    pub sort: SortKey,
    pub display: DisplayValue,
    pub edit: EditInput,
}

pub fn format_cell(column: &Column, value: &CellValue) -> FormattedCell {
    FormattedCell {
        sort: sort_key(column, value),
        display: display(column, value),
        edit: edit_input(column, value),
    }
}

pub fn sort_key(column: &Column, value: &CellValue) -> SortKey {
    if value.is_missing() {
        return SortKey::Missing;
    }
    match column.column_type {
        ColumnType::Boolean => value
            .as_bool()
            .map_or(SortKey::Missing, |flag| SortKey::Int(i64::from(flag))),
        ColumnType::Enum => {
            let text = value.as_text();
            let ordinal = column
                .option_position(&text)
                .unwrap_or(column.options.len());
            SortKey::Int(ordinal as i64)
        }
        ColumnType::Text => SortKey::Text(value.as_text().into_owned()),
        ColumnType::Percentage
        | ColumnType::Volume(_)
        | ColumnType::Currency { .. }
        | ColumnType::Count => match value.as_f64() {
            Some(number) => SortKey::Number(number),
            None => SortKey::Text(value.as_text().into_owned()),
        },
    }
}

pub fn display(column: &Column, value: &CellValue) -> DisplayValue {
    if column.column_type == ColumnType::Boolean {
        return DisplayValue::Toggle {
            checked: value.as_bool().unwrap_or(false),
        };
    }
    if value.is_missing() {
        return DisplayValue::Text(String::new());
    }
    let Some(number) = value.as_f64().filter(|_| column.column_type.is_numeric()) else {
        return DisplayValue::Text(value.as_text().into_owned());
    };
    let text = match column.column_type {
        ColumnType::Percentage => format_percentage(number),
        ColumnType::Volume(unit) => {
            format!(
                "{} {}",
                format_fixed(number, unit.decimals(), None),
                unit.suffix()
            )
        }
        ColumnType::Currency { decimals } => format_currency(number, decimals),
        _ => format_fixed(number, 0, None),
    };
    DisplayValue::Text(text)
}

/// `0` renders as an em-dash; anything else gets the rounding bias and one
/// decimal.
pub fn format_percentage(value: f64) -> String {
    if value == 0.0 {
        return EM_DASH.to_string();
    }
    format!("{:.1} %", round_to(value + PERCENT_BIAS, 1))
}

pub fn format_currency(value: f64, decimals: usize) -> String {
    let digits = format_fixed(value, decimals, Some(','));
    match digits.strip_prefix('-') {
        Some(unsigned) => format!("-$ {unsigned}"),
        None => format!("$ {digits}"),
    }
}

pub fn edit_input(column: &Column, value: &CellValue) -> EditInput {
    match column.column_type {
        ColumnType::Enum => EditInput::Choice {
            options: column.options.clone(),
            selected: (!value.is_missing()).then(|| value.as_text().into_owned()),
        },
        ColumnType::Boolean => EditInput::Toggle {
            value: toggle_text(value.as_bool().unwrap_or(false)),
        },
        _ => EditInput::FreeText(edit_text(column, value)),
    }
}

pub fn toggle_text(checked: bool) -> &'static str {
    if checked { TOGGLE_ON } else { TOGGLE_OFF }
}

/// The text an editor starts from, and what a proposed edit is compared to.
pub fn edit_text(column: &Column, value: &CellValue) -> String {
    match column.column_type {
        ColumnType::Boolean => toggle_text(value.as_bool().unwrap_or(false)).to_string(),
        _ => value.as_text().into_owned(),
    }
}

/// Trims and validates operator input into the value sent to the server.
///
/// Enum input must name a declared option exactly. Boolean input is
/// normalized to the toggle's `on`/`off`.
pub fn normalize_input(column: &Column, input: &str) -> Result<String> {
    let trimmed = input.trim();
    match column.column_type {
        ColumnType::Enum => {
            if column.allows(trimmed) {
                Ok(trimmed.to_string())
            } else {
                Err(FormatError::InvalidOption {
                    column: column.name.clone(),
                    value: trimmed.to_string(),
                })
            }
        }
        ColumnType::Boolean => CellValue::text(trimmed)
            .as_bool()
            .map(|flag| toggle_text(flag).to_string())
            .ok_or_else(|| FormatError::InvalidToggle {
                column: column.name.clone(),
                value: trimmed.to_string(),
            }),
        _ => Ok(trimmed.to_string()),
    }
}

/// Returns true when normalized `input` would not change `current`.
///
/// Numeric columns compare by value so `40` and `40.0` are the same edit.
pub fn is_unchanged(column: &Column, current: &CellValue, input: &str) -> bool {
    if column.column_type.is_numeric()
        && let (Some(old), Ok(new)) = (current.as_f64(), input.parse::<f64>())
    {
        return old == new;
    }
    edit_text(column, current) == input
}
