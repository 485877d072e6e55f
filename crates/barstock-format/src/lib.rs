//! Cell formatting for the inventory table.
//!
//! Every function here is pure: a column description and a raw value in,
//! a sort key, display value or edit representation out.

#![deny(unsafe_code)]

pub mod cell;
pub mod error;
pub mod number;

pub use cell::{
    DisplayValue, EditInput, FormattedCell, SortKey, display, edit_input, edit_text, format_cell,
    format_currency, format_percentage, is_unchanged, normalize_input, sort_key, toggle_text,
};
pub use error::{FormatError, Result};
