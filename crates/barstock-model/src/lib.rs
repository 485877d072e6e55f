#![deny(unsafe_code)]

pub mod category;
pub mod column;
pub mod error;
pub mod row;

pub use category::Category;
pub use column::{Column, ColumnModel, ColumnType, EnumOption, VolumeUnit};
pub use error::{ModelError, Result};
pub use row::{CellValue, NaturalKey, Row};
