//! Terminal tables for the inventory and its column model.

use barstock_format::{DisplayValue, display};
use barstock_model::{Column, ColumnModel, ColumnType, Row};
use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

/// Glyphs for the In Stock toggle.
pub const CHECKED: &str = "✓";
pub const UNCHECKED: &str = "✗";

/// Inventory rows as a table, one line per `(store index, row)` pair.
///
/// The first column is the store index that `edit` and `delete` take.
pub fn inventory_table<'a>(
    model: &ColumnModel,
    rows: impl IntoIterator<Item = (usize, &'a Row)>,
) -> Table {
    let mut table = Table::new();
    let mut header = vec![header_cell("#")];
    header.extend(model.iter().map(|column| header_cell(&column.label)));
    table.set_header(header);
    apply_inventory_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (position, column) in model.iter().enumerate() {
        align_column(&mut table, position + 1, column_alignment(column));
    }

    for (index, row) in rows {
        let mut cells = vec![dim_cell(index)];
        cells.extend(model.iter().map(|column| value_cell(column, row)));
        table.add_row(cells);
    }
    table
}

/// The declared columns with their type, editability and options.
pub fn columns_table(model: &ColumnModel) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Label"),
        header_cell("Type"),
        header_cell("Editable"),
        header_cell("Options"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Center);
    for column in model.iter() {
        let options = column
            .options
            .iter()
            .map(|option| option.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![
            Cell::new(&column.name).fg(Color::Blue),
            Cell::new(&column.label),
            Cell::new(column.column_type),
            if column.editable {
                Cell::new(CHECKED).fg(Color::Green)
            } else {
                dim_cell("-")
            },
            dim_cell(options),
        ]);
    }
    table
}

/// Plain text of every cell in `row`, in model order.
pub fn row_text(model: &ColumnModel, row: &Row) -> Vec<String> {
    model
        .iter()
        .map(|column| cell_text(&display(column, row.value(&column.name))))
        .collect()
}

pub fn cell_text(value: &DisplayValue) -> String {
    match value {
        DisplayValue::Toggle { checked: true } => CHECKED.to_string(),
        DisplayValue::Toggle { checked: false } => UNCHECKED.to_string(),
        DisplayValue::Text(text) => text.clone(),
    }
}

fn value_cell(column: &Column, row: &Row) -> Cell {
    let value = display(column, row.value(&column.name));
    let text = cell_text(&value);
    match value {
        DisplayValue::Toggle { checked: true } => Cell::new(text).fg(Color::Green),
        DisplayValue::Toggle { checked: false } => Cell::new(text).fg(Color::Red),
        DisplayValue::Text(_) if !column.editable => dim_cell(text),
        DisplayValue::Text(_) if column.is_identity() => {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
        DisplayValue::Text(_) => Cell::new(text),
    }
}

fn column_alignment(column: &Column) -> CellAlignment {
    match column.column_type {
        ColumnType::Boolean => CellAlignment::Center,
        column_type if column_type.is_numeric() => CellAlignment::Right,
        _ => CellAlignment::Left,
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_inventory_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
