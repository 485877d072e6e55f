use barstock_cli::render::{CHECKED, UNCHECKED, columns_table, inventory_table, row_text};
use barstock_model::column::{
    ABV, BOTTLE, CATEGORY, COST_PER_OZ, IN_STOCK, PRICE_PAID, SIZE_ML, SIZE_OZ, TYPE,
};
use barstock_model::{ColumnModel, Row};

fn rye() -> Row {
    Row::new()
        .with(IN_STOCK, true)
        .with(CATEGORY, "Spirit")
        .with(TYPE, "Rye Whiskey")
        .with(BOTTLE, "Rittenhouse")
        .with(ABV, 50.0)
        .with(SIZE_ML, 750.0)
        .with(SIZE_OZ, 25.4)
        .with(PRICE_PAID, 27.99)
        .with(COST_PER_OZ, 1.1037)
}

fn lime() -> Row {
    Row::new()
        .with(IN_STOCK, false)
        .with(CATEGORY, "Juice")
        .with(TYPE, "Lime Juice")
        .with(BOTTLE, "Fresh")
        .with(ABV, 0.0)
}

#[test]
fn row_text_follows_formatter() {
    let model = ColumnModel::inventory();
    insta::assert_debug_snapshot!(row_text(&model, &rye()), @r#"
    [
        "✓",
        "Spirit",
        "Rye Whiskey",
        "Rittenhouse",
        "50.0 %",
        "750 mL",
        "25.4 oz",
        "$ 27.99",
        "$ 1.104",
    ]
    "#);
}

#[test]
fn zero_abv_and_missing_numbers() {
    let model = ColumnModel::inventory();
    let text = row_text(&model, &lime());
    assert_eq!(text[0], UNCHECKED);
    assert_eq!(text[4], "—");
    assert!(text[5..].iter().all(String::is_empty));
}

#[test]
fn inventory_table_lists_index_and_labels() {
    let model = ColumnModel::inventory();
    let rows = [rye(), lime()];
    let mut table = inventory_table(&model, [(1, &rows[1]), (0, &rows[0])]);
    let rendered = table.to_string();

    assert_eq!(table.column_count(), model.len() + 1);
    for column in model.iter() {
        assert!(rendered.contains(&column.label), "missing {}", column.label);
    }
    assert!(rendered.contains(CHECKED));
    assert!(rendered.contains("Rittenhouse"));
    // Rows keep the order they were given in.
    let lime_at = rendered.find("Lime Juice").unwrap();
    let rye_at = rendered.find("Rye Whiskey").unwrap();
    assert!(lime_at < rye_at);
}

#[test]
fn columns_table_marks_read_only() {
    let model = ColumnModel::inventory();
    let rendered = columns_table(&model).to_string();
    let cost_line = rendered
        .lines()
        .find(|line| line.contains(COST_PER_OZ))
        .unwrap();
    assert!(!cost_line.contains(CHECKED));
    let category_line = rendered
        .lines()
        .find(|line| line.contains(CATEGORY) && line.contains("Enum"))
        .unwrap();
    assert!(category_line.contains(CHECKED));
}
