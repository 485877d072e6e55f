use std::io::Write;

use barstock_model::{ColumnModel, Row};
use csv::WriterBuilder;

use crate::Result;

/// Writes `rows` as CSV: one header of column labels, then the raw value of
/// every declared column in model order.
pub fn write_csv<W: Write>(model: &ColumnModel, rows: &[Row], writer: W) -> Result<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(model.iter().map(|column| column.label.as_str()))?;
    for row in rows {
        out.write_record(
            model
                .iter()
                .map(|column| row.value(&column.name).as_text().into_owned()),
        )?;
    }
    out.flush().map_err(csv::Error::from)?;
    Ok(())
}
