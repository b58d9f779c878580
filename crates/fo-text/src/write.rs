//! `Table` to delimited text

use std::fs::File;
use std::io::Write;
use std::path::Path;

use fo_core::Table;

use crate::error::{Result, TextError};
use crate::options::{EmitOptions, delimiter_byte};

/// Write a table as delimited text, one record per row
///
/// Cells are written in their display form and absent slots as empty fields.
pub fn write_table<W: Write>(table: &Table, writer: W, options: &EmitOptions) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        .from_writer(writer);

    if options.write_header && table.ncols() > 0 {
        csv_writer.write_record(table.column_names())?;
    }

    for row in table.rows() {
        let fields = row
            .cells()
            .into_iter()
            .map(|cell| cell.map(ToString::to_string).unwrap_or_default());
        csv_writer.write_record(fields)?;
    }

    csv_writer.flush().map_err(csv::Error::from)?;

    tracing::debug!(
        rows = table.nrows(),
        columns = table.ncols(),
        "wrote delimited table"
    );

    Ok(())
}

/// Write a table to a delimited text file, replacing any existing file
pub fn write_table_to_path(table: &Table, path: &Path, options: &EmitOptions) -> Result<()> {
    let file = File::create(path).map_err(|source| TextError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "writing delimited table");
    write_table(table, file, options)
}
