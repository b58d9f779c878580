//! Delimited text to `Table`

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use fo_core::{Cell, Table};

use crate::error::{Result, TextError};
use crate::infer::infer_cell;
use crate::options::{IngestOptions, delimiter_byte};

/// Read a table from delimited text
///
/// With a header, the first record names the columns and a record with more
/// fields fails with `TextError::RowTooWide`. Without one, columns are added
/// under generated names as wider records appear. Short records are padded
/// with absent slots.
pub fn read_table<R: Read>(reader: R, options: &IngestOptions) -> Result<Table> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(options.delimiter)?)
        // Headers are handled here so unnamed columns can be generated
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut table = Table::new().with_policy(options.policy);
    let mut record = StringRecord::new();
    let mut record_index: u64 = 0;

    if options.has_header {
        if !csv_reader.read_record(&mut record)? {
            return Ok(table);
        }
        record_index += 1;
        for name in record.iter() {
            table.add_empty_column(name)?;
        }
    }

    while csv_reader.read_record(&mut record)? {
        record_index += 1;

        if record.len() > table.ncols() {
            if options.has_header {
                return Err(TextError::RowTooWide {
                    record: record_index,
                    expected: table.ncols(),
                    actual: record.len(),
                });
            }
            while table.ncols() < record.len() {
                table.add_unnamed_column()?;
            }
        }

        let mut cells: Vec<Option<Cell>> = record
            .iter()
            .map(|field| infer_cell(field, options.inference))
            .collect();
        cells.resize(table.ncols(), None);
        table.add_row(cells)?;
    }

    tracing::debug!(
        rows = table.nrows(),
        columns = table.ncols(),
        records = record_index,
        "read delimited table"
    );

    Ok(table)
}

/// Read a table from a delimited text file
pub fn read_table_from_path(path: &Path, options: &IngestOptions) -> Result<Table> {
    let file = File::open(path).map_err(|source| TextError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "reading delimited table");
    read_table(file, options)
}
