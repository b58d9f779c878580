//! Data operations for Tables

use super::*;

use std::cmp::Ordering;

/// Filter operation
pub struct Filter<'a> {
    table: &'a Table,
    mask: Vec<bool>,
}

impl<'a> Filter<'a> {
    /// Create a new filter operation
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            mask: vec![true; table.nrows()],
        }
    }

    /// Filter by column value; absent slots are passed as `None`
    pub fn by_column<F>(mut self, col: &str, predicate: F) -> Result<Self>
    where
        F: Fn(Option<&Cell>) -> bool,
    {
        let column = self
            .table
            .column(col)
            .ok_or_else(|| DataError::ColumnNotFound(col.to_string()))?;

        for (i, keep) in self.mask.iter_mut().enumerate() {
            if !predicate(column.get(i)) {
                *keep = false;
            }
        }
        Ok(self)
    }

    /// Filter by predicate on row
    pub fn by_row<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Row) -> bool,
    {
        for (i, row) in self.table.rows().enumerate() {
            if !predicate(&row) {
                self.mask[i] = false;
            }
        }
        self
    }

    /// Execute the filter
    pub fn execute(self) -> Result<Table> {
        let indices: Vec<usize> = self
            .mask
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i)
            .collect();
        self.table.take_rows(&indices)
    }
}

/// Select operation
pub struct Select<'a> {
    table: &'a Table,
    columns: Vec<String>,
}

impl<'a> Select<'a> {
    /// Create a new select operation
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
        }
    }

    /// Add columns to select
    pub fn columns<S: AsRef<str>>(mut self, cols: &[S]) -> Self {
        self.columns
            .extend(cols.iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Add a column to select
    pub fn column<S: AsRef<str>>(mut self, col: S) -> Self {
        self.columns.push(col.as_ref().to_string());
        self
    }

    /// Execute the select
    pub fn execute(self) -> Result<Table> {
        self.table.select_columns(self.columns)
    }
}

/// Arrange (sort) operation
pub struct Arrange<'a> {
    table: &'a Table,
    columns: Vec<(String, bool)>, // (column_name, ascending)
}

impl<'a> Arrange<'a> {
    /// Create a new arrange operation
    pub fn new(table: &'a Table) -> Self {
        Self {
            table,
            columns: Vec::new(),
        }
    }

    /// Add a column to sort by; earlier keys take precedence
    pub fn by<S: Into<String>>(mut self, col: S, ascending: bool) -> Self {
        self.columns.push((col.into(), ascending));
        self
    }

    /// Execute the arrange
    ///
    /// The sort is stable. Absent slots come first for an ascending key and
    /// last for a descending one.
    pub fn execute(self) -> Result<Table> {
        let keys = self
            .columns
            .iter()
            .map(|(col, ascending)| {
                self.table
                    .column(col)
                    .map(|column| (column, *ascending))
                    .ok_or_else(|| DataError::ColumnNotFound(col.clone()))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut indices: Vec<usize> = (0..self.table.nrows()).collect();

        indices.sort_by(|&a, &b| {
            for (column, ascending) in &keys {
                let cmp = compare_slots(column.get(a), column.get(b));
                if cmp != Ordering::Equal {
                    return if *ascending { cmp } else { cmp.reverse() };
                }
            }
            Ordering::Equal
        });

        self.table.take_rows(&indices)
    }
}

/// Absent sorts before any present cell
fn compare_slots(a: Option<&Cell>, b: Option<&Cell>) -> Ordering {
    a.cmp(&b)
}
