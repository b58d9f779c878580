//! Table implementation for tabular data
//!
//! A Table is an ordered set of uniquely named dynamic columns that all
//! share one row count. Column positions are the insertion order of the
//! underlying `IndexMap`, so they stay contiguous after removals.

use super::*;

use indexmap::IndexMap;

use std::collections::HashMap;

/// Main Table structure
#[derive(Debug, Default)]
pub struct Table {
    name: String,
    pub(crate) columns: IndexMap<String, DynamicColumn>,
    pub(crate) nrows: usize,
    pub(crate) policy: CoercionPolicy,
    // Next suffix for generated column names
    unnamed: usize,
}

impl Clone for Table {
    // Column clones come back free; the copy owns its own columns
    fn clone(&self) -> Self {
        let mut columns = self.columns.clone();
        for column in columns.values_mut() {
            column.set_owned(true);
        }
        Self {
            name: self.name.clone(),
            columns,
            nrows: self.nrows,
            policy: self.policy,
            unnamed: self.unnamed,
        }
    }
}

impl Table {
    /// Create an empty Table
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the coercion policy applied to every column of the table
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.set_policy(policy);
        self
    }

    pub fn set_policy(&mut self, policy: CoercionPolicy) {
        self.policy = policy;
        for column in self.columns.values_mut() {
            column.set_policy(policy);
        }
    }

    pub fn policy(&self) -> CoercionPolicy {
        self.policy
    }

    pub(crate) fn from_parts(
        name: String,
        columns: IndexMap<String, DynamicColumn>,
        nrows: usize,
        policy: CoercionPolicy,
    ) -> Self {
        Self {
            name,
            columns,
            nrows,
            policy,
            unnamed: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Get the shape of the Table (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Whether the table holds no rows
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Get column names in position order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over `(name, column)` pairs in position order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &DynamicColumn)> {
        self.columns.iter().map(|(name, column)| (name.as_str(), column))
    }

    pub fn column(&self, name: &str) -> Option<&DynamicColumn> {
        self.columns.get(name)
    }

    pub fn column_at(&self, position: usize) -> Option<&DynamicColumn> {
        self.columns.get_index(position).map(|(_, column)| column)
    }

    /// Mutable access to a column; resizing it directly is rejected while
    /// the table owns it
    pub fn column_mut(&mut self, name: &str) -> Option<&mut DynamicColumn> {
        self.columns.get_mut(name)
    }

    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.get_index_of(name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    fn require_column(&self, name: &str) -> Result<&DynamicColumn> {
        self.columns
            .get(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Add a column at the next position
    pub fn add_column(&mut self, mut column: DynamicColumn) -> Result<usize> {
        let name = column.name().to_string();

        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn(name));
        }

        if !self.columns.is_empty() && column.len() != self.nrows {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} rows", self.nrows),
                actual: format!("{} rows", column.len()),
            });
        }

        if self.columns.is_empty() {
            self.nrows = column.len();
        }

        column.set_owned(true);
        column.set_policy(self.policy);
        let (position, _) = self.columns.insert_full(name, column);
        tracing::trace!(position, nrows = self.nrows, "added column");
        Ok(position)
    }

    /// Add a typed series as a new column
    pub fn add_series<T>(&mut self, series: &NullableSeries<T>) -> Result<usize>
    where
        T: Clone + Into<Cell>,
    {
        self.add_column(DynamicColumn::from_series(series))
    }

    /// Add a column of absent slots matching the current row count
    pub fn add_empty_column(&mut self, name: impl Into<String>) -> Result<usize> {
        let column = DynamicColumn::from_cells(name, std::iter::repeat_n(None, self.nrows));
        self.add_column(column)
    }

    /// Add an absent-filled column under a generated name (`column_0`, ...)
    pub fn add_unnamed_column(&mut self) -> Result<String> {
        let mut name = format!("column_{}", self.unnamed);
        while self.columns.contains_key(&name) {
            self.unnamed += 1;
            name = format!("column_{}", self.unnamed);
        }
        self.unnamed += 1;
        self.add_empty_column(name.clone())?;
        Ok(name)
    }

    /// Rename a column in place, keeping its position
    pub fn rename_column(&mut self, old: &str, new: impl Into<String>) -> Result<()> {
        let new = new.into();
        let position = self
            .column_position(old)
            .ok_or_else(|| DataError::ColumnNotFound(old.to_string()))?;

        if new == old {
            return Ok(());
        }
        if self.columns.contains_key(&new) {
            return Err(DataError::DuplicateColumn(new));
        }

        let (_, mut column) = self
            .columns
            .shift_remove_index(position)
            .ok_or(DataError::IndexOutOfBounds {
                index: position,
                len: self.ncols(),
            })?;
        column.rename_unchecked(new.clone());
        let (last, _) = self.columns.insert_full(new, column);
        self.columns.move_index(last, position);
        Ok(())
    }

    /// Append a row given one cell per column, in position order
    ///
    /// Cells that cannot be coerced to their column's established kind are
    /// handled by the table's `CoercionPolicy`. The row is added to every
    /// column or to none.
    pub fn add_row(&mut self, cells: Vec<Option<Cell>>) -> Result<()> {
        if cells.len() != self.ncols() {
            return Err(DataError::RowSizeMismatch {
                expected: self.ncols(),
                actual: cells.len(),
            });
        }
        if self.columns.is_empty() {
            return Err(DataError::InvalidParameter(
                "cannot add a row to a table without columns".to_string(),
            ));
        }

        let reconciled = self
            .columns
            .values()
            .zip(cells)
            .map(|(column, cell)| column.reconcile(cell))
            .collect::<Result<Vec<_>>>()?;

        self.push_row(reconciled);
        Ok(())
    }

    /// Append a row given cells keyed by column name
    pub fn add_named_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = (S, Option<Cell>)>,
        S: Into<String>,
    {
        let mut by_name: HashMap<String, Option<Cell>> = cells
            .into_iter()
            .map(|(name, cell)| (name.into(), cell))
            .collect();

        if by_name.len() != self.ncols() {
            return Err(DataError::RowSizeMismatch {
                expected: self.ncols(),
                actual: by_name.len(),
            });
        }

        let mut ordered = Vec::with_capacity(self.ncols());
        for name in self.columns.keys() {
            match by_name.remove(name) {
                Some(cell) => ordered.push(cell),
                None => return Err(DataError::RowColumnMismatch(name.clone())),
            }
        }

        self.add_row(ordered)
    }

    fn push_row(&mut self, cells: Vec<Option<Cell>>) {
        for (column, cell) in self.columns.values_mut().zip(cells) {
            column.push_reconciled(cell);
        }
        self.nrows += 1;
    }

    /// Insert a row before position `idx`
    pub fn insert_row(&mut self, idx: usize, cells: Vec<Option<Cell>>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(DataError::InvalidParameter(
                "cannot insert a row into a table without columns".to_string(),
            ));
        }
        if idx > self.nrows {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.nrows,
            });
        }
        if cells.len() != self.ncols() {
            return Err(DataError::RowSizeMismatch {
                expected: self.ncols(),
                actual: cells.len(),
            });
        }

        let reconciled = self
            .columns
            .values()
            .zip(cells)
            .map(|(column, cell)| column.reconcile(cell))
            .collect::<Result<Vec<_>>>()?;

        for (column, cell) in self.columns.values_mut().zip(reconciled) {
            column.insert_reconciled(idx, cell);
        }
        self.nrows += 1;
        Ok(())
    }

    /// Remove row `idx` from every column, returning its cells
    pub fn remove_row(&mut self, idx: usize) -> Result<Vec<Option<Cell>>> {
        if idx >= self.nrows {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.nrows,
            });
        }

        let removed = self
            .columns
            .values_mut()
            .map(|column| column.remove_row(idx))
            .collect();
        self.nrows -= 1;
        Ok(removed)
    }

    /// Remove a column by name; later columns shift down one position
    pub fn remove_column(&mut self, name: &str) -> Result<DynamicColumn> {
        let column = self
            .columns
            .shift_remove(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
        Ok(self.release(column))
    }

    /// Remove a column by position
    pub fn remove_column_at(&mut self, position: usize) -> Result<DynamicColumn> {
        let (_, column) =
            self.columns
                .shift_remove_index(position)
                .ok_or(DataError::IndexOutOfBounds {
                    index: position,
                    len: self.ncols(),
                })?;
        Ok(self.release(column))
    }

    fn release(&mut self, mut column: DynamicColumn) -> DynamicColumn {
        if self.columns.is_empty() {
            self.nrows = 0;
        }
        column.set_owned(false);
        column
    }

    /// Copy the named columns, in the given order, into a new table
    pub fn select_columns<I, S>(&self, names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = self.builder();

        for name in names.into_iter() {
            let column = self.require_column(name.as_ref())?;
            builder = builder.with_column(column.detached())?;
        }

        builder.build()
    }

    /// Copy the columns at the given positions into a new table
    pub fn select_columns_at<I>(&self, positions: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut builder = self.builder();

        for position in positions.into_iter() {
            let column = self
                .column_at(position)
                .ok_or(DataError::IndexOutOfBounds {
                    index: position,
                    len: self.ncols(),
                })?;
            builder = builder.with_column(column.detached())?;
        }

        builder.build()
    }

    /// Keep the rows for which `predicate` holds
    pub fn filter_rows<F>(&self, predicate: F) -> Result<Self>
    where
        F: Fn(&Row) -> bool,
    {
        let indices: Vec<usize> = self
            .rows()
            .filter(|row| predicate(row))
            .map(|row| row.index())
            .collect();

        self.take_rows(&indices)
    }

    /// Stable sort of the rows by one column
    pub fn sort_by(&self, name: &str, ascending: bool) -> Result<Self> {
        Arrange::new(self).by(name, ascending).execute()
    }

    /// Build a new table from the rows at `indices`, in that order
    pub fn take_rows(&self, indices: &[usize]) -> Result<Self> {
        for &idx in indices {
            if idx >= self.nrows {
                return Err(DataError::IndexOutOfBounds {
                    index: idx,
                    len: self.nrows,
                });
            }
        }

        let mut builder = self.builder();

        for column in self.columns.values() {
            builder = builder.with_column(column.take(indices)?)?;
        }

        builder.build()
    }

    /// Set present cells of one column that fail `predicate` to absent
    pub fn mask_column<F>(&mut self, name: &str, predicate: F) -> Result<usize>
    where
        F: Fn(&Cell) -> bool,
    {
        let column = self
            .columns
            .get_mut(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))?;
        Ok(column.mask(predicate))
    }

    /// Fill absent slots with each column's kind default
    pub fn fill_all_absent_with_default(&mut self) -> usize {
        self.columns
            .values_mut()
            .map(DynamicColumn::fill_absent_with_default)
            .sum()
    }

    /// Fill absent slots with one value per column, in position order
    pub fn fill_all_absent_with(&mut self, values: &[Cell]) -> Result<usize> {
        if values.len() != self.ncols() {
            return Err(DataError::DimensionMismatch {
                expected: format!("{} fill values", self.ncols()),
                actual: format!("{} fill values", values.len()),
            });
        }

        let reconciled = self
            .columns
            .values()
            .zip(values)
            .map(|(column, value)| column.reconcile(Some(value.clone())))
            .collect::<Result<Vec<_>>>()?;

        let mut filled = 0;
        for (column, value) in self.columns.values_mut().zip(reconciled) {
            if let Some(value) = value {
                filled += column.fill_absent(value)?;
            }
        }
        Ok(filled)
    }

    /// Get a row as a Row view
    pub fn get_row(&self, idx: usize) -> Result<Row<'_>> {
        if idx >= self.nrows {
            return Err(DataError::IndexOutOfBounds {
                index: idx,
                len: self.nrows,
            });
        }

        Ok(Row {
            table: self,
            row_idx: idx,
        })
    }

    /// Iterate over rows
    pub fn rows(&self) -> RowIter<'_> {
        RowIter {
            table: self,
            current: 0,
        }
    }

    /// An empty builder carrying this table's name and policy
    pub(crate) fn builder(&self) -> TableBuilder {
        TableBuilder::new()
            .with_name(self.name.clone())
            .with_policy(self.policy)
    }
}

/// Row view into a Table
#[derive(Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    row_idx: usize,
}

impl<'a> Row<'a> {
    /// Position of the row in its table
    pub fn index(&self) -> usize {
        self.row_idx
    }

    /// Get a cell by column name; `Ok(None)` when absent
    pub fn get(&self, col: &str) -> Result<Option<&'a Cell>> {
        match self.table.columns.get(col) {
            Some(column) => Ok(column.get(self.row_idx)),
            None => Err(DataError::ColumnNotFound(col.to_string())),
        }
    }

    /// Get a cell by column position
    pub fn get_at(&self, position: usize) -> Option<&'a Cell> {
        self.table
            .column_at(position)
            .and_then(|column| column.get(self.row_idx))
    }

    /// All cells in position order
    pub fn cells(&self) -> Vec<Option<&'a Cell>> {
        self.table
            .columns
            .values()
            .map(|column| column.get(self.row_idx))
            .collect()
    }

    /// Get value as float
    pub fn get_float(&self, col: &str) -> Result<Option<f64>> {
        Ok(self.get(col)?.and_then(Cell::as_f64))
    }

    /// Get value as integer
    pub fn get_int(&self, col: &str) -> Result<Option<i64>> {
        match self.get(col)? {
            Some(Cell::Int(v)) => Ok(Some(*v)),
            Some(Cell::Bool(v)) => Ok(Some(i64::from(*v))),
            _ => Ok(None),
        }
    }

    /// Get value as boolean
    pub fn get_bool(&self, col: &str) -> Result<Option<bool>> {
        match self.get(col)? {
            Some(Cell::Bool(v)) => Ok(Some(*v)),
            _ => Ok(None),
        }
    }

    /// Get value as string
    pub fn get_str(&self, col: &str) -> Result<Option<&'a str>> {
        Ok(self.get(col)?.and_then(Cell::as_str))
    }
}

/// Iterator over rows
pub struct RowIter<'a> {
    table: &'a Table,
    current: usize,
}

impl<'a> Iterator for RowIter<'a> {
    type Item = Row<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.table.nrows {
            let row = Row {
                table: self.table,
                row_idx: self.current,
            };
            self.current += 1;
            Some(row)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Table({} rows × {} cols)", self.nrows, self.ncols())
    }
}
