//! Builder pattern for constructing Tables

use indexmap::IndexMap;

use super::*;

/// Builder for creating Tables
#[derive(Debug, Default)]
pub struct TableBuilder {
    name: String,
    columns: IndexMap<String, DynamicColumn>,
    nrows: Option<usize>,
    policy: CoercionPolicy,
}

impl TableBuilder {
    /// Create a new TableBuilder
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Policy handed to every column of the built table
    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Add a column to the Table
    pub fn with_column(mut self, column: DynamicColumn) -> Result<Self> {
        let name = column.name().to_string();

        if self.columns.contains_key(&name) {
            return Err(DataError::DuplicateColumn(name));
        }

        // Check dimension consistency
        match self.nrows {
            Some(n) if column.len() != n => {
                return Err(DataError::DimensionMismatch {
                    expected: format!("{} rows", n),
                    actual: format!("{} rows", column.len()),
                });
            }
            None => {
                self.nrows = Some(column.len());
            }
            _ => {}
        }

        self.columns.insert(name, column);
        Ok(self)
    }

    /// Add a typed series as a column
    pub fn with_series<T>(self, series: &NullableSeries<T>) -> Result<Self>
    where
        T: Clone + Into<Cell>,
    {
        self.with_column(DynamicColumn::from_series(series))
    }

    /// Build the Table
    pub fn build(mut self) -> Result<Table> {
        let nrows = self.nrows.unwrap_or(0);

        for column in self.columns.values_mut() {
            column.set_owned(true);
            column.set_policy(self.policy);
        }

        Ok(Table::from_parts(self.name, self.columns, nrows, self.policy))
    }
}
