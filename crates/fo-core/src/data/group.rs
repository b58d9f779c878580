//! Group-by over a key column

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::*;

/// How the non-key columns of each group are reduced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupAggregation {
    /// Float sum of the numeric cells; present text makes it NaN
    Sum,
    /// Int count of present cells
    Count,
    /// Float mean of the present cells; NaN for an all-absent group
    Mean,
}

impl GroupAggregation {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupAggregation::Sum => "sum",
            GroupAggregation::Count => "count",
            GroupAggregation::Mean => "mean",
        }
    }

    fn reduce<'a, I>(&self, cells: I) -> Cell
    where
        I: Iterator<Item = &'a Cell>,
    {
        let mut count = 0usize;
        let mut sum = 0.0;
        for cell in cells {
            count += 1;
            sum += cell.as_f64().unwrap_or(f64::NAN);
        }

        match self {
            GroupAggregation::Sum => Cell::Float(sum),
            GroupAggregation::Count => Cell::Int(count as i64),
            GroupAggregation::Mean if count == 0 => Cell::Float(f64::NAN),
            GroupAggregation::Mean => Cell::Float(sum / count as f64),
        }
    }
}

impl fmt::Display for GroupAggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupAggregation {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(GroupAggregation::Sum),
            "count" => Ok(GroupAggregation::Count),
            "mean" => Ok(GroupAggregation::Mean),
            other => Err(DataError::InvalidParameter(format!(
                "unsupported group aggregation: {other}"
            ))),
        }
    }
}

impl Table {
    /// Partition rows by the value of `key` and reduce every other column
    /// per group
    ///
    /// The result has one row per distinct present key, in `Cell` order, and
    /// the same columns minus the key. Rows with an absent key are skipped.
    pub fn group_by(&self, key: &str, aggregation: GroupAggregation) -> Result<Table> {
        let key_column = self
            .column(key)
            .ok_or_else(|| DataError::ColumnNotFound(key.to_string()))?;

        let mut groups: BTreeMap<&Cell, Vec<usize>> = BTreeMap::new();
        for (idx, slot) in key_column.values().iter().enumerate() {
            if let Some(cell) = slot {
                groups.entry(cell).or_default().push(idx);
            }
        }

        tracing::debug!(
            key,
            aggregation = %aggregation,
            groups = groups.len(),
            "grouping table"
        );

        let mut builder = self.builder();

        for (name, column) in self.columns().filter(|(name, _)| *name != key) {
            let cells = groups.values().map(|rows| {
                let present = rows.iter().filter_map(|&row| column.get(row));
                Some(aggregation.reduce(present))
            });
            builder = builder.with_column(DynamicColumn::from_cells(name, cells))?;
        }

        builder.build()
    }
}
