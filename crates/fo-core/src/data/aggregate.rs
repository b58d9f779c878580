//! Column-wise aggregation over a whole table

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::*;

/// Per-column statistic computed by `Table::aggregate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AggregateOp {
    Min,
    Max,
    Mean,
    Std,
    Var,
    Median,
    CountNull,
    #[serde(rename = "nunique")]
    NUnique,
}

impl AggregateOp {
    /// The operations `Table::describe` reports
    pub const DESCRIBE: [AggregateOp; 6] = [
        AggregateOp::Mean,
        AggregateOp::Std,
        AggregateOp::Var,
        AggregateOp::Min,
        AggregateOp::Max,
        AggregateOp::Median,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Mean => "mean",
            AggregateOp::Std => "std",
            AggregateOp::Var => "var",
            AggregateOp::Median => "median",
            AggregateOp::CountNull => "countNull",
            AggregateOp::NUnique => "nunique",
        }
    }

    /// Apply to one column; never fails, NaN stands in for missing numbers
    pub fn apply(&self, column: &DynamicColumn) -> Cell {
        match self {
            AggregateOp::Min => column.min().unwrap_or(Cell::Float(f64::NAN)),
            AggregateOp::Max => column.max().unwrap_or(Cell::Float(f64::NAN)),
            AggregateOp::Mean => Cell::Float(column.mean()),
            AggregateOp::Std => Cell::Float(column.sample_std()),
            AggregateOp::Var => Cell::Float(column.sample_var()),
            AggregateOp::Median => Cell::Float(column.median()),
            AggregateOp::CountNull => Cell::Int(column.count_absent() as i64),
            AggregateOp::NUnique => Cell::Int(column.count_distinct() as i64),
        }
    }
}

impl fmt::Display for AggregateOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggregateOp {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "min" => Ok(AggregateOp::Min),
            "max" => Ok(AggregateOp::Max),
            "mean" => Ok(AggregateOp::Mean),
            "std" => Ok(AggregateOp::Std),
            "var" => Ok(AggregateOp::Var),
            "median" => Ok(AggregateOp::Median),
            "countNull" => Ok(AggregateOp::CountNull),
            "nunique" => Ok(AggregateOp::NUnique),
            other => Err(DataError::InvalidParameter(format!(
                "unsupported aggregate operation: {other}"
            ))),
        }
    }
}

/// Column name → (operation → result), both in request order
pub type AggregateResult = IndexMap<String, IndexMap<AggregateOp, Cell>>;

impl Table {
    /// Compute every operation in `ops` for every column
    pub fn aggregate(&self, ops: &[AggregateOp]) -> AggregateResult {
        tracing::trace!(columns = self.ncols(), ops = ops.len(), "aggregating table");

        self.columns()
            .map(|(name, column)| {
                let results: IndexMap<AggregateOp, Cell> =
                    ops.iter().map(|op| (*op, op.apply(column))).collect();
                (name.to_string(), results)
            })
            .collect()
    }

    /// `aggregate` with operations given by name
    pub fn aggregate_by_name<S: AsRef<str>>(&self, ops: &[S]) -> Result<AggregateResult> {
        let ops = ops
            .iter()
            .map(|op| op.as_ref().parse())
            .collect::<Result<Vec<AggregateOp>>>()?;
        Ok(self.aggregate(&ops))
    }

    /// Mean, standard deviation, variance, min, max and median per column
    pub fn describe(&self) -> AggregateResult {
        self.aggregate(&AggregateOp::DESCRIBE)
    }

    pub fn min(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Min])
    }

    pub fn max(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Max])
    }

    pub fn mean(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Mean])
    }

    pub fn std(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Std])
    }

    pub fn var(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Var])
    }

    pub fn median(&self) -> AggregateResult {
        self.aggregate(&[AggregateOp::Median])
    }
}
