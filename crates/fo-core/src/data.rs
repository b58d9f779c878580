//! Core data structures for FrameOxide
//!
//! This module provides nullable homogeneous series, the mixed-type `Cell`
//! union, soft-schema columns and the tables built from them, together with
//! the statistics and grouping engine that reads them.

mod aggregate;
mod builder;
mod cell;
mod column;
mod group;
mod ops;
mod series;
mod stats;
mod table;
mod traits;


// Re-exports
pub use aggregate::{AggregateOp, AggregateResult};
pub use builder::TableBuilder;
pub use cell::{Cell, CellKind};
pub use column::{CoercionPolicy, DynamicColumn};
pub use group::GroupAggregation;
pub use ops::{Arrange, Filter, Select};
pub use series::NullableSeries;
pub use table::{Row, RowIter, Table};
pub use traits::Numeric;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum DataError {
    #[error("Series '{0}' is empty")]
    EmptySeries(String),

    #[error("Series '{0}' has no present values")]
    NoPresentValues(String),

    #[error("Index out of bounds: index {index}, length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Row size mismatch: expected {expected} cells, got {actual}")]
    RowSizeMismatch { expected: usize, actual: usize },

    #[error("Row has no entry for column '{0}'")]
    RowColumnMismatch(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Series '{0}' is owned by a table and cannot be resized directly")]
    OwnershipViolation(String),

    #[error("Column '{column}' holds {expected} values, got {actual}")]
    TypeMismatch {
        column: String,
        expected: CellKind,
        actual: CellKind,
    },
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
