//! FrameOxide core
//!
//! In-memory column-oriented tables with per-column nullability, a
//! mixed-type cell representation, descriptive statistics and a
//! grouping/aggregation engine.

pub mod data;

pub use data::{
    AggregateOp, Cell, CellKind, CoercionPolicy, DataError, DynamicColumn, GroupAggregation,
    NullableSeries, Numeric, Result, Table, TableBuilder,
};
