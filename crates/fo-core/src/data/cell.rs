//! Mixed-type cell values
//!
//! A `Cell` holds exactly one of the four primitive kinds a table column can
//! store. Cells are totally ordered (kind first, then value) so they can act
//! as sort and grouping keys even when a column mixes kinds.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Discriminant of a `Cell`, in canonical sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Int,
    Float,
    Bool,
    Text,
}

impl CellKind {
    /// Check if the kind has a numeric interpretation
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellKind::Int | CellKind::Float | CellKind::Bool)
    }
}

impl fmt::Display for CellKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellKind::Int => write!(f, "int64"),
            CellKind::Float => write!(f, "float64"),
            CellKind::Bool => write!(f, "bool"),
            CellKind::Text => write!(f, "string"),
        }
    }
}

/// One heterogeneous value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Cell {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
}

impl Cell {
    pub fn kind(&self) -> CellKind {
        match self {
            Cell::Int(_) => CellKind::Int,
            Cell::Float(_) => CellKind::Float,
            Cell::Bool(_) => CellKind::Bool,
            Cell::Text(_) => CellKind::Text,
        }
    }

    pub fn is_numeric(&self) -> bool {
        self.kind().is_numeric()
    }

    /// Numeric interpretation: booleans count as 0/1, text has none
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Int(v) => Some(*v as f64),
            Cell::Float(v) => Some(*v),
            Cell::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            Cell::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(v) => Some(v),
            _ => None,
        }
    }

    /// The fill value used for absent slots of a column of `kind`
    pub fn default_for(kind: CellKind) -> Cell {
        match kind {
            CellKind::Int => Cell::Int(0),
            CellKind::Float => Cell::Float(0.0),
            CellKind::Bool => Cell::Bool(false),
            CellKind::Text => Cell::Text(String::new()),
        }
    }

    /// View this value as `target`, if the conversion is permitted.
    ///
    /// Int and Bool widen to Float, Bool widens to Int (`true` is 1).
    /// Nothing narrows, and nothing converts to or from Text.
    pub fn coerce_to(&self, target: CellKind) -> Option<Cell> {
        match (self, target) {
            (cell, kind) if cell.kind() == kind => Some(cell.clone()),
            (Cell::Int(v), CellKind::Float) => Some(Cell::Float(*v as f64)),
            (Cell::Bool(v), CellKind::Float) => Some(Cell::Float(if *v { 1.0 } else { 0.0 })),
            (Cell::Bool(v), CellKind::Int) => Some(Cell::Int(i64::from(*v))),
            _ => None,
        }
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cell {}

impl PartialOrd for Cell {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cell {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Cell::Int(a), Cell::Int(b)) => a.cmp(b),
            (Cell::Float(a), Cell::Float(b)) => OrderedFloat(*a).cmp(&OrderedFloat(*b)),
            (Cell::Bool(a), Cell::Bool(b)) => a.cmp(b),
            (Cell::Text(a), Cell::Text(b)) => a.cmp(b),
            (a, b) => a.kind().cmp(&b.kind()),
        }
    }
}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        match self {
            Cell::Int(v) => v.hash(state),
            Cell::Float(v) => OrderedFloat(*v).hash(state),
            Cell::Bool(v) => v.hash(state),
            Cell::Text(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{}", v),
            Cell::Bool(v) => write!(f, "{}", v),
            Cell::Text(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Int(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<u32> for Cell {
    fn from(value: u32) -> Self {
        Cell::Int(i64::from(value))
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Float(value)
    }
}

impl From<f32> for Cell {
    fn from(value: f32) -> Self {
        Cell::Float(f64::from(value))
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_order_is_total() {
        let mut cells = vec![
            Cell::from("b"),
            Cell::Bool(true),
            Cell::Float(2.5),
            Cell::Int(7),
            Cell::Float(f64::NAN),
            Cell::Int(-1),
        ];
        cells.sort();

        assert_eq!(cells[0], Cell::Int(-1));
        assert_eq!(cells[1], Cell::Int(7));
        assert_eq!(cells[2], Cell::Float(2.5));
        assert!(matches!(cells[3], Cell::Float(v) if v.is_nan()));
        assert_eq!(cells[4], Cell::Bool(true));
        assert_eq!(cells[5], Cell::from("b"));
    }

    #[test]
    fn test_equality_is_tag_and_value() {
        assert_ne!(Cell::Int(1), Cell::Float(1.0));
        assert_ne!(Cell::Int(1), Cell::Bool(true));
        assert_eq!(Cell::Float(f64::NAN), Cell::Float(f64::NAN));
    }

    #[test]
    fn test_coercions() {
        assert_eq!(Cell::Int(3).coerce_to(CellKind::Float), Some(Cell::Float(3.0)));
        assert_eq!(Cell::Bool(true).coerce_to(CellKind::Float), Some(Cell::Float(1.0)));
        assert_eq!(Cell::Bool(true).coerce_to(CellKind::Int), Some(Cell::Int(1)));
        assert_eq!(Cell::Int(1).coerce_to(CellKind::Bool), None);
        assert_eq!(Cell::Float(1.0).coerce_to(CellKind::Int), None);
        assert_eq!(Cell::from("1").coerce_to(CellKind::Int), None);
        assert_eq!(Cell::Int(1).coerce_to(CellKind::Text), None);
        assert_eq!(Cell::from("x").coerce_to(CellKind::Text), Some(Cell::from("x")));
    }

    #[test]
    fn test_numeric_interpretation() {
        assert_eq!(Cell::Bool(false).as_f64(), Some(0.0));
        assert_eq!(Cell::Int(4).as_f64(), Some(4.0));
        assert_eq!(Cell::from("4").as_f64(), None);
        assert_eq!(Cell::default_for(CellKind::Text), Cell::from(""));
    }
}
