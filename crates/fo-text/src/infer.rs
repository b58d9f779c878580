//! Per-field type inference

use fo_core::Cell;

use crate::options::TypeInference;

/// Guess the cell for one raw field; an empty field is absent
pub fn infer_cell(field: &str, inference: TypeInference) -> Option<Cell> {
    if field.is_empty() {
        return None;
    }

    let numeric = match inference {
        TypeInference::FloatFirst => parse_float(field).or_else(|| parse_int(field)),
        TypeInference::Narrowest => parse_int(field).or_else(|| parse_float(field)),
    };

    Some(
        numeric
            .or_else(|| parse_bool(field))
            .unwrap_or_else(|| Cell::Text(field.to_string())),
    )
}

fn parse_float(field: &str) -> Option<Cell> {
    field.parse::<f64>().ok().map(Cell::Float)
}

fn parse_int(field: &str) -> Option<Cell> {
    field.parse::<i64>().ok().map(Cell::Int)
}

fn parse_bool(field: &str) -> Option<Cell> {
    match field {
        "true" => Some(Cell::Bool(true)),
        "false" => Some(Cell::Bool(false)),
        _ => None,
    }
}
