//! Delimited text ingestion and emission for FrameOxide tables.
//!
//! # Features
//!
//! - **Reading**: split records with the `csv` crate, infer a `Cell` per
//!   field and append rows through the table's coercion rules
//! - **Writing**: emit a header and one record per row, absent slots empty
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use fo_text::{IngestOptions, EmitOptions, read_table_from_path, write_table_to_path};
//!
//! let table = read_table_from_path(Path::new("scores.csv"), &IngestOptions::default())?;
//! write_table_to_path(&table, Path::new("scores.tsv"), &EmitOptions::new().with_delimiter('\t'))?;
//! ```

mod error;
mod infer;
mod options;
mod read;
mod write;

#[cfg(test)]
mod tests;

// === Error Types ===
pub use error::{Result, TextError};

// === Configuration ===
pub use options::{EmitOptions, IngestOptions, TypeInference};

// === Reading & Writing ===
pub use infer::infer_cell;
pub use read::{read_table, read_table_from_path};
pub use write::{write_table, write_table_to_path};
