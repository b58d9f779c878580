//! Reader and writer configuration

use fo_core::CoercionPolicy;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TextError};

/// Order in which a field's type is guessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeInference {
    /// Float, then integer, then boolean, then text
    #[default]
    FloatFirst,
    /// Integer, then float, then boolean, then text
    Narrowest,
}

/// How delimited text is turned into a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    pub delimiter: char,
    /// First record names the columns
    pub has_header: bool,
    pub inference: TypeInference,
    /// Applied to the ingested table's columns
    pub policy: CoercionPolicy,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            has_header: true,
            inference: TypeInference::default(),
            policy: CoercionPolicy::default(),
        }
    }
}

impl IngestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    pub fn with_inference(mut self, inference: TypeInference) -> Self {
        self.inference = inference;
        self
    }

    pub fn with_policy(mut self, policy: CoercionPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// How a table is written as delimited text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    pub delimiter: char,
    /// Write the column names as the first record
    pub write_header: bool,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            write_header: true,
        }
    }
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_header(mut self, write_header: bool) -> Self {
        self.write_header = write_header;
        self
    }
}

/// The delimiter as the single byte the csv crate expects
pub(crate) fn delimiter_byte(delimiter: char) -> Result<u8> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(TextError::InvalidDelimiter(delimiter))
    }
}
