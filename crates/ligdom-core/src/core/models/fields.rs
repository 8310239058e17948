use std::fmt;
use thiserror::Error;

/// The type a raw text field was expected to coerce into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
        }
    }
}

/// A record field that could not be coerced into its typed representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' is not a valid {expected} (value: '{value}')")]
pub struct MalformedRecord {
    pub field: &'static str,
    pub value: String,
    pub expected: FieldKind,
}

pub(crate) fn parse_int(field: &'static str, raw: &str) -> Result<isize, MalformedRecord> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| MalformedRecord {
        field,
        value: trimmed.to_string(),
        expected: FieldKind::Integer,
    })
}

pub(crate) fn parse_float(field: &'static str, raw: &str) -> Result<f64, MalformedRecord> {
    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| MalformedRecord {
        field,
        value: trimmed.to_string(),
        expected: FieldKind::Float,
    })
}
