// ---------------------------------------------------------------------------
// ParamsError: errors raised while loading or validating parameter tables
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading engine parameter tables.
///
/// Simulation calls never return these; they only surface when a driver
/// replaces the built-in tables with its own.
#[derive(Debug)]
pub enum ParamsError {
    /// I/O error reading a parameter file.
    Io(std::io::Error),
    /// The parameter document is not valid JSON for the expected shape.
    Parse(String),
    /// A set of blend weights does not sum to one.
    InvalidWeights { table: String, sum: f64 },
    /// A fraction or rate lies outside its documented range.
    OutOfRange { field: String, value: f64 },
    /// A table that must have at least one row is empty.
    EmptyTable { table: String },
}

impl fmt::Display for ParamsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamsError::Io(e) => write!(f, "I/O error: {e}"),
            ParamsError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ParamsError::InvalidWeights { table, sum } => {
                write!(f, "Weights in '{table}' sum to {sum:.4}, expected 1.0")
            }
            ParamsError::OutOfRange { field, value } => {
                write!(f, "Value {value} for '{field}' is out of range")
            }
            ParamsError::EmptyTable { table } => write!(f, "Table '{table}' is empty"),
        }
    }
}

impl std::error::Error for ParamsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParamsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ParamsError {
    fn from(e: std::io::Error) -> Self {
        ParamsError::Io(e)
    }
}

impl From<serde_json::Error> for ParamsError {
    fn from(e: serde_json::Error) -> Self {
        ParamsError::Parse(e.to_string())
    }
}

/// Tolerance used when checking that weights sum to one.
pub(crate) const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

pub(crate) fn check_unit(field: &str, value: f64) -> Result<(), ParamsError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<(), ParamsError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ParamsError::OutOfRange {
            field: field.to_string(),
            value,
        })
    }
}

pub(crate) fn check_weight_sum(table: &str, weights: &[f64]) -> Result<(), ParamsError> {
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() <= WEIGHT_SUM_TOLERANCE {
        Ok(())
    } else {
        Err(ParamsError::InvalidWeights {
            table: table.to_string(),
            sum,
        })
    }
}
