//! CLI support for sqlpath
//!
//! Provides programmatic access to sqlpath CLI functionality for embedding
//! in other tools.

mod check;
mod compile;

pub use check::{CheckResult, execute_check};
pub use compile::{CompileOptions, execute_compile, parse_operator};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Key parse error
    Parse(crate::ParseError),
    /// Fragment compile error
    Compile(crate::CompileError),
    /// Comparison value is not valid JSON
    Json(serde_json::Error),
    /// IO error
    Io(io::Error),
    /// No comparison value provided
    NoValue,
    /// Unknown comparison operator name
    UnknownOperator(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Parse(e) => write!(f, "Parse error: {}", e),
            CliError::Compile(e) => write!(f, "Compile error: {}", e),
            CliError::Json(e) => write!(f, "Invalid JSON value: {}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
            CliError::NoValue => {
                write!(f, "No comparison value provided. Use --value, a sentinel flag, or pipe JSON to stdin.")
            }
            CliError::UnknownOperator(op) => {
                write!(f, "Unknown operator: '{}'\nExpected one of: eq, ne, gt, gte, lt, lte, is, isnot, contains, keyexists.", op)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Parse(e) => Some(e),
            CliError::Compile(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::CompileError> for CliError {
    fn from(e: crate::CompileError) -> Self {
        CliError::Compile(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        CliError::Io(e)
    }
}
