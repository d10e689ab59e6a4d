use crate::cli::CliError;
use crate::parser;

/// Parsed-key summary produced by `sqlpath check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub column: String,
    pub segments: Vec<String>,
    pub cast: Option<String>,
    pub unquote: bool,
    /// The canonical flat surface form of the key
    pub canonical: String,
}

/// Validate an attribute key and describe what it parses to.
pub fn execute_check(key: &str) -> Result<CheckResult, CliError> {
    let parsed = parser::parse(key)?;
    let segments = parsed
        .path
        .segments
        .iter()
        .map(|segment| match segment {
            crate::ast::PathSegment::Member(name) => format!("member {:?}", name),
            crate::ast::PathSegment::Index(n) => format!("index {}", n),
        })
        .collect();
    Ok(CheckResult {
        canonical: parsed.to_key(),
        column: parsed.column,
        segments,
        cast: parsed.path.cast,
        unquote: parsed.path.unquote,
    })
}
