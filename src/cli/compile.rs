use serde_json::Value;

use crate::ast::{CompareOp, ComparisonSpec, Operand};
use crate::cli::CliError;
use crate::compiler::{self, Fragment};
use crate::dialect::Dialect;
use crate::nulls::GlobalNullMode;

/// Options for `sqlpath compile`.
#[derive(Debug, Clone)]
pub struct CompileOptions {
    pub key: String,
    /// JSON text of the comparison value, if any
    pub value: Option<String>,
    /// Operator name (`eq`, `ne`, `gt`, ...); defaults to equality
    pub operator: Option<String>,
    pub sql_null: bool,
    pub json_null: bool,
    pub dialect: Dialect,
    pub null_mode: GlobalNullMode,
    /// Compile an assignment value expression instead of a predicate
    pub assign: bool,
}

/// Named operators accepted on the command line.
pub fn parse_operator(name: &str) -> Option<CompareOp> {
    match name {
        "eq" => Some(CompareOp::Eq),
        "ne" => Some(CompareOp::Ne),
        "gt" => Some(CompareOp::Gt),
        "gte" => Some(CompareOp::Gte),
        "lt" => Some(CompareOp::Lt),
        "lte" => Some(CompareOp::Lte),
        "is" => Some(CompareOp::Is),
        "isnot" => Some(CompareOp::IsNot),
        _ => None,
    }
}

fn build_operand(options: &CompileOptions) -> Result<Operand, CliError> {
    // Sentinel flags take priority; both together mean "either null".
    if options.sql_null && options.json_null {
        return Ok(Operand::AnyNull);
    }
    if options.sql_null {
        return Ok(Operand::SqlNull);
    }
    if options.json_null {
        return Ok(Operand::JsonNull);
    }

    let text = options.value.as_ref().ok_or(CliError::NoValue)?;
    let value: Value = serde_json::from_str(text)?;

    match options.operator.as_deref() {
        None => Ok(Operand::Value(value)),
        Some("contains") => Ok(Operand::Contains(value)),
        Some("keyexists") => match value {
            Value::String(key) => Ok(Operand::KeyExists(key)),
            other => Ok(Operand::KeyExists(other.to_string())),
        },
        Some(name) => {
            let op = parse_operator(name).ok_or_else(|| CliError::UnknownOperator(name.to_string()))?;
            Ok(Operand::Compare(op, value))
        }
    }
}

/// Compile a predicate (or assignment value) for the given options.
pub fn execute_compile(options: &CompileOptions) -> Result<Fragment, CliError> {
    let operand = build_operand(options)?;
    let fragment = if options.assign {
        compiler::compile_assignment(&operand, options.dialect, options.null_mode)?
    } else {
        compiler::compile_comparison(
            &options.key,
            &ComparisonSpec::Operand(operand),
            options.dialect,
            options.null_mode,
        )?
    };
    Ok(fragment)
}
