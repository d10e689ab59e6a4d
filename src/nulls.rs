//! Null-semantics resolution.
//!
//! A JSON column can hold the JSON literal `null`, and the row can hold the
//! SQL `NULL` marker; the two compare differently and must never be conflated.
//! This module classifies each top-level operand into one of those two
//! absences or a concrete literal, driven by the global stringification mode.
//! Nulls nested inside a composite literal are untouched here; the value
//! stringifier always renders them as JSON `null` text.

use serde_json::Value;

use crate::ast::{CompareOp, Operand};
use crate::compiler::CompileError;

/// Process-wide null stringification mode, threaded through every compilation
/// call as an explicit parameter (never ambient state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalNullMode {
    /// A bare top-level null literal is treated as the SQL `NULL` marker
    ImplicitSql,

    /// A bare top-level null literal is a hard compile error; only the
    /// explicit sentinels are accepted
    Explicit,
}

impl std::str::FromStr for GlobalNullMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sql" => Ok(GlobalNullMode::ImplicitSql),
            "explicit" => Ok(GlobalNullMode::Explicit),
            other => Err(format!(
                "unknown null mode '{}' (expected 'sql' or 'explicit')",
                other
            )),
        }
    }
}

/// Which absence a resolved null predicate tests for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullBehavior {
    /// The SQL `NULL` marker: `IS [NOT] NULL`
    Sql,

    /// The JSON literal `null`: equality against the bound text `null`
    Json,

    /// Either absence: the two predicates OR-ed together
    Either,
}

/// A classified operand, ready for the dialect compiler.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedOperand {
    Null { behavior: NullBehavior, negated: bool },
    Literal { op: CompareOp, value: Value },
    Contains(Value),
    KeyExists(String),
}

/// Classify a top-level operand under the given mode.
///
/// The `IS` family always means the SQL marker. A bare null literal (or
/// equality against one) follows the mode: `ImplicitSql` reads it as the SQL
/// marker, `Explicit` rejects it. Ordering operators applied to a null
/// literal are rejected in both modes; ordering against absence has no
/// meaningful rendering.
pub fn resolve_operand(
    operand: &Operand,
    mode: GlobalNullMode,
) -> Result<ResolvedOperand, CompileError> {
    match operand {
        Operand::SqlNull => Ok(ResolvedOperand::Null {
            behavior: NullBehavior::Sql,
            negated: false,
        }),
        Operand::JsonNull => Ok(ResolvedOperand::Null {
            behavior: NullBehavior::Json,
            negated: false,
        }),
        Operand::AnyNull => Ok(ResolvedOperand::Null {
            behavior: NullBehavior::Either,
            negated: false,
        }),
        Operand::Contains(value) => Ok(ResolvedOperand::Contains(value.clone())),
        Operand::KeyExists(key) => Ok(ResolvedOperand::KeyExists(key.clone())),
        Operand::Compare(op @ (CompareOp::Is | CompareOp::IsNot), _) => {
            Ok(ResolvedOperand::Null {
                behavior: NullBehavior::Sql,
                negated: *op == CompareOp::IsNot,
            })
        }
        Operand::Value(Value::Null) => resolve_bare_null(CompareOp::Eq, mode),
        Operand::Compare(op @ (CompareOp::Eq | CompareOp::Ne), Value::Null) => {
            resolve_bare_null(*op, mode)
        }
        Operand::Compare(_, Value::Null) => Err(CompileError::AmbiguousNull),
        Operand::Value(value) => Ok(ResolvedOperand::Literal {
            op: CompareOp::Eq,
            value: value.clone(),
        }),
        Operand::Compare(op, value) => Ok(ResolvedOperand::Literal {
            op: *op,
            value: value.clone(),
        }),
    }
}

fn resolve_bare_null(op: CompareOp, mode: GlobalNullMode) -> Result<ResolvedOperand, CompileError> {
    match mode {
        GlobalNullMode::ImplicitSql => Ok(ResolvedOperand::Null {
            behavior: NullBehavior::Sql,
            negated: op == CompareOp::Ne,
        }),
        GlobalNullMode::Explicit => Err(CompileError::AmbiguousNull),
    }
}
