//! Dialect compilation of parsed paths and resolved operands into SQL
//! expression fragments.
//!
//! Fragments carry positional placeholders plus the bound parameter values in
//! emission order; callers bind positionally. Literal comparison values are
//! always bound, never spliced into the SQL text. Only path segments and
//! identifiers, which come from the parsed grammar, are embedded (escaped)
//! in the text.

use serde_json::Value;

use crate::ast::{CompareOp, ComparisonSpec, Operand, ParsedPath, PathSegment};
use crate::dialect::{Dialect, ExtractionStyle};
use crate::nulls::{GlobalNullMode, NullBehavior, ResolvedOperand, resolve_operand};
use crate::parser::{self, ParseError};
use crate::stringify;

/// Errors produced while compiling a fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    /// Lexing or parsing of the attribute key failed
    MalformedPath(ParseError),

    /// A bare top-level null literal under the explicit null mode
    AmbiguousNull,

    /// The active dialect lacks a requested operator family
    UnsupportedCapability {
        dialect: &'static str,
        capability: &'static str,
    },

    /// A cast tag outside the active dialect's cast table
    InvalidCastTarget {
        dialect: &'static str,
        cast: String,
    },
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::MalformedPath(e) => write!(f, "malformed path: {}", e),
            CompileError::AmbiguousNull => write!(
                f,
                "ambiguous null: a bare null requires an explicit SQL_NULL or JSON_NULL sentinel"
            ),
            CompileError::UnsupportedCapability {
                dialect,
                capability,
            } => write!(f, "{} does not support {}", dialect, capability),
            CompileError::InvalidCastTarget { dialect, cast } => {
                write!(f, "unknown cast target '{}' for {}", cast, dialect)
            }
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::MalformedPath(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::MalformedPath(e)
    }
}

/// A compiled SQL expression fragment.
///
/// `params` preserves the order in which placeholders were emitted into
/// `sql`. A `Value::Null` parameter is a SQL NULL bind (assignments only); a
/// bound JSON `null` comparison is always the three-character text `null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Compile a WHERE-style comparison for a JSON attribute key.
///
/// The key's leading segment names the column. Nested-object specifications
/// flatten to one predicate per leaf, joined with AND; the `AnyNull` sentinel
/// joins its two predicates with OR inside a single leaf.
pub fn compile_comparison(
    key: &str,
    spec: &ComparisonSpec,
    dialect: Dialect,
    mode: GlobalNullMode,
) -> Result<Fragment, CompileError> {
    let (column, leaves) = parser::flatten_spec(key, spec)?;
    let column_sql = dialect.quote_ident(&column);

    let mut parts = Vec::with_capacity(leaves.len());
    let mut params = Vec::new();
    for (path, operand) in &leaves {
        let resolved = resolve_operand(operand, mode)?;
        parts.push(compile_leaf(&column_sql, path, &resolved, dialect, &mut params)?);
    }
    Ok(Fragment {
        sql: parts.join(" AND "),
        params,
    })
}

/// Compile the value expression of a top-level column assignment.
///
/// Assignments always emit a bound value rather than a predicate. Structured
/// values are JSON-encoded whole, which renders any nested nulls as JSON
/// `null` text regardless of the global mode.
pub fn compile_assignment(
    operand: &Operand,
    dialect: Dialect,
    mode: GlobalNullMode,
) -> Result<Fragment, CompileError> {
    let param = match operand {
        Operand::Value(Value::Null) => match mode {
            GlobalNullMode::ImplicitSql => Value::Null,
            GlobalNullMode::Explicit => return Err(CompileError::AmbiguousNull),
        },
        Operand::Value(value) => Value::String(stringify::to_json_text(value)),
        Operand::SqlNull => Value::Null,
        Operand::JsonNull => Value::String(stringify::json_null_text().to_string()),
        Operand::AnyNull | Operand::Compare(..) | Operand::Contains(_) | Operand::KeyExists(_) => {
            return Err(CompileError::UnsupportedCapability {
                dialect: dialect.name(),
                capability: "non-value operands in assignments",
            });
        }
    };
    Ok(Fragment {
        sql: dialect.placeholder(1),
        params: vec![param],
    })
}

/// Render the bare extraction expression for a key, modifiers applied.
///
/// This is the column-side half of a predicate, useful for SELECT lists and
/// ORDER BY clauses built by the caller.
pub fn path_expression(key: &str, dialect: Dialect) -> Result<String, CompileError> {
    let parsed = parser::parse(key)?;
    let column_sql = dialect.quote_ident(&parsed.column);
    let path = &parsed.path;

    if let Some(tag) = &path.cast {
        check_cast(dialect, tag)?;
        let inner = extraction_expr(&column_sql, &path.segments, dialect, true);
        return Ok(format!("CAST({} AS {})", inner, tag));
    }
    Ok(extraction_expr(
        &column_sql,
        &path.segments,
        dialect,
        path.unquote,
    ))
}

fn check_cast(dialect: Dialect, tag: &str) -> Result<(), CompileError> {
    if dialect.supports_cast(tag) {
        Ok(())
    } else {
        Err(CompileError::InvalidCastTarget {
            dialect: dialect.name(),
            cast: tag.to_string(),
        })
    }
}

fn push_param(dialect: Dialect, params: &mut Vec<Value>, value: Value) -> String {
    let placeholder = dialect.placeholder(params.len() + 1);
    params.push(value);
    placeholder
}

fn sql_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}

/// PostgreSQL text-array literal for the `#>`/`#>>` operators, e.g.
/// `'{"address","country"}'`. Member elements are always quoted; indexes
/// stay bare digits.
fn pg_path_literal(segments: &[PathSegment]) -> String {
    let mut elements = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            PathSegment::Member(name) => {
                let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
                elements.push(format!("\"{}\"", escaped));
            }
            PathSegment::Index(n) => elements.push(n.to_string()),
        }
    }
    sql_quote(&format!("{{{}}}", elements.join(",")))
}

/// JSON path string for the function-style extractors, e.g. `'$."a"[0]'`.
/// Members are always quoted so separator characters in names stay literal.
fn json_path_string(segments: &[PathSegment]) -> String {
    let mut path = String::from("$");
    for segment in segments {
        match segment {
            PathSegment::Member(name) => {
                let escaped = name.replace('\\', "\\\\").replace('"', "\\\"");
                path.push_str(&format!(".\"{}\"", escaped));
            }
            PathSegment::Index(n) => path.push_str(&format!("[{}]", n)),
        }
    }
    sql_quote(&path)
}

/// Build the dialect's extraction expression over the segments.
///
/// `as_text` selects the unquoting variant where the dialect has one. The
/// empty path is the column itself.
fn extraction_expr(
    column_sql: &str,
    segments: &[PathSegment],
    dialect: Dialect,
    as_text: bool,
) -> String {
    if segments.is_empty() {
        return column_sql.to_string();
    }
    match dialect.capabilities().extraction {
        ExtractionStyle::ArrowOps => {
            if segments.len() == 1 {
                // The single-step operator reads better for one step; the
                // path-array form takes over beyond that.
                let op = if as_text { "->>" } else { "->" };
                match &segments[0] {
                    PathSegment::Member(name) => {
                        format!("{}{}{}", column_sql, op, sql_quote(name))
                    }
                    PathSegment::Index(n) => format!("{}{}{}", column_sql, op, n),
                }
            } else {
                let op = if as_text { "#>>" } else { "#>" };
                format!("{}{}{}", column_sql, op, pg_path_literal(segments))
            }
        }
        ExtractionStyle::ExtractFunction => {
            let inner = format!(
                "json_extract({},{})",
                column_sql,
                json_path_string(segments)
            );
            if as_text {
                format!("json_unquote({})", inner)
            } else {
                inner
            }
        }
        ExtractionStyle::ExtractUnquoted => format!(
            "json_extract({},{})",
            column_sql,
            json_path_string(segments)
        ),
        ExtractionStyle::JsonValue => {
            let function = if as_text { "JSON_VALUE" } else { "JSON_QUERY" };
            format!("{}({},{})", function, column_sql, json_path_string(segments))
        }
    }
}

fn json_type_expr(column_sql: &str, segments: &[PathSegment]) -> String {
    if segments.is_empty() {
        format!("json_type({})", column_sql)
    } else {
        format!("json_type({},{})", column_sql, json_path_string(segments))
    }
}

/// The extraction used for `IS [NOT] NULL` tests. MSSQL needs `JSON_VALUE`
/// here: `JSON_QUERY` is NULL for present scalars. SQLite needs `json_type`:
/// its `json_extract` collapses a JSON `null` member to SQL NULL, while
/// `json_type` is NULL only when the path is missing.
fn null_test_expr(column_sql: &str, segments: &[PathSegment], dialect: Dialect) -> String {
    match dialect.capabilities().extraction {
        ExtractionStyle::JsonValue => extraction_expr(column_sql, segments, dialect, true),
        ExtractionStyle::ExtractUnquoted if !segments.is_empty() => {
            json_type_expr(column_sql, segments)
        }
        _ => extraction_expr(column_sql, segments, dialect, false),
    }
}

fn compile_leaf(
    column_sql: &str,
    path: &ParsedPath,
    resolved: &ResolvedOperand,
    dialect: Dialect,
    params: &mut Vec<Value>,
) -> Result<String, CompileError> {
    // An unknown tag is a compile error even when the predicate form ends up
    // not consuming the cast.
    if let Some(tag) = &path.cast {
        check_cast(dialect, tag)?;
    }

    match resolved {
        ResolvedOperand::Null { behavior, negated } => {
            compile_null_predicate(column_sql, path, *behavior, *negated, dialect, params)
        }
        ResolvedOperand::Literal { op, value } => {
            compile_literal_predicate(column_sql, path, *op, value, dialect, params)
        }
        ResolvedOperand::Contains(value) => {
            if !dialect.capabilities().containment {
                return Err(CompileError::UnsupportedCapability {
                    dialect: dialect.name(),
                    capability: "containment predicates",
                });
            }
            let expr = extraction_expr(column_sql, &path.segments, dialect, false);
            let placeholder = push_param(
                dialect,
                params,
                Value::String(stringify::to_json_text(value)),
            );
            Ok(format!("{} @> CAST({} AS JSONB)", expr, placeholder))
        }
        ResolvedOperand::KeyExists(key) => {
            if !dialect.capabilities().key_existence {
                return Err(CompileError::UnsupportedCapability {
                    dialect: dialect.name(),
                    capability: "key existence predicates",
                });
            }
            let expr = extraction_expr(column_sql, &path.segments, dialect, false);
            let placeholder = push_param(dialect, params, Value::String(key.clone()));
            Ok(format!("{} ? {}", expr, placeholder))
        }
    }
}

fn compile_null_predicate(
    column_sql: &str,
    path: &ParsedPath,
    behavior: NullBehavior,
    negated: bool,
    dialect: Dialect,
    params: &mut Vec<Value>,
) -> Result<String, CompileError> {
    match behavior {
        NullBehavior::Sql => Ok(sql_null_predicate(column_sql, path, negated, dialect)),
        NullBehavior::Json => json_null_predicate(column_sql, path, negated, dialect, params),
        NullBehavior::Either => {
            // Positive form ORs the two absences; the negation of "either
            // absent" is "both present", so the negated form ANDs them.
            let sql_part = sql_null_predicate(column_sql, path, negated, dialect);
            let json_part = json_null_predicate(column_sql, path, negated, dialect, params)?;
            let joiner = if negated { " AND " } else { " OR " };
            Ok(format!("({}{}{})", sql_part, joiner, json_part))
        }
    }
}

fn sql_null_predicate(
    column_sql: &str,
    path: &ParsedPath,
    negated: bool,
    dialect: Dialect,
) -> String {
    let expr = null_test_expr(column_sql, &path.segments, dialect);
    let test = if negated { "IS NOT NULL" } else { "IS NULL" };
    format!("{} {}", expr, test)
}

/// Equality against the JSON literal `null`.
///
/// This must go through the document-typed extraction (never the unquoting
/// one) so that a JSON *string* `"null"` stays quoted and cannot collide with
/// the bound three-character text.
fn json_null_predicate(
    column_sql: &str,
    path: &ParsedPath,
    negated: bool,
    dialect: Dialect,
    params: &mut Vec<Value>,
) -> Result<String, CompileError> {
    let caps = dialect.capabilities();
    if !caps.distinguishes_json_null {
        return Err(CompileError::UnsupportedCapability {
            dialect: dialect.name(),
            capability: "json null comparisons",
        });
    }
    let op = if negated { "<>" } else { "=" };
    let null_text = Value::String(stringify::json_null_text().to_string());

    match caps.extraction {
        ExtractionStyle::ExtractUnquoted => {
            // json_extract collapses JSON null to SQL NULL here, so the test
            // goes through json_type instead.
            let expr = json_type_expr(column_sql, &path.segments);
            let placeholder = push_param(dialect, params, null_text);
            Ok(format!("{} {} {}", expr, op, placeholder))
        }
        _ => {
            let expr = extraction_expr(column_sql, &path.segments, dialect, false);
            let placeholder = push_param(dialect, params, null_text);
            Ok(format!(
                "{} {} {}",
                expr,
                op,
                typed_json_param(dialect, &placeholder)
            ))
        }
    }
}

/// Wrap a bound JSON text parameter in the dialect's typed-JSON cast when the
/// column type requires it for comparison.
fn typed_json_param(dialect: Dialect, placeholder: &str) -> String {
    let caps = dialect.capabilities();
    if !caps.binary_json_comparable {
        return placeholder.to_string();
    }
    match caps.extraction {
        ExtractionStyle::ArrowOps => format!("CAST({} AS JSONB)", placeholder),
        _ => format!("CAST({} AS JSON)", placeholder),
    }
}

fn compile_literal_predicate(
    column_sql: &str,
    path: &ParsedPath,
    op: CompareOp,
    value: &Value,
    dialect: Dialect,
    params: &mut Vec<Value>,
) -> Result<String, CompileError> {
    let caps = dialect.capabilities();

    // Cast comparisons: extract as text, cast, bind the native value so the
    // driver types the parameter to match the cast target.
    if let Some(tag) = &path.cast {
        let inner = extraction_expr(column_sql, &path.segments, dialect, true);
        let expr = format!("CAST({} AS {})", inner, tag);
        let placeholder = push_param(dialect, params, value.clone());
        return Ok(format!("{} {} {}", expr, op.sql(), placeholder));
    }

    // Unquoted comparisons: text extraction against the raw string form.
    // Composites always bind their JSON text; unquoting only affects scalars.
    if path.unquote {
        let expr = extraction_expr(column_sql, &path.segments, dialect, true);
        let param = if stringify::is_composite(value) {
            Value::String(stringify::to_json_text(value))
        } else {
            match caps.extraction {
                ExtractionStyle::ExtractUnquoted => value.clone(),
                _ => Value::String(stringify::unquoted_text(value)),
            }
        };
        let placeholder = push_param(dialect, params, param);
        return Ok(format!("{} {} {}", expr, op.sql(), placeholder));
    }

    // Document-typed comparison against the JSON-stringified bind.
    match caps.extraction {
        ExtractionStyle::ExtractUnquoted => {
            let expr = extraction_expr(column_sql, &path.segments, dialect, false);
            let param = if path.segments.is_empty() || stringify::is_composite(value) {
                Value::String(stringify::to_json_text(value))
            } else {
                value.clone()
            };
            let placeholder = push_param(dialect, params, param);
            Ok(format!("{} {} {}", expr, op.sql(), placeholder))
        }
        ExtractionStyle::JsonValue => {
            let composite = stringify::is_composite(value);
            let expr = extraction_expr(column_sql, &path.segments, dialect, !composite);
            let param = if path.segments.is_empty() || composite {
                Value::String(stringify::to_json_text(value))
            } else {
                Value::String(stringify::unquoted_text(value))
            };
            let placeholder = push_param(dialect, params, param);
            Ok(format!("{} {} {}", expr, op.sql(), placeholder))
        }
        _ => {
            let expr = extraction_expr(column_sql, &path.segments, dialect, false);
            let placeholder = push_param(
                dialect,
                params,
                Value::String(stringify::to_json_text(value)),
            );
            Ok(format!(
                "{} {} {}",
                expr,
                op.sql(),
                typed_json_param(dialect, &placeholder)
            ))
        }
    }
}
