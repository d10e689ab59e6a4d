use serde_json::Value;

/// Comparison operator attached to a literal operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    /// `IS` - always resolves to the SQL NULL marker
    Is,
    /// `IS NOT` - negated form of `Is`
    IsNot,
}

impl CompareOp {
    /// The SQL operator text for the value-comparison operators.
    ///
    /// `Is`/`IsNot` never render through this; the null-semantics resolver
    /// rewrites them into `IS [NOT] NULL` predicates first.
    pub fn sql(&self) -> &'static str {
        match self {
            CompareOp::Eq | CompareOp::Is => "=",
            CompareOp::Ne | CompareOp::IsNot => "<>",
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

/// A single comparison operand as supplied by the caller.
///
/// The null sentinels are modeled as closed variants rather than magic
/// runtime constants; `AnyNull` is the OR-combination of both.
///
/// # Examples
/// ```
/// use sqlpath::ast::Operand;
/// use serde_json::json;
///
/// let literal = Operand::Value(json!("france"));
/// let ranged = Operand::Compare(sqlpath::ast::CompareOp::Gt, json!(21));
/// let absent = Operand::SqlNull;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Bare literal value, compared with equality
    Value(Value),

    /// Explicit operator plus literal value
    Compare(CompareOp, Value),

    /// JSON containment (`@>` family); dialect-capability gated
    Contains(Value),

    /// JSON key existence (`?` family); dialect-capability gated
    KeyExists(String),

    /// The SQL `NULL` marker sentinel
    SqlNull,

    /// The JSON literal `null` sentinel
    JsonNull,

    /// `SqlNull` OR `JsonNull`, rendered as two OR-ed predicates
    AnyNull,
}

/// A comparison specification: either one operand for the key's path, or the
/// nested-object surface form.
///
/// The nested form desugars into one `(path, operand)` pair per leaf; sibling
/// leaves combine with logical AND. This equivalence with the flat form is a
/// correctness invariant, not an optimization.
///
/// # Examples
/// ```
/// use sqlpath::ast::{ComparisonSpec, Operand};
/// use serde_json::json;
///
/// // meta.video.url = "x"
/// let flat = ComparisonSpec::Operand(Operand::Value(json!("x")));
/// let nested = ComparisonSpec::Nested(vec![(
///     "video".to_string(),
///     ComparisonSpec::Nested(vec![(
///         "url".to_string(),
///         ComparisonSpec::Operand(Operand::Value(json!("x"))),
///     )]),
/// )]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonSpec {
    Operand(Operand),
    Nested(Vec<(String, ComparisonSpec)>),
}
