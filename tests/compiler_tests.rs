// tests/compiler_tests.rs

use serde_json::json;
use sqlpath::ast::{CompareOp, ComparisonSpec, Operand};
use sqlpath::compiler::{CompileError, compile_comparison, path_expression};
use sqlpath::nulls::GlobalNullMode;
use sqlpath::Dialect;

fn compile(key: &str, operand: Operand, dialect: Dialect) -> sqlpath::Fragment {
    compile_comparison(
        key,
        &ComparisonSpec::Operand(operand),
        dialect,
        GlobalNullMode::ImplicitSql,
    )
    .unwrap()
}

// ============================================================================
// PostgreSQL
// ============================================================================

#[test]
fn test_pg_single_step_uses_arrow() {
    let fragment = compile("meta.role", Operand::Value(json!("admin")), Dialect::Postgres);
    assert_eq!(fragment.sql, "\"meta\"->'role' = CAST($1 AS JSONB)");
    assert_eq!(fragment.params, vec![json!("\"admin\"")]);
}

#[test]
fn test_pg_multi_step_prefers_path_array() {
    let fragment = compile(
        "jsonAttribute.address.country",
        Operand::Value(json!("france")),
        Dialect::Postgres,
    );
    assert_eq!(
        fragment.sql,
        "\"jsonAttribute\"#>'{\"address\",\"country\"}' = CAST($1 AS JSONB)"
    );
    assert_eq!(fragment.params, vec![json!("\"france\"")]);
}

#[test]
fn test_pg_index_stays_bare_in_path_array() {
    let fragment = compile(
        "gameData.passwords[0]",
        Operand::Value(json!("secret")),
        Dialect::Postgres,
    );
    assert_eq!(
        fragment.sql,
        "\"gameData\"#>'{\"passwords\",0}' = CAST($1 AS JSONB)"
    );
}

#[test]
fn test_pg_single_index_uses_arrow() {
    let fragment = compile("gameData[0]", Operand::Value(json!(1)), Dialect::Postgres);
    assert_eq!(fragment.sql, "\"gameData\"->0 = CAST($1 AS JSONB)");
    assert_eq!(fragment.params, vec![json!("1")]);
}

#[test]
fn test_pg_unquote_compares_raw_string() {
    let fragment = compile(
        "jsonAddress.country:unquote",
        Operand::Value(json!("france")),
        Dialect::Postgres,
    );
    assert_eq!(fragment.sql, "\"jsonAddress\"->>'country' = $1");
    assert_eq!(fragment.params, vec![json!("france")]);
}

#[test]
fn test_pg_cast_wraps_text_extraction() {
    let fragment = compile(
        "jsonAttribute.age::integer",
        Operand::Compare(CompareOp::Gt, json!(21)),
        Dialect::Postgres,
    );
    assert_eq!(
        fragment.sql,
        "CAST(\"jsonAttribute\"->>'age' AS integer) > $1"
    );
    assert_eq!(fragment.params, vec![json!(21)]);
}

#[test]
fn test_pg_column_itself() {
    let fragment = compile("meta", Operand::Value(json!({"a": 1})), Dialect::Postgres);
    assert_eq!(fragment.sql, "\"meta\" = CAST($1 AS JSONB)");
    assert_eq!(fragment.params, vec![json!("{\"a\":1}")]);
}

#[test]
fn test_pg_containment() {
    let fragment = compile(
        "meta.tags",
        Operand::Contains(json!(["a"])),
        Dialect::Postgres,
    );
    assert_eq!(fragment.sql, "\"meta\"->'tags' @> CAST($1 AS JSONB)");
    assert_eq!(fragment.params, vec![json!("[\"a\"]")]);
}

#[test]
fn test_pg_key_existence() {
    let fragment = compile(
        "meta",
        Operand::KeyExists("video".to_string()),
        Dialect::Postgres,
    );
    assert_eq!(fragment.sql, "\"meta\" ? $1");
    assert_eq!(fragment.params, vec![json!("video")]);
}

#[test]
fn test_pg_quoted_member_escaping() {
    let fragment = compile(
        "col.\"it's\"",
        Operand::Value(json!(1)),
        Dialect::Postgres,
    );
    assert_eq!(fragment.sql, "\"col\"->'it''s' = CAST($1 AS JSONB)");
}

// ============================================================================
// MySQL / MariaDB
// ============================================================================

#[test]
fn test_mysql_extract_with_typed_param() {
    let fragment = compile(
        "meta.video.url",
        Operand::Value(json!("x")),
        Dialect::MySql,
    );
    assert_eq!(
        fragment.sql,
        "json_extract(`meta`,'$.\"video\".\"url\"') = CAST(? AS JSON)"
    );
    assert_eq!(fragment.params, vec![json!("\"x\"")]);
}

#[test]
fn test_mysql_unquote() {
    let fragment = compile(
        "meta.name:unquote",
        Operand::Value(json!("Ann")),
        Dialect::MySql,
    );
    assert_eq!(
        fragment.sql,
        "json_unquote(json_extract(`meta`,'$.\"name\"')) = ?"
    );
    assert_eq!(fragment.params, vec![json!("Ann")]);
}

#[test]
fn test_mysql_cast() {
    let fragment = compile(
        "meta.age::signed",
        Operand::Compare(CompareOp::Gt, json!(21)),
        Dialect::MySql,
    );
    assert_eq!(
        fragment.sql,
        "CAST(json_unquote(json_extract(`meta`,'$.\"age\"')) AS signed) > ?"
    );
    assert_eq!(fragment.params, vec![json!(21)]);
}

#[test]
fn test_mariadb_compares_json_text_directly() {
    let fragment = compile(
        "meta.video.url",
        Operand::Value(json!("x")),
        Dialect::MariaDb,
    );
    assert_eq!(fragment.sql, "json_extract(`meta`,'$.\"video\".\"url\"') = ?");
    assert_eq!(fragment.params, vec![json!("\"x\"")]);
}

#[test]
fn test_mariadb_rejects_json_cast_tag() {
    let result = compile_comparison(
        "meta.cfg::json",
        &ComparisonSpec::Operand(Operand::Value(json!(1))),
        Dialect::MariaDb,
        GlobalNullMode::ImplicitSql,
    );
    assert_eq!(
        result,
        Err(CompileError::InvalidCastTarget {
            dialect: "mariadb",
            cast: "json".to_string()
        })
    );
}

// ============================================================================
// SQLite
// ============================================================================

#[test]
fn test_sqlite_scalar_binds_natively() {
    let fragment = compile("meta.age", Operand::Value(json!(31)), Dialect::Sqlite);
    assert_eq!(fragment.sql, "json_extract(\"meta\",'$.\"age\"') = ?");
    assert_eq!(fragment.params, vec![json!(31)]);
}

#[test]
fn test_sqlite_composite_binds_json_text() {
    let fragment = compile(
        "meta.cfg",
        Operand::Value(json!({"a": 1})),
        Dialect::Sqlite,
    );
    assert_eq!(fragment.sql, "json_extract(\"meta\",'$.\"cfg\"') = ?");
    assert_eq!(fragment.params, vec![json!("{\"a\":1}")]);
}

#[test]
fn test_sqlite_unquote_composite_binds_json_text() {
    let fragment = compile(
        "meta.cfg:unquote",
        Operand::Value(json!({"a": 1})),
        Dialect::Sqlite,
    );
    assert_eq!(fragment.sql, "json_extract(\"meta\",'$.\"cfg\"') = ?");
    assert_eq!(fragment.params, vec![json!("{\"a\":1}")]);
}

#[test]
fn test_sqlite_cast() {
    let fragment = compile(
        "meta.age::integer",
        Operand::Compare(CompareOp::Gte, json!(18)),
        Dialect::Sqlite,
    );
    assert_eq!(
        fragment.sql,
        "CAST(json_extract(\"meta\",'$.\"age\"') AS integer) >= ?"
    );
}

// ============================================================================
// MSSQL
// ============================================================================

#[test]
fn test_mssql_scalar_uses_json_value() {
    let fragment = compile("meta.name", Operand::Value(json!("Ann")), Dialect::Mssql);
    assert_eq!(fragment.sql, "JSON_VALUE([meta],'$.\"name\"') = @p1");
    assert_eq!(fragment.params, vec![json!("Ann")]);
}

#[test]
fn test_mssql_number_binds_text_form() {
    let fragment = compile("meta.age", Operand::Value(json!(31)), Dialect::Mssql);
    assert_eq!(fragment.sql, "JSON_VALUE([meta],'$.\"age\"') = @p1");
    assert_eq!(fragment.params, vec![json!("31")]);
}

#[test]
fn test_mssql_composite_uses_json_query() {
    let fragment = compile(
        "meta.cfg",
        Operand::Value(json!({"a": 1})),
        Dialect::Mssql,
    );
    assert_eq!(fragment.sql, "JSON_QUERY([meta],'$.\"cfg\"') = @p1");
    assert_eq!(fragment.params, vec![json!("{\"a\":1}")]);
}

#[test]
fn test_mssql_cast() {
    let fragment = compile(
        "meta.age::int",
        Operand::Compare(CompareOp::Lt, json!(65)),
        Dialect::Mssql,
    );
    assert_eq!(
        fragment.sql,
        "CAST(JSON_VALUE([meta],'$.\"age\"') AS int) < @p1"
    );
}

#[test]
fn test_mssql_lacks_containment_and_existence() {
    let contains = compile_comparison(
        "meta.tags",
        &ComparisonSpec::Operand(Operand::Contains(json!(["a"]))),
        Dialect::Mssql,
        GlobalNullMode::ImplicitSql,
    );
    assert_eq!(
        contains,
        Err(CompileError::UnsupportedCapability {
            dialect: "mssql",
            capability: "containment predicates"
        })
    );

    let exists = compile_comparison(
        "meta",
        &ComparisonSpec::Operand(Operand::KeyExists("video".to_string())),
        Dialect::Mssql,
        GlobalNullMode::ImplicitSql,
    );
    assert_eq!(
        exists,
        Err(CompileError::UnsupportedCapability {
            dialect: "mssql",
            capability: "key existence predicates"
        })
    );
}

// ============================================================================
// Cross-Dialect Behavior
// ============================================================================

#[test]
fn test_invalid_cast_target_per_dialect() {
    let result = compile_comparison(
        "meta.age::sideways",
        &ComparisonSpec::Operand(Operand::Value(json!(1))),
        Dialect::Postgres,
        GlobalNullMode::ImplicitSql,
    );
    assert_eq!(
        result,
        Err(CompileError::InvalidCastTarget {
            dialect: "postgres",
            cast: "sideways".to_string()
        })
    );

    // "signed" is a MySQL tag, not a Postgres one.
    assert!(compile_comparison(
        "meta.age::signed",
        &ComparisonSpec::Operand(Operand::Value(json!(1))),
        Dialect::Postgres,
        GlobalNullMode::ImplicitSql,
    )
    .is_err());
}

#[test]
fn test_cast_tags_match_case_insensitively() {
    let fragment = compile(
        "meta.age::INTEGER",
        Operand::Compare(CompareOp::Gt, json!(21)),
        Dialect::Postgres,
    );
    // The tag is emitted verbatim as supplied.
    assert_eq!(fragment.sql, "CAST(\"meta\"->>'age' AS INTEGER) > $1");
}

#[test]
fn test_pg_float8_cast() {
    let fragment = compile(
        "meta.score::float8",
        Operand::Compare(CompareOp::Gt, json!(0.5)),
        Dialect::Postgres,
    );
    assert_eq!(fragment.sql, "CAST(\"meta\"->>'score' AS float8) > $1");
}

#[test]
fn test_all_cast_tags_are_lexable() {
    // Every tag in a cast table must survive the key grammar, which only
    // admits single identifier tokens after `::`.
    for dialect in sqlpath::dialect::ALL {
        for tag in dialect.capabilities().cast_types {
            let key = format!("col.x::{}", tag);
            let parsed = sqlpath::parser::parse(&key).unwrap();
            assert_eq!(
                parsed.path.cast.as_deref(),
                Some(*tag),
                "tag '{}' on {}",
                tag,
                dialect
            );
        }
    }
}

#[test]
fn test_malformed_key_surfaces_parse_error() {
    let result = compile_comparison(
        "meta..age",
        &ComparisonSpec::Operand(Operand::Value(json!(1))),
        Dialect::Postgres,
        GlobalNullMode::ImplicitSql,
    );
    assert!(matches!(result, Err(CompileError::MalformedPath(_))));
}

#[test]
fn test_placeholder_numbering_across_leaves() {
    let spec = ComparisonSpec::Nested(vec![
        (
            "video.url".to_string(),
            ComparisonSpec::Operand(Operand::Value(json!("x"))),
        ),
        (
            "views".to_string(),
            ComparisonSpec::Operand(Operand::Compare(CompareOp::Gt, json!(10))),
        ),
    ]);
    let fragment = compile_comparison(
        "meta",
        &spec,
        Dialect::Postgres,
        GlobalNullMode::ImplicitSql,
    )
    .unwrap();
    assert_eq!(
        fragment.sql,
        "\"meta\"#>'{\"video\",\"url\"}' = CAST($1 AS JSONB) AND \"meta\"->'views' > CAST($2 AS JSONB)"
    );
    assert_eq!(fragment.params, vec![json!("\"x\""), json!("10")]);
}

// ============================================================================
// Bare Path Expressions
// ============================================================================

#[test]
fn test_path_expression_variants() {
    assert_eq!(
        path_expression("meta.video.url", Dialect::Postgres).unwrap(),
        "\"meta\"#>'{\"video\",\"url\"}'"
    );
    assert_eq!(
        path_expression("meta.name:unquote", Dialect::Postgres).unwrap(),
        "\"meta\"->>'name'"
    );
    assert_eq!(
        path_expression("meta.age::signed", Dialect::MySql).unwrap(),
        "CAST(json_unquote(json_extract(`meta`,'$.\"age\"')) AS signed)"
    );
}

#[test]
fn test_path_expression_rejects_unknown_cast() {
    assert_eq!(
        path_expression("meta.age::signed", Dialect::Sqlite),
        Err(CompileError::InvalidCastTarget {
            dialect: "sqlite",
            cast: "signed".to_string()
        })
    );
}
