//! # sqlpath - Attribute-Key Abstract Syntax Tree
//!
//! This module defines the typed representation of a parsed JSON attribute key
//! and of the comparison specification that accompanies it.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[path]** - Path segments, parsed paths, and parsed keys
//! - **[operand]** - Comparison operands, operators, and the nested spec form
//!
//! ## Key Grammar
//!
//! An attribute key names a column followed by a traversal into the JSON
//! document stored in that column:
//!
//! ```text
//! jsonAttribute.address.country
//! gameData.passwords[0]
//! jsonAttribute.age::integer
//! jsonAddress.country:unquote
//! jsonAttribute."address.country"
//! ```
//!
//! Segments are separated by `.`. A segment is a bare identifier, a bracketed
//! index `[0]`, or a quoted literal `"…"` in which `.`, `:`, `[` and `]` lose
//! their special meaning (an embedded quote is written `\"`). After all
//! segments, an optional `::type` cast and/or `:unquote` suffix may follow, in
//! either order, each at most once.
//!
//! ## The Two Surface Forms
//!
//! The same logical path set can be written flat or as a nested object:
//!
//! ```text
//! meta.video.url = "x"           { meta: { video: { url: "x" } } }
//! gameData.passwords[0] = "y"    { gameData: { passwords: { "[0]": "y" } } }
//! ```
//!
//! Both normalize to identical [`ParsedPath`] values; nested siblings compile
//! to AND-joined fragments. A nested sub-key whose literal text starts with
//! `[n]` contributes an index step instead of a member step.
pub mod tokens;
pub mod path;
pub mod operand;

pub use tokens::Token;
pub use path::{ParsedKey, ParsedPath, PathSegment};
pub use operand::{CompareOp, ComparisonSpec, Operand};
