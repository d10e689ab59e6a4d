pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod compiler;
pub mod dialect;
pub mod lexer;
pub mod nulls;
pub mod parser;
pub mod stringify;

pub use ast::{CompareOp, ComparisonSpec, Operand, ParsedKey, ParsedPath, PathSegment, Token};
pub use compiler::{CompileError, Fragment, compile_assignment, compile_comparison, path_expression};
pub use dialect::{Dialect, DialectCapabilities};
pub use lexer::{LexError, Lexer};
pub use nulls::{GlobalNullMode, NullBehavior, ResolvedOperand, resolve_operand};
pub use parser::{ParseError, Parser, flatten_spec};
