use crate::{
    ast::{ComparisonSpec, Operand, ParsedKey, ParsedPath, PathSegment, Token},
    lexer::{LexError, Lexer},
};

/// Errors produced while assembling tokens into a parsed key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Tokenization failure
    Lex(LexError),

    /// The key contains no segments at all
    EmptyKey,

    /// A nested-object specification with no entries
    EmptyNested,

    /// A flat key may not start with an index; only nested sub-keys can
    LeadingIndex,

    /// A segment was required (after a separator, or at the start of the key)
    ExpectedSegment { found: String },

    /// Two segments without a separator, or a stray token
    UnexpectedToken { found: String },

    /// A `::type` or `:unquote` suffix followed by further path content
    MisplacedModifier { modifier: &'static str },

    /// The same modifier written twice
    DuplicateModifier { modifier: &'static str },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Lex(e) => write!(f, "{}", e),
            ParseError::EmptyKey => write!(f, "empty attribute key"),
            ParseError::EmptyNested => write!(f, "nested specification has no entries"),
            ParseError::LeadingIndex => {
                write!(f, "an attribute key cannot start with an index segment")
            }
            ParseError::ExpectedSegment { found } => {
                write!(f, "expected a path segment, found {}", found)
            }
            ParseError::UnexpectedToken { found } => write!(f, "unexpected {}", found),
            ParseError::MisplacedModifier { modifier } => {
                write!(f, "'{}' is only allowed at the end of the key", modifier)
            }
            ParseError::DuplicateModifier { modifier } => {
                write!(f, "'{}' may only be written once", modifier)
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(e: LexError) -> Self {
        ParseError::Lex(e)
    }
}

pub struct Parser {
    lexer: Lexer,
    current_token: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, ParseError> {
        let current_token = lexer.next_token()?;
        Ok(Parser {
            lexer,
            current_token,
        })
    }

    fn advance(&mut self) -> Result<(), ParseError> {
        self.current_token = self.lexer.next_token()?;
        Ok(())
    }

    /// Which modifier is already set on the path, for misplacement errors.
    fn active_modifier(path: &ParsedPath) -> Option<&'static str> {
        if path.cast.is_some() {
            Some("::cast")
        } else if path.unquote {
            Some(":unquote")
        } else {
            None
        }
    }

    /// Parse a complete path: segments, then optional terminal modifiers.
    ///
    /// `allow_leading_index` is only true for nested-object sub-keys, where a
    /// leading `[n]` overrides the default member access for the first step.
    pub fn parse_path(&mut self, allow_leading_index: bool) -> Result<ParsedPath, ParseError> {
        let mut path = ParsedPath::default();

        // First segment
        match std::mem::replace(&mut self.current_token, Token::Eof) {
            Token::Member(name) => {
                path.segments.push(PathSegment::Member(name));
                self.advance()?;
            }
            Token::Index(n) => {
                if !allow_leading_index {
                    return Err(ParseError::LeadingIndex);
                }
                path.segments.push(PathSegment::Index(n));
                self.advance()?;
            }
            Token::Eof => return Err(ParseError::EmptyKey),
            token => {
                return Err(ParseError::ExpectedSegment {
                    found: token.describe(),
                });
            }
        }

        loop {
            match std::mem::replace(&mut self.current_token, Token::Eof) {
                Token::Dot => {
                    if let Some(modifier) = Self::active_modifier(&path) {
                        return Err(ParseError::MisplacedModifier { modifier });
                    }
                    self.advance()?;
                    match std::mem::replace(&mut self.current_token, Token::Eof) {
                        Token::Member(name) => path.segments.push(PathSegment::Member(name)),
                        Token::Index(n) => path.segments.push(PathSegment::Index(n)),
                        token => {
                            return Err(ParseError::ExpectedSegment {
                                found: token.describe(),
                            });
                        }
                    }
                    self.advance()?;
                }
                Token::Index(n) => {
                    if let Some(modifier) = Self::active_modifier(&path) {
                        return Err(ParseError::MisplacedModifier { modifier });
                    }
                    path.segments.push(PathSegment::Index(n));
                    self.advance()?;
                }
                Token::Member(name) => {
                    // "a"b - two segments with no separator between them
                    return Err(ParseError::UnexpectedToken {
                        found: Token::Member(name).describe(),
                    });
                }
                Token::Cast(tag) => {
                    if path.cast.is_some() {
                        return Err(ParseError::DuplicateModifier { modifier: "::cast" });
                    }
                    path.cast = Some(tag);
                    self.advance()?;
                }
                Token::Unquote => {
                    if path.unquote {
                        return Err(ParseError::DuplicateModifier {
                            modifier: ":unquote",
                        });
                    }
                    path.unquote = true;
                    self.advance()?;
                }
                Token::Eof => break,
            }
        }

        Ok(path)
    }

    /// Parse a flat attribute key, splitting the leading member off as the
    /// column reference. A key of just the column yields an empty path.
    pub fn parse_key(&mut self) -> Result<ParsedKey, ParseError> {
        let mut path = self.parse_path(false)?;
        let column = match path.segments.remove(0) {
            PathSegment::Member(name) => name,
            // parse_path(false) rejects a leading index before we get here
            PathSegment::Index(_) => return Err(ParseError::LeadingIndex),
        };
        Ok(ParsedKey { column, path })
    }
}

/// Parse a flat attribute key string.
pub fn parse(raw: &str) -> Result<ParsedKey, ParseError> {
    Parser::new(Lexer::new(raw))?.parse_key()
}

/// Parse a nested-object sub-key. Unlike a flat key, it contributes no column
/// and may start with a bracketed index.
pub fn parse_nested_key(raw: &str) -> Result<ParsedPath, ParseError> {
    Parser::new(Lexer::new(raw))?.parse_path(true)
}

/// Normalize a comparison specification into one `(path, operand)` pair per
/// leaf, all sharing the column named by the base key.
///
/// Sibling leaves are meant to combine with logical AND at the caller; the
/// nested and flat surface forms of the same path set produce identical
/// results here. Leaf order follows input order.
pub fn flatten_spec(
    key: &str,
    spec: &ComparisonSpec,
) -> Result<(String, Vec<(ParsedPath, Operand)>), ParseError> {
    let parsed = parse(key)?;
    let mut leaves = Vec::new();
    descend(&parsed.path, spec, &mut leaves)?;
    if leaves.is_empty() {
        return Err(ParseError::EmptyNested);
    }
    Ok((parsed.column, leaves))
}

fn descend(
    base: &ParsedPath,
    spec: &ComparisonSpec,
    out: &mut Vec<(ParsedPath, Operand)>,
) -> Result<(), ParseError> {
    match spec {
        ComparisonSpec::Operand(operand) => {
            out.push((base.clone(), operand.clone()));
            Ok(())
        }
        ComparisonSpec::Nested(pairs) => {
            // A path that keeps descending cannot already carry terminal
            // modifiers.
            if let Some(modifier) = Parser::active_modifier(base) {
                return Err(ParseError::MisplacedModifier { modifier });
            }
            for (sub_key, child) in pairs {
                let sub = parse_nested_key(sub_key)?;
                let mut merged = ParsedPath {
                    segments: base.segments.clone(),
                    cast: sub.cast,
                    unquote: sub.unquote,
                };
                merged.segments.extend(sub.segments);
                descend(&merged, child, out)?;
            }
            Ok(())
        }
    }
}
