use crate::ast::Token;

/// Errors produced while tokenizing an attribute key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A quoted segment was never closed
    UnterminatedQuote { position: usize },

    /// A backslash escape other than `\"` or `\\` inside a quoted segment
    InvalidEscape { position: usize, found: Option<char> },

    /// Non-digit content or nothing at all between `[` and `]`
    InvalidIndex { position: usize },

    /// A character that cannot start or continue an unquoted segment
    UnexpectedChar { position: usize, found: char },

    /// A `:`-prefixed suffix that is neither `::type` nor `:unquote`
    UnknownModifier { position: usize, found: String },
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LexError::UnterminatedQuote { position } => {
                write!(f, "unterminated quoted segment starting at position {}", position)
            }
            LexError::InvalidEscape { position, found: Some(c) } => {
                write!(f, "invalid escape sequence '\\{}' at position {}", c, position)
            }
            LexError::InvalidEscape { position, found: None } => {
                write!(f, "unexpected end of key after backslash at position {}", position)
            }
            LexError::InvalidIndex { position } => {
                write!(f, "expected digits inside brackets at position {}", position)
            }
            LexError::UnexpectedChar { position, found } => {
                write!(f, "unexpected character '{}' at position {}", found, position)
            }
            LexError::UnknownModifier { position, found } => {
                write!(f, "unknown modifier '{}' at position {}", found, position)
            }
        }
    }
}

impl std::error::Error for LexError {}

pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Lexer {
            input: input.chars().collect(),
            position: 0,
        }
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    fn peek_char(&self, offset: usize) -> Option<char> {
        self.input.get(self.position + offset).copied()
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn read_identifier(&mut self) -> String {
        let mut result = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_alphanumeric() || ch == '_' {
                result.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        result
    }

    fn read_quoted(&mut self) -> Result<String, LexError> {
        let start = self.position;
        let mut result = String::new();
        self.advance(); // consume opening quote

        while let Some(ch) = self.current_char() {
            match ch {
                '"' => {
                    self.advance();
                    return Ok(result);
                }
                '\\' => {
                    let escape_start = self.position;
                    self.advance(); // consume backslash
                    match self.current_char() {
                        Some('"') => result.push('"'),
                        Some('\\') => result.push('\\'),
                        found => {
                            return Err(LexError::InvalidEscape {
                                position: escape_start,
                                found,
                            });
                        }
                    }
                    self.advance();
                }
                _ => {
                    result.push(ch);
                    self.advance();
                }
            }
        }

        Err(LexError::UnterminatedQuote { position: start })
    }

    fn read_index(&mut self) -> Result<u32, LexError> {
        let start = self.position;
        self.advance(); // consume '['

        let mut digits = String::new();
        while let Some(ch) = self.current_char() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        if digits.is_empty() || self.current_char() != Some(']') {
            return Err(LexError::InvalidIndex { position: start });
        }
        self.advance(); // consume ']'

        // Indexes are syntactically bounded by the digit run, so overflow is
        // the only way this parse can fail.
        digits
            .parse::<u32>()
            .map_err(|_| LexError::InvalidIndex { position: start })
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        match self.current_char() {
            None => Ok(Token::Eof),
            Some('.') => {
                self.advance();
                Ok(Token::Dot)
            }
            Some('[') => Ok(Token::Index(self.read_index()?)),
            Some('"') => Ok(Token::Member(self.read_quoted()?)),
            Some(':') => {
                let start = self.position;
                if self.peek_char(1) == Some(':') {
                    self.advance();
                    self.advance();
                    let tag = self.read_identifier();
                    if tag.is_empty() {
                        return Err(LexError::UnknownModifier {
                            position: start,
                            found: "::".to_string(),
                        });
                    }
                    Ok(Token::Cast(tag))
                } else {
                    self.advance();
                    let word = self.read_identifier();
                    if word == "unquote" {
                        Ok(Token::Unquote)
                    } else {
                        Err(LexError::UnknownModifier {
                            position: start,
                            found: format!(":{}", word),
                        })
                    }
                }
            }
            Some(ch) if ch.is_alphanumeric() || ch == '_' => {
                Ok(Token::Member(self.read_identifier()))
            }
            Some(ch) => Err(LexError::UnexpectedChar {
                position: self.position,
                found: ch,
            }),
        }
    }
}

#[test]
fn test_flat_key() {
    let mut lexer = Lexer::new("gameData.passwords[0]");
    assert_eq!(lexer.next_token().unwrap(), Token::Member("gameData".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Dot);
    assert_eq!(lexer.next_token().unwrap(), Token::Member("passwords".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Index(0));
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}

#[test]
fn test_modifiers() {
    let mut lexer = Lexer::new("age::integer:unquote");
    assert_eq!(lexer.next_token().unwrap(), Token::Member("age".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Cast("integer".to_string()));
    assert_eq!(lexer.next_token().unwrap(), Token::Unquote);
    assert_eq!(lexer.next_token().unwrap(), Token::Eof);
}
