#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Object member name, already unescaped
    ///
    /// Produced by a bare identifier or a quoted segment. The surface escaping
    /// never survives into the token.
    ///
    /// # Examples
    /// ```text
    /// address
    /// "address.country"
    /// ```
    Member(String),

    /// Array index from a bracketed non-negative integer
    ///
    /// # Examples
    /// ```text
    /// [0]
    /// [12]
    /// ```
    Index(u32),

    /// Segment separator
    Dot,

    /// Cast suffix carrying the type tag verbatim
    ///
    /// # Examples
    /// ```text
    /// ::integer
    /// ::signed
    /// ```
    Cast(String),

    /// Unquote suffix
    ///
    /// # Examples
    /// ```text
    /// :unquote
    /// ```
    Unquote,

    /// End of key
    Eof,
}

impl Token {
    /// Short description used in parse error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::Member(name) => format!("segment '{}'", name),
            Token::Index(n) => format!("index [{}]", n),
            Token::Dot => "'.'".to_string(),
            Token::Cast(tag) => format!("cast '::{}'", tag),
            Token::Unquote => "':unquote'".to_string(),
            Token::Eof => "end of key".to_string(),
        }
    }
}
