/// One step of traversal into a JSON document.
///
/// # Examples
/// - `address.country` → `[Member("address"), Member("country")]`
/// - `passwords[0]` → `[Member("passwords"), Index(0)]`
///
/// Equality is defined on the unescaped member name and the index value,
/// never on the escaped surface text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Object member access by name (fully unescaped)
    Member(String),

    /// Array element access by non-negative index
    Index(u32),
}

/// An ordered traversal path plus its terminal modifiers.
///
/// The empty segment list denotes the column itself. `cast` and `unquote`
/// apply to the whole resolved path; the grammar only admits them once, at the
/// very end of the key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedPath {
    pub segments: Vec<PathSegment>,
    /// Dialect type tag from a `::type` suffix, passed through verbatim
    pub cast: Option<String>,
    /// Whether a `:unquote` suffix was present
    pub unquote: bool,
}

impl ParsedPath {
    /// True when the path addresses the column itself rather than a member.
    pub fn is_column(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the flat surface form of this path, standalone (no column).
    ///
    /// Member names that contain characters outside the bare-identifier set
    /// are emitted quoted with `\"`/`\\` escapes, so the result re-parses to
    /// an equal path.
    pub fn to_key(&self) -> String {
        let mut out = String::new();
        render_segments(&mut out, &self.segments, false);
        render_modifiers(&mut out, self);
        out
    }
}

/// A parsed attribute key: the column named by the first segment of the raw
/// key, plus the traversal path into the document it stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub column: String,
    pub path: ParsedPath,
}

impl ParsedKey {
    /// Render the flat surface form of the full key, column included.
    pub fn to_key(&self) -> String {
        let mut out = String::new();
        render_member(&mut out, &self.column);
        render_segments(&mut out, &self.path.segments, true);
        render_modifiers(&mut out, &self.path);
        out
    }
}

fn needs_quoting(name: &str) -> bool {
    name.is_empty() || !name.chars().all(|c| c.is_alphanumeric() || c == '_')
}

fn render_member(out: &mut String, name: &str) {
    if needs_quoting(name) {
        out.push('"');
        for c in name.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                c => out.push(c),
            }
        }
        out.push('"');
    } else {
        out.push_str(name);
    }
}

fn render_segments(out: &mut String, segments: &[PathSegment], leading_dot: bool) {
    for (i, segment) in segments.iter().enumerate() {
        match segment {
            PathSegment::Member(name) => {
                if leading_dot || i > 0 {
                    out.push('.');
                }
                render_member(out, name);
            }
            PathSegment::Index(n) => {
                out.push('[');
                out.push_str(&n.to_string());
                out.push(']');
            }
        }
    }
}

fn render_modifiers(out: &mut String, path: &ParsedPath) {
    if let Some(tag) = &path.cast {
        out.push_str("::");
        out.push_str(tag);
    }
    if path.unquote {
        out.push_str(":unquote");
    }
}
