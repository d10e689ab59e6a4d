//! Backend dialect descriptors.
//!
//! The set of supported backends is fixed and finite, so dialects are a
//! closed enum and the compiler dispatches by exhaustive matching on the
//! capability records below, never by open-ended virtual dispatch.

/// A supported relational backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    MariaDb,
    Sqlite,
    Mssql,
}

/// How the backend extracts a value at a JSON path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStyle {
    /// `->`/`->>` single-step plus `#>`/`#>>` path-array operators; the
    /// path-array form is preferred once the path has more than one step
    ArrowOps,

    /// `json_extract(col, '$.path')`, with `json_unquote(...)` for text
    ExtractFunction,

    /// `json_extract` that already unquotes scalars, so there is no separate
    /// text variant; JSON `null` collapses to SQL NULL and must be tested
    /// through `json_type`
    ExtractUnquoted,

    /// `JSON_VALUE` for scalars and `JSON_QUERY` for documents, both lax;
    /// JSON `null` is indistinguishable from an absent member
    JsonValue,
}

/// Positional placeholder syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?`
    Question,
    /// `$1`, `$2`, ...
    DollarNumbered,
    /// `@p1`, `@p2`, ...
    AtNumbered,
}

/// Identifier quoting syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"ident"`, embedded quotes doubled
    DoubleQuote,
    /// `` `ident` ``, embedded backticks doubled
    Backtick,
    /// `[ident]`, embedded `]` doubled
    Bracket,
}

/// Capability record consulted by the compiler. One static instance per
/// dialect; read-only configuration, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectCapabilities {
    pub extraction: ExtractionStyle,
    /// Type tags accepted by the cast syntax, matched case-insensitively
    pub cast_types: &'static [&'static str],
    /// Whether the column's JSON type compares against a `CAST(? AS JSON)`
    /// style typed parameter (binary/indexed JSON types), as opposed to
    /// comparing against JSON text directly
    pub binary_json_comparable: bool,
    /// Whether a JSON `null` member is distinguishable from an absent one
    pub distinguishes_json_null: bool,
    /// Containment predicates (`@>` family)
    pub containment: bool,
    /// Key-existence predicates (`?` family)
    pub key_existence: bool,
    pub placeholders: PlaceholderStyle,
    pub quoting: QuoteStyle,
}

static POSTGRES: DialectCapabilities = DialectCapabilities {
    extraction: ExtractionStyle::ArrowOps,
    cast_types: &[
        "integer",
        "bigint",
        "smallint",
        "numeric",
        "decimal",
        "real",
        "float8",
        "text",
        "varchar",
        "boolean",
        "date",
        "timestamp",
        "timestamptz",
        "uuid",
        "json",
        "jsonb",
    ],
    binary_json_comparable: true,
    distinguishes_json_null: true,
    containment: true,
    key_existence: true,
    placeholders: PlaceholderStyle::DollarNumbered,
    quoting: QuoteStyle::DoubleQuote,
};

static MYSQL: DialectCapabilities = DialectCapabilities {
    extraction: ExtractionStyle::ExtractFunction,
    cast_types: &[
        "signed", "unsigned", "char", "binary", "date", "datetime", "time", "decimal", "double",
        "float", "json",
    ],
    binary_json_comparable: true,
    distinguishes_json_null: true,
    containment: false,
    key_existence: false,
    placeholders: PlaceholderStyle::Question,
    quoting: QuoteStyle::Backtick,
};

static MARIADB: DialectCapabilities = DialectCapabilities {
    extraction: ExtractionStyle::ExtractFunction,
    cast_types: &[
        "signed", "unsigned", "char", "binary", "date", "datetime", "time", "decimal", "double",
        "float",
    ],
    // MariaDB stores JSON as text, so comparisons bind JSON text directly.
    binary_json_comparable: false,
    distinguishes_json_null: true,
    containment: false,
    key_existence: false,
    placeholders: PlaceholderStyle::Question,
    quoting: QuoteStyle::Backtick,
};

static SQLITE: DialectCapabilities = DialectCapabilities {
    extraction: ExtractionStyle::ExtractUnquoted,
    cast_types: &["integer", "real", "text", "numeric", "blob"],
    binary_json_comparable: false,
    distinguishes_json_null: true,
    containment: false,
    key_existence: false,
    placeholders: PlaceholderStyle::Question,
    quoting: QuoteStyle::DoubleQuote,
};

static MSSQL: DialectCapabilities = DialectCapabilities {
    extraction: ExtractionStyle::JsonValue,
    cast_types: &[
        "int",
        "bigint",
        "smallint",
        "float",
        "real",
        "decimal",
        "numeric",
        "nvarchar",
        "varchar",
        "bit",
        "date",
        "datetime2",
        "uniqueidentifier",
    ],
    binary_json_comparable: false,
    distinguishes_json_null: false,
    containment: false,
    key_existence: false,
    placeholders: PlaceholderStyle::AtNumbered,
    quoting: QuoteStyle::Bracket,
};

impl Dialect {
    pub fn capabilities(self) -> &'static DialectCapabilities {
        match self {
            Dialect::Postgres => &POSTGRES,
            Dialect::MySql => &MYSQL,
            Dialect::MariaDb => &MARIADB,
            Dialect::Sqlite => &SQLITE,
            Dialect::Mssql => &MSSQL,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::MariaDb => "mariadb",
            Dialect::Sqlite => "sqlite",
            Dialect::Mssql => "mssql",
        }
    }

    /// Quote a column or identifier for this dialect.
    pub fn quote_ident(self, name: &str) -> String {
        match self.capabilities().quoting {
            QuoteStyle::DoubleQuote => format!("\"{}\"", name.replace('"', "\"\"")),
            QuoteStyle::Backtick => format!("`{}`", name.replace('`', "``")),
            QuoteStyle::Bracket => format!("[{}]", name.replace(']', "]]")),
        }
    }

    /// The positional placeholder for the `n`-th parameter (1-based).
    pub fn placeholder(self, n: usize) -> String {
        match self.capabilities().placeholders {
            PlaceholderStyle::Question => "?".to_string(),
            PlaceholderStyle::DollarNumbered => format!("${}", n),
            PlaceholderStyle::AtNumbered => format!("@p{}", n),
        }
    }

    /// Whether the tag is in this dialect's cast table (case-insensitive).
    pub fn supports_cast(self, tag: &str) -> bool {
        self.capabilities()
            .cast_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(tag))
    }
}

impl std::fmt::Display for Dialect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            "mysql" => Ok(Dialect::MySql),
            "mariadb" => Ok(Dialect::MariaDb),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "mssql" | "sqlserver" => Ok(Dialect::Mssql),
            other => Err(format!("unknown dialect '{}'", other)),
        }
    }
}

/// All supported dialects, for listings.
pub const ALL: [Dialect; 5] = [
    Dialect::Postgres,
    Dialect::MySql,
    Dialect::MariaDb,
    Dialect::Sqlite,
    Dialect::Mssql,
];
