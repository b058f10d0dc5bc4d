//! Language identification and lexical grammar tables.
//!
//! Maps file extensions to language IDs and describes, per language, the
//! concrete token/mode table the line lexer runs against: keyword set,
//! comment delimiters, and string quote characters.

use std::path::Path;

/// Supported language identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LanguageId {
    #[default]
    PlainText,
    Rust,
    C,
    JavaScript,
    Python,
    Toml,
}

/// Static lexical description of a language.
///
/// The lexer itself is language-independent; everything grammar-specific
/// lives in this table.
#[derive(Debug)]
pub struct Grammar {
    /// Reserved words lexed as `TokenKind::Keyword`
    pub keywords: &'static [&'static str],
    /// Prefix starting a comment that runs to end of line
    pub line_comment: Option<&'static str>,
    /// Open/close delimiters for block comments (may span lines)
    pub block_comment: Option<(&'static str, &'static str)>,
    /// Characters that open a string literal
    pub string_quotes: &'static [char],
}

static PLAIN_TEXT: Grammar = Grammar {
    keywords: &[],
    line_comment: None,
    block_comment: None,
    string_quotes: &[],
};

static RUST: Grammar = Grammar {
    keywords: &[
        "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum",
        "extern", "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move",
        "mut", "pub", "ref", "return", "self", "Self", "static", "struct", "super", "trait",
        "true", "type", "unsafe", "use", "where", "while",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    // Single quotes are left out: they would collide with lifetimes.
    string_quotes: &['"'],
};

static C: Grammar = Grammar {
    keywords: &[
        "auto", "break", "case", "char", "const", "continue", "default", "do", "double", "else",
        "enum", "extern", "float", "for", "goto", "if", "inline", "int", "long", "register",
        "restrict", "return", "short", "signed", "sizeof", "static", "struct", "switch",
        "typedef", "union", "unsigned", "void", "volatile", "while",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    string_quotes: &['"', '\''],
};

static JAVASCRIPT: Grammar = Grammar {
    keywords: &[
        "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
        "default", "delete", "do", "else", "export", "extends", "false", "finally", "for",
        "function", "if", "import", "in", "instanceof", "let", "new", "null", "of", "return",
        "static", "super", "switch", "this", "throw", "true", "try", "typeof", "undefined",
        "var", "void", "while", "with", "yield",
    ],
    line_comment: Some("//"),
    block_comment: Some(("/*", "*/")),
    string_quotes: &['"', '\'', '`'],
};

static PYTHON: Grammar = Grammar {
    keywords: &[
        "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
        "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
        "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
        "try", "while", "with", "yield",
    ],
    line_comment: Some("#"),
    block_comment: None,
    string_quotes: &['"', '\''],
};

static TOML: Grammar = Grammar {
    keywords: &["true", "false"],
    line_comment: Some("#"),
    block_comment: None,
    string_quotes: &['"', '\''],
};

impl LanguageId {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "rs" => LanguageId::Rust,
            "c" | "h" => LanguageId::C,
            "js" | "mjs" | "cjs" => LanguageId::JavaScript,
            "py" | "pyi" => LanguageId::Python,
            "toml" => LanguageId::Toml,
            _ => LanguageId::PlainText,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(LanguageId::PlainText)
    }

    /// Parse a language name as given on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" | "plain" => Some(LanguageId::PlainText),
            "rust" => Some(LanguageId::Rust),
            "c" => Some(LanguageId::C),
            "javascript" | "js" => Some(LanguageId::JavaScript),
            "python" | "py" => Some(LanguageId::Python),
            "toml" => Some(LanguageId::Toml),
            _ => None,
        }
    }

    /// Get display name for the language
    pub fn display_name(&self) -> &'static str {
        match self {
            LanguageId::PlainText => "Plain Text",
            LanguageId::Rust => "Rust",
            LanguageId::C => "C",
            LanguageId::JavaScript => "JavaScript",
            LanguageId::Python => "Python",
            LanguageId::Toml => "TOML",
        }
    }

    /// The lexical grammar the line lexer runs against
    pub fn grammar(&self) -> &'static Grammar {
        match self {
            LanguageId::PlainText => &PLAIN_TEXT,
            LanguageId::Rust => &RUST,
            LanguageId::C => &C,
            LanguageId::JavaScript => &JAVASCRIPT,
            LanguageId::Python => &PYTHON,
            LanguageId::Toml => &TOML,
        }
    }

    /// Check if this language has syntax highlighting support
    pub fn has_highlighting(&self) -> bool {
        !matches!(self, LanguageId::PlainText)
    }
}
