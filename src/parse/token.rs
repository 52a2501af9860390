use logos::Logos;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// A lexical unit of an OFX document.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// A `KEY:VALUE` line of the header block.
    Header { key: String, value: String },
    /// `<NAME>`
    OpenTag(String),
    /// `</NAME>`
    CloseTag(String),
    /// `\n`, `\r\n` or a lone `\r`.
    Newline,
    /// Any text that is not a tag.
    Content(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Header { key, value } => write!(f, "Header({}:{})", key, value),
            Token::OpenTag(name) => write!(f, "OpenTag(<{}>)", name),
            Token::CloseTag(name) => write!(f, "CloseTag(</{}>)", name),
            Token::Newline => write!(f, "Newline"),
            Token::Content(text) => write!(f, "Content({:?})", text),
        }
    }
}

/// Automaton recognizing a header line. The terminator is part of the match.
#[derive(Debug, PartialEq, Logos, Clone, Copy)]
pub(crate) enum HeaderLexeme {
    #[regex(r"[^<>:\r\n]+:[^<>:\r\n]*\r?\n")]
    Line,

    #[error]
    Error,
}

/// Automata recognizing the body tokens. The four classes never start with
/// the same character sequence, so at most one of them can match at a given
/// position.
#[derive(Debug, PartialEq, Logos, Clone, Copy)]
pub(crate) enum BodyLexeme {
    #[regex(r"<[^<>/]+>")]
    OpenTag,

    #[regex(r"</[^<>/]+>")]
    CloseTag,

    #[token("\n")]
    #[token("\r")]
    #[token("\r\n")]
    Newline,

    #[regex(r"[^<>\r\n]+")]
    Content,

    #[error]
    Error,
}

/// Builds a [`Token::Header`] from a matched header line.
pub(crate) fn header(line: &str) -> Token {
    let line = line.trim_end_matches(&['\r', '\n'][..]);
    let (key, value) = line.split_once(':').unwrap_or((line, ""));
    Token::Header {
        key: key.trim().to_string(),
        value: value.trim().to_string(),
    }
}

/// Strips `<`, `</` and `>` from a matched tag and trims the name inside.
#[inline]
pub(crate) fn tag_name(tag: &str) -> String {
    let inner = tag.strip_prefix('<').unwrap_or(tag);
    let inner = inner.strip_prefix('/').unwrap_or(inner);
    let inner = inner.strip_suffix('>').unwrap_or(inner);
    inner.trim().to_string()
}
