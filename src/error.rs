//! Diagnostic types for the two phases of the front-end pipeline.

use std::fmt;

/// A failure raised while scanning source text into tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub line: u32,
    pub message: String,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Lexing error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for LexError {}

/// A failure raised while building the AST from a token stream. Only the
/// first error encountered is ever produced — the parser does not attempt
/// recovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: u32,
    pub message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsing error at line {}: {}", self.line, self.message)
    }
}

impl std::error::Error for ParseError {}

/// The union of everything that can go wrong turning source text into an
/// AST, for callers that want a single error type to propagate with `?`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Lex(LexError),
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "{e}"),
            Error::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let e = LexError {
            line: 12,
            message: "invalid operator spelling '!'".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "Lexing error at line 12: invalid operator spelling '!'"
        );
    }

    #[test]
    fn parse_error_display() {
        let e = ParseError {
            line: 3,
            message: "expected ':'".to_string(),
        };
        assert_eq!(e.to_string(), "Parsing error at line 3: expected ':'");
    }

    #[test]
    fn error_wraps_either_phase() {
        let lex: Error = LexError {
            line: 1,
            message: "m".to_string(),
        }
        .into();
        assert!(matches!(lex, Error::Lex(_)));
    }
}
