//! Recursive-descent parser: token slice in, [`Source`] AST out.
//!
//! Holds a token slice, a current index, and a single error latch —
//! first error wins, there is no recovery and no synchronization point.
//! Every production checks the latch on re-entry and bails rather than
//! attempting to keep going.

mod expr;
mod stmt;

use crate::ast::Source;
use crate::error::{Error, ParseError};
use crate::lexer::token::{Delimiter, Keyword, Kind, Operator, Token, TokenKind};
use crate::lexer::tokenize;

/// Parse a token slice produced by [`crate::lexer::tokenize`] into a
/// [`Source`]. Returns the first parse error encountered, if any.
pub fn parse_tokens(tokens: &[Token<'_>]) -> Result<Source, ParseError> {
    let mut p = Parser::new(tokens);
    let source = p.parse_source();
    match p.error {
        Some(err) => Err(err),
        None => Ok(source),
    }
}

/// Convenience entry point: tokenize then parse in one call.
pub fn parse(source: &str) -> Result<Source, Error> {
    let tokens = tokenize(source)?;
    Ok(parse_tokens(&tokens)?)
}

pub(crate) struct Parser<'t, 'src> {
    tokens: &'t [Token<'src>],
    pos: usize,
    error: Option<ParseError>,
}

impl<'t, 'src> Parser<'t, 'src> {
    fn new(tokens: &'t [Token<'src>]) -> Self {
        Self {
            tokens,
            pos: 0,
            error: None,
        }
    }

    fn parse_source(&mut self) -> Source {
        self.skip_trivia();
        let mut decls = Vec::new();
        while !self.is_at_end() && !self.has_error() {
            if let Some(stmt) = self.parse_declaration() {
                decls.push(stmt);
            }
            self.skip_trivia();
        }
        Source { decls }
    }

    /// Skip blank-line Newline/Indent/Dedent noise between declarations.
    /// Indent/Dedent should not appear at module scope for well-formed
    /// input, but tolerate them rather than looping forever on malformed
    /// trailing whitespace.
    fn skip_trivia(&mut self) {
        while matches!(
            self.peek().kind(),
            Kind::Newline | Kind::Indent | Kind::Dedent
        ) {
            self.advance();
        }
    }

    // ── token access ─────────────────────────────────────────────────────────

    fn peek(&self) -> Token<'src> {
        self.tokens[self.pos]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind() == Kind::Eof
    }

    fn advance(&mut self) -> Token<'src> {
        let tok = self.tokens[self.pos];
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn current_line(&self) -> u32 {
        self.peek().line
    }

    // ── checks ───────────────────────────────────────────────────────────────

    fn check_kind(&self, kind: Kind) -> bool {
        self.peek().kind() == kind
    }

    fn check_keyword(&self, kw: Keyword) -> bool {
        matches!(self.peek().kind, TokenKind::Keyword(k) if k == kw)
    }

    fn check_delimiter(&self, d: Delimiter) -> bool {
        matches!(self.peek().kind, TokenKind::Delimiter(k) if k == d)
    }

    fn check_operator(&self, op: Operator) -> bool {
        matches!(self.peek().kind, TokenKind::Operator(k) if k == op)
    }

    fn peek_identifier(&self) -> Option<&'src str> {
        match self.peek().kind {
            TokenKind::Identifier(name) => Some(name),
            _ => None,
        }
    }

    // ── consuming matches ────────────────────────────────────────────────────

    fn match_keyword(&mut self, kw: Keyword) -> bool {
        if self.check_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_delimiter(&mut self, d: Delimiter) -> bool {
        if self.check_delimiter(d) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_operator(&mut self, op: Operator) -> bool {
        if self.check_operator(op) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume_keyword(&mut self, kw: Keyword, msg: &str) -> Option<()> {
        if self.match_keyword(kw) {
            Some(())
        } else {
            self.set_error(msg);
            None
        }
    }

    fn consume_delimiter(&mut self, d: Delimiter, msg: &str) -> Option<()> {
        if self.match_delimiter(d) {
            Some(())
        } else {
            self.set_error(msg);
            None
        }
    }

    fn consume_operator(&mut self, op: Operator, msg: &str) -> Option<()> {
        if self.match_operator(op) {
            Some(())
        } else {
            self.set_error(msg);
            None
        }
    }

    /// A simple statement must be followed by a Newline, a Dedent, or
    /// EOF. Dedent/EOF are not consumed here — the enclosing `Body`/module
    /// loop checks for them next.
    fn consume_stmt_terminator(&mut self) -> Option<()> {
        if self.check_kind(Kind::Newline) {
            self.advance();
            Some(())
        } else if self.check_kind(Kind::Dedent) || self.is_at_end() {
            Some(())
        } else {
            self.set_error("expected newline after statement");
            None
        }
    }

    fn consume_identifier(&mut self, msg: &str) -> Option<&'src str> {
        match self.peek_identifier() {
            Some(name) => {
                self.advance();
                Some(name)
            }
            None => {
                self.set_error(msg);
                None
            }
        }
    }

    // ── error latch ──────────────────────────────────────────────────────────

    fn has_error(&self) -> bool {
        self.error.is_some()
    }

    fn set_error(&mut self, msg: impl Into<String>) {
        if self.error.is_none() {
            self.error = Some(ParseError {
                line: self.current_line(),
                message: msg.into(),
            });
        }
    }

    /// Record an error naming an explicitly unsupported construct. Kept
    /// separate from [`Self::set_error`] only so call sites read as
    /// intentional rejections rather than malformed input.
    fn unsupported(&mut self, construct: &str) {
        self.set_error(format!("not supported: {construct}"));
    }
}
