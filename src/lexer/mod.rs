//! Layout-sensitive, zero-copy Python lexer.
//!
//! Scans a source buffer into a flat [`Token`] vector, synthesizing
//! `Indent`/`Dedent`/`Newline` tokens from an indent stack as it goes.
//! Every token's lexeme borrows directly from the source `&str` — no
//! allocation for identifiers or literal text.

mod tables;
pub mod token;

pub use token::{Delimiter, Keyword, Kind, LiteralKind, Operator, Token, TokenKind};

use crate::error::LexError;

/// Indentation columns deeper than this are rejected.
const MAX_INDENT_DEPTH: usize = 128;

/// Scan `source` to completion, returning every token including a trailing
/// `Eof`, or the first lexical error encountered.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut lx = Lexer::new(source);
    let mut out = Vec::new();
    loop {
        let tok = lx.next_token()?;
        let is_eof = matches!(tok.kind, TokenKind::Eof);
        out.push(tok);
        if is_eof {
            break;
        }
    }
    Ok(out)
}

struct Lexer<'src> {
    src: &'src [u8],
    src_str: &'src str,
    pos: usize,
    line: u32,
    line_start: usize,
    indent_stack: Vec<usize>,
    pending_dedents: usize,
    at_line_start: bool,
    bracket_depth: i32,
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src: src.as_bytes(),
            src_str: src,
            pos: 0,
            line: 1,
            line_start: 0,
            indent_stack: vec![0],
            pending_dedents: 0,
            at_line_start: true,
            bracket_depth: 0,
        }
    }

    fn column_at(&self, pos: usize) -> u32 {
        (pos - self.line_start + 1) as u32
    }

    /// Call immediately after advancing `self.pos` past a `\n` byte.
    fn bump_line(&mut self) {
        self.line += 1;
        self.line_start = self.pos;
    }

    fn synthetic(&self, kind: TokenKind<'src>) -> Token<'src> {
        Token {
            kind,
            lexeme: "",
            line: self.line,
            column: self.column_at(self.pos),
        }
    }

    fn error(&self, message: impl Into<String>) -> LexError {
        LexError {
            line: self.line,
            message: message.into(),
        }
    }

    fn next_token(&mut self) -> Result<Token<'src>, LexError> {
        if self.pending_dedents > 0 {
            self.pending_dedents -= 1;
            return Ok(self.synthetic(TokenKind::Dedent));
        }

        loop {
            if self.at_line_start && self.bracket_depth == 0 {
                self.at_line_start = false;
                if let Some(tok) = self.handle_indent()? {
                    return Ok(tok);
                }
                if self.pending_dedents > 0 {
                    self.pending_dedents -= 1;
                    return Ok(self.synthetic(TokenKind::Dedent));
                }
            }

            if self.pos >= self.src.len() {
                if self.indent_stack.len() > 1 {
                    self.indent_stack.pop();
                    self.pending_dedents = self.indent_stack.len().saturating_sub(1);
                    self.indent_stack.truncate(1);
                    return Ok(self.synthetic(TokenKind::Dedent));
                }
                return Ok(self.synthetic(TokenKind::Eof));
            }

            let start = self.pos;
            let line = self.line;
            let column = self.column_at(start);
            let b = self.src[self.pos];

            if b == b' ' || b == b'\t' || b == b'\r' {
                self.pos += 1;
                continue;
            }

            if b == b'\n' {
                self.pos += 1;
                let was_in_brackets = self.bracket_depth > 0;
                self.bump_line();
                if was_in_brackets {
                    continue;
                }
                self.at_line_start = true;
                return Ok(Token {
                    kind: TokenKind::Newline,
                    lexeme: &self.src_str[start..self.pos],
                    line,
                    column,
                });
            }

            if b == b'\\' {
                self.pos += 1;
                if self.src.get(self.pos) == Some(&b'\n') {
                    self.pos += 1;
                    self.bump_line();
                }
                continue;
            }

            if b == b'#' {
                while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                    self.pos += 1;
                }
                continue;
            }

            if self.is_string_start() {
                return Ok(self.lex_string(start, line, column));
            }

            if b.is_ascii_digit()
                || (b == b'.'
                    && self
                        .src
                        .get(self.pos + 1)
                        .copied()
                        .is_some_and(|c| c.is_ascii_digit()))
            {
                return Ok(self.lex_number(start, line, column));
            }

            if b.is_ascii_alphabetic() || b == b'_' {
                return Ok(self.lex_name(start, line, column));
            }

            match self.scan_punct(b)? {
                Some(kind) => {
                    return Ok(Token {
                        kind,
                        lexeme: &self.src_str[start..self.pos],
                        line,
                        column,
                    });
                }
                None => continue,
            }
        }
    }

    /// Called at the start of a logical line outside brackets. Scans leading
    /// whitespace and adjusts the indent stack; returns `Ok(None)` for a
    /// blank/comment line or an unchanged indentation level.
    fn handle_indent(&mut self) -> Result<Option<Token<'src>>, LexError> {
        loop {
            let mut col = 0usize;
            while self.pos < self.src.len() {
                match self.src[self.pos] {
                    b' ' => {
                        col += 1;
                        self.pos += 1;
                    }
                    b'\t' => {
                        col = (col + 8) & !7;
                        self.pos += 1;
                    }
                    _ => break,
                }
            }

            if self.pos >= self.src.len() {
                return Ok(None);
            }
            let b = self.src[self.pos];
            if b == b'\n' {
                self.pos += 1;
                self.bump_line();
                continue;
            }
            if b == b'\r' {
                self.pos += 1;
                if self.pos < self.src.len() && self.src[self.pos] == b'\n' {
                    self.pos += 1;
                    self.bump_line();
                }
                continue;
            }
            if b == b'#' {
                while self.pos < self.src.len() && self.src[self.pos] != b'\n' {
                    self.pos += 1;
                }
                if self.pos < self.src.len() {
                    self.pos += 1;
                    self.bump_line();
                }
                continue;
            }
            if b == b'\\' {
                self.pos += 1;
                continue;
            }

            let top = *self.indent_stack.last().unwrap_or(&0);
            if col > top {
                if self.indent_stack.len() >= MAX_INDENT_DEPTH {
                    return Err(self.error(format!(
                        "indentation depth exceeds maximum of {MAX_INDENT_DEPTH}"
                    )));
                }
                self.indent_stack.push(col);
                return Ok(Some(self.synthetic(TokenKind::Indent)));
            } else if col < top {
                let mut dedent_count = 0usize;
                while self.indent_stack.len() > 1
                    && *self.indent_stack.last().expect("len() > 1") > col
                {
                    self.indent_stack.pop();
                    dedent_count += 1;
                }
                let new_top = *self.indent_stack.last().unwrap_or(&0);
                if new_top != col {
                    return Err(
                        self.error("Unindent does not match any outer indentation level")
                    );
                }
                if dedent_count > 1 {
                    self.pending_dedents = dedent_count - 1;
                }
                return Ok(Some(self.synthetic(TokenKind::Dedent)));
            } else {
                return Ok(None);
            }
        }
    }

    fn lex_name(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        while self.pos < self.src.len() {
            let b = self.src[self.pos];
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let s = &self.src_str[start..self.pos];
        let kind = match tables::keyword_lookup(s) {
            Some(kw) => TokenKind::Keyword(kw),
            None => match tables::operator_lookup(s) {
                Some(op) => TokenKind::Operator(op),
                None => TokenKind::Identifier(s),
            },
        };
        Token {
            kind,
            lexeme: s,
            line,
            column,
        }
    }

    fn lex_number(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let mut is_float = false;
        if self.pos < self.src.len() && self.src[self.pos] == b'.' {
            is_float = true;
            self.pos += 1;
            while self.pos < self.src.len() && self.src[self.pos].is_ascii_digit() {
                self.pos += 1;
            }
        }
        let lexeme = &self.src_str[start..self.pos];
        let subkind = if is_float {
            LiteralKind::Float
        } else {
            LiteralKind::Integer
        };
        Token {
            kind: TokenKind::Literal(subkind, lexeme),
            lexeme,
            line,
            column,
        }
    }

    fn is_string_start(&self) -> bool {
        let b = self.src[self.pos];
        match b {
            b'"' | b'\'' => true,
            b'r' | b'R' | b'b' | b'B' | b'u' | b'U' | b'f' | b'F' => {
                match self.src.get(self.pos + 1).copied().unwrap_or(0) {
                    b'"' | b'\'' => true,
                    b'r' | b'R' | b'b' | b'B' | b'f' | b'F' => {
                        let nn = self.src.get(self.pos + 2).copied().unwrap_or(0);
                        nn == b'"' || nn == b'\''
                    }
                    _ => false,
                }
            }
            _ => false,
        }
    }

    fn lex_string(&mut self, start: usize, line: u32, column: u32) -> Token<'src> {
        let mut is_fstring = false;
        let mut is_bytes = false;
        let mut is_raw = false;
        let mut is_unicode = false;

        let mut prefix_end = self.pos;
        let mut prefix_chars = 0;
        loop {
            if prefix_chars > 2 {
                break;
            }
            match self.src.get(prefix_end).copied().unwrap_or(0) {
                b'r' | b'R' => {
                    prefix_end += 1;
                    prefix_chars += 1;
                    is_raw = true;
                }
                b'b' | b'B' => {
                    prefix_end += 1;
                    prefix_chars += 1;
                    is_bytes = true;
                }
                b'u' | b'U' => {
                    prefix_end += 1;
                    prefix_chars += 1;
                    is_unicode = true;
                }
                b'f' | b'F' => {
                    prefix_end += 1;
                    prefix_chars += 1;
                    is_fstring = true;
                }
                _ => break,
            }
        }
        self.pos = prefix_end;

        let q = self.src[self.pos];
        let triple =
            self.src.get(self.pos + 1) == Some(&q) && self.src.get(self.pos + 2) == Some(&q);
        self.pos += if triple { 3 } else { 1 };

        if triple {
            loop {
                if self.pos >= self.src.len() {
                    break;
                }
                let b = self.src[self.pos];
                if b == b'\\' {
                    self.pos += 2;
                    continue;
                }
                if b == b'\n' {
                    self.pos += 1;
                    self.bump_line();
                    continue;
                }
                if b == q
                    && self.src.get(self.pos + 1) == Some(&q)
                    && self.src.get(self.pos + 2) == Some(&q)
                {
                    self.pos += 3;
                    break;
                }
                self.pos += 1;
            }
        } else {
            loop {
                if self.pos >= self.src.len() {
                    break;
                }
                let b = self.src[self.pos];
                if b == b'\\' {
                    self.pos += 2;
                    continue;
                }
                if b == q || b == b'\n' {
                    if b == q {
                        self.pos += 1;
                    }
                    break;
                }
                self.pos += 1;
            }
        }

        let raw = &self.src_str[start..self.pos];
        let subkind = if is_fstring {
            LiteralKind::FormattedString
        } else if is_bytes {
            LiteralKind::Bytes
        } else if is_raw {
            LiteralKind::RawString
        } else if is_unicode {
            LiteralKind::UnicodeString
        } else {
            LiteralKind::String
        };

        Token {
            kind: TokenKind::Literal(subkind, raw),
            lexeme: raw,
            line,
            column,
        }
    }

    /// Resolves delimiter/operator punctuation starting at the current
    /// (not yet consumed) lead byte `b`. Returns `Ok(None)` for a byte
    /// that is neither a known delimiter nor operator lead character —
    /// it is skipped without emitting a token.
    fn scan_punct(&mut self, b: u8) -> Result<Option<TokenKind<'src>>, LexError> {
        self.pos += 1;
        let next = |lx: &Self| lx.src.get(lx.pos).copied();

        let kind = match b {
            b'(' => {
                self.bracket_depth += 1;
                TokenKind::Delimiter(Delimiter::LParen)
            }
            b')' => {
                self.bracket_depth = (self.bracket_depth - 1).max(0);
                TokenKind::Delimiter(Delimiter::RParen)
            }
            b'[' => {
                self.bracket_depth += 1;
                TokenKind::Delimiter(Delimiter::LBracket)
            }
            b']' => {
                self.bracket_depth = (self.bracket_depth - 1).max(0);
                TokenKind::Delimiter(Delimiter::RBracket)
            }
            b'{' => {
                self.bracket_depth += 1;
                TokenKind::Delimiter(Delimiter::LBrace)
            }
            b'}' => {
                self.bracket_depth = (self.bracket_depth - 1).max(0);
                TokenKind::Delimiter(Delimiter::RBrace)
            }
            b',' => TokenKind::Delimiter(Delimiter::Comma),
            b':' => TokenKind::Delimiter(Delimiter::Colon),
            b';' => TokenKind::Delimiter(Delimiter::Semicolon),
            b'.' => TokenKind::Delimiter(Delimiter::Dot),
            b'@' => TokenKind::Delimiter(Delimiter::At),
            b'-' => {
                if next(self) == Some(b'>') {
                    self.pos += 1;
                    TokenKind::Delimiter(Delimiter::Arrow)
                } else if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::SubAssign)
                } else {
                    TokenKind::Operator(Operator::Sub)
                }
            }
            b'+' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::AddAssign)
                } else {
                    TokenKind::Operator(Operator::Add)
                }
            }
            b'*' => {
                if next(self) == Some(b'*') {
                    self.pos += 1;
                    if next(self) == Some(b'=') {
                        self.pos += 1;
                        TokenKind::Operator(Operator::PowAssign)
                    } else {
                        TokenKind::Operator(Operator::Pow)
                    }
                } else if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::MulAssign)
                } else {
                    TokenKind::Operator(Operator::Mul)
                }
            }
            b'/' => {
                if next(self) == Some(b'/') {
                    self.pos += 1;
                    if next(self) == Some(b'=') {
                        self.pos += 1;
                        TokenKind::Operator(Operator::FloorDivAssign)
                    } else {
                        TokenKind::Operator(Operator::FloorDiv)
                    }
                } else if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::DivAssign)
                } else {
                    TokenKind::Operator(Operator::Div)
                }
            }
            b'%' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::ModAssign)
                } else {
                    TokenKind::Operator(Operator::Mod)
                }
            }
            b'&' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::BitAndAssign)
                } else {
                    TokenKind::Operator(Operator::BitAnd)
                }
            }
            b'|' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::BitOrAssign)
                } else {
                    TokenKind::Operator(Operator::BitOr)
                }
            }
            b'^' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::BitXorAssign)
                } else {
                    TokenKind::Operator(Operator::BitXor)
                }
            }
            b'~' => TokenKind::Operator(Operator::BitNot),
            b'<' => {
                if next(self) == Some(b'<') {
                    self.pos += 1;
                    if next(self) == Some(b'=') {
                        self.pos += 1;
                        TokenKind::Operator(Operator::ShlAssign)
                    } else {
                        TokenKind::Operator(Operator::Shl)
                    }
                } else if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::LtEq)
                } else {
                    TokenKind::Operator(Operator::Lt)
                }
            }
            b'>' => {
                if next(self) == Some(b'>') {
                    self.pos += 1;
                    if next(self) == Some(b'=') {
                        self.pos += 1;
                        TokenKind::Operator(Operator::ShrAssign)
                    } else {
                        TokenKind::Operator(Operator::Shr)
                    }
                } else if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::GtEq)
                } else {
                    TokenKind::Operator(Operator::Gt)
                }
            }
            b'=' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::Eq)
                } else {
                    TokenKind::Operator(Operator::Assign)
                }
            }
            b'!' => {
                if next(self) == Some(b'=') {
                    self.pos += 1;
                    TokenKind::Operator(Operator::NotEq)
                } else {
                    return Err(self.error("invalid operator spelling '!'"));
                }
            }
            _ => {
                // Not a recognized delimiter or operator lead character;
                // advance past it without emitting a token.
                return Ok(None);
            }
        };
        Ok(Some(kind))
    }
}
