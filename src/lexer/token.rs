//! Token data model: a coarse [`Kind`] fused with its finer payload into one
//! [`TokenKind`], plus the closed keyword/operator/delimiter/literal-subkind
//! enumerations.

/// The coarse token classification exposed to callers that want it without
/// matching on the full [`TokenKind`] payload (debug printers, diagnostics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Identifier,
    Keyword,
    Literal,
    Operator,
    Delimiter,
    Newline,
    Indent,
    Dedent,
    Unknown,
    Eof,
}

/// The closed set of reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    False,
    None,
    True,
    And,
    As,
    Assert,
    Async,
    Await,
    Break,
    Class,
    Continue,
    Def,
    Del,
    Elif,
    Else,
    Except,
    Finally,
    For,
    From,
    Global,
    If,
    Import,
    In,
    Is,
    Lambda,
    Nonlocal,
    Not,
    Or,
    Pass,
    Raise,
    Return,
    Try,
    While,
    With,
    Yield,
    Unknown,
}

/// Single-character (or `->`) punctuation that is not itself an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Dot,
    Semicolon,
    At,
    Arrow,
    Unknown,
}

/// Arithmetic, bitwise, comparison, logical, identity and membership
/// operator codes, plus their augmented-assignment forms and plain `=`.
///
/// `IsNot`/`NotIn` are never produced by the lexer (see module docs on
/// [`super::tokenize`]) — they exist here only because the parser
/// assembles them from two adjacent `Keyword` tokens and needs somewhere
/// to put the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    FloorDiv,
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    ModAssign,
    FloorDivAssign,
    PowAssign,
    BitAndAssign,
    BitOrAssign,
    BitXorAssign,
    ShlAssign,
    ShrAssign,
    BitAnd,
    BitOr,
    BitXor,
    BitNot,
    Shl,
    Shr,
    Eq,
    NotEq,
    Gt,
    Lt,
    GtEq,
    LtEq,
    And,
    Or,
    Not,
    Is,
    IsNot,
    In,
    NotIn,
    Unknown,
}

/// Literal subkind, distinguishing string prefix forms from numeric shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    String,
    UnicodeString,
    RawString,
    FormattedString,
    Bytes,
    Integer,
    Float,
}

/// The fused kind+subkind payload. Collapsing the source's separate
/// `kind`/`type` fields into one enum means a `Token::Literal` cannot be
/// constructed with a nonsensical kind/subkind pairing — the invalid state
/// the C model allowed is simply not representable here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'src> {
    Identifier(&'src str),
    Keyword(Keyword),
    Literal(LiteralKind, &'src str),
    Operator(Operator),
    Delimiter(Delimiter),
    Newline,
    Indent,
    Dedent,
    /// Never produced by [`super::tokenize`] — every unrecognized spelling
    /// is reported as a [`super::LexError`] instead. Kept so [`Kind`]'s
    /// enumeration stays total for callers that pattern-match on it.
    Unknown,
    Eof,
}

impl<'src> TokenKind<'src> {
    pub fn coarse(&self) -> Kind {
        match self {
            TokenKind::Identifier(_) => Kind::Identifier,
            TokenKind::Keyword(_) => Kind::Keyword,
            TokenKind::Literal(..) => Kind::Literal,
            TokenKind::Operator(_) => Kind::Operator,
            TokenKind::Delimiter(_) => Kind::Delimiter,
            TokenKind::Newline => Kind::Newline,
            TokenKind::Indent => Kind::Indent,
            TokenKind::Dedent => Kind::Dedent,
            TokenKind::Unknown => Kind::Unknown,
            TokenKind::Eof => Kind::Eof,
        }
    }
}

/// A scanned token: its fused kind/subkind, the exact source lexeme it was
/// built from, and 1-indexed line/column of its first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind<'src>,
    pub lexeme: &'src str,
    pub line: u32,
    pub column: u32,
}

impl<'src> Token<'src> {
    pub fn kind(&self) -> Kind {
        self.kind.coarse()
    }
}
