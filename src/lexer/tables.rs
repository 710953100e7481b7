//! Keyword/operator/delimiter lookup, rendered as `match` expressions over
//! `&str` rather than runtime-built hash maps — the closed key sets here are
//! known at compile time, so there is no table to build or tear down.

use super::token::{Delimiter, Keyword, Operator};

pub fn keyword_lookup(word: &str) -> Option<Keyword> {
    Some(match word {
        "False" => Keyword::False,
        "None" => Keyword::None,
        "True" => Keyword::True,
        "and" => Keyword::And,
        "as" => Keyword::As,
        "assert" => Keyword::Assert,
        "async" => Keyword::Async,
        "await" => Keyword::Await,
        "break" => Keyword::Break,
        "class" => Keyword::Class,
        "continue" => Keyword::Continue,
        "def" => Keyword::Def,
        "del" => Keyword::Del,
        "elif" => Keyword::Elif,
        "else" => Keyword::Else,
        "except" => Keyword::Except,
        "finally" => Keyword::Finally,
        "for" => Keyword::For,
        "from" => Keyword::From,
        "global" => Keyword::Global,
        "if" => Keyword::If,
        "import" => Keyword::Import,
        "in" => Keyword::In,
        "is" => Keyword::Is,
        "lambda" => Keyword::Lambda,
        "nonlocal" => Keyword::Nonlocal,
        "not" => Keyword::Not,
        "or" => Keyword::Or,
        "pass" => Keyword::Pass,
        "raise" => Keyword::Raise,
        "return" => Keyword::Return,
        "try" => Keyword::Try,
        "while" => Keyword::While,
        "with" => Keyword::With,
        "yield" => Keyword::Yield,
        _ => return None,
    })
}

/// Textual operator lookup. In practice every word this table recognizes
/// (`and`, `or`, `not`, `is`, `in`) is also a keyword, so [`keyword_lookup`]
/// always wins first in the scan loop and this branch of the table is
/// reached only by symbolic lexemes. Kept total over both forms since the
/// operator and keyword tables overlap intentionally.
pub fn operator_lookup(word: &str) -> Option<Operator> {
    Some(match word {
        "+" => Operator::Add,
        "-" => Operator::Sub,
        "*" => Operator::Mul,
        "/" => Operator::Div,
        "%" => Operator::Mod,
        "**" => Operator::Pow,
        "//" => Operator::FloorDiv,
        "=" => Operator::Assign,
        "+=" => Operator::AddAssign,
        "-=" => Operator::SubAssign,
        "*=" => Operator::MulAssign,
        "/=" => Operator::DivAssign,
        "%=" => Operator::ModAssign,
        "//=" => Operator::FloorDivAssign,
        "**=" => Operator::PowAssign,
        "&=" => Operator::BitAndAssign,
        "|=" => Operator::BitOrAssign,
        "^=" => Operator::BitXorAssign,
        "<<=" => Operator::ShlAssign,
        ">>=" => Operator::ShrAssign,
        "&" => Operator::BitAnd,
        "|" => Operator::BitOr,
        "^" => Operator::BitXor,
        "~" => Operator::BitNot,
        "<<" => Operator::Shl,
        ">>" => Operator::Shr,
        "==" => Operator::Eq,
        "!=" => Operator::NotEq,
        ">" => Operator::Gt,
        "<" => Operator::Lt,
        ">=" => Operator::GtEq,
        "<=" => Operator::LtEq,
        "and" => Operator::And,
        "or" => Operator::Or,
        "not" => Operator::Not,
        "is" => Operator::Is,
        "is not" => Operator::IsNot,
        "in" => Operator::In,
        "not in" => Operator::NotIn,
        _ => return None,
    })
}

pub fn delimiter_lookup(word: &str) -> Option<Delimiter> {
    Some(match word {
        "(" => Delimiter::LParen,
        ")" => Delimiter::RParen,
        "[" => Delimiter::LBracket,
        "]" => Delimiter::RBracket,
        "{" => Delimiter::LBrace,
        "}" => Delimiter::RBrace,
        "," => Delimiter::Comma,
        ":" => Delimiter::Colon,
        "." => Delimiter::Dot,
        ";" => Delimiter::Semicolon,
        "@" => Delimiter::At,
        "->" => Delimiter::Arrow,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_hits_and_misses() {
        assert_eq!(keyword_lookup("class"), Some(Keyword::Class));
        assert_eq!(keyword_lookup("notakeyword"), None);
    }

    #[test]
    fn operator_overlaps_keyword_text() {
        assert_eq!(operator_lookup("and"), Some(Operator::And));
        assert_eq!(operator_lookup(">>="), Some(Operator::ShrAssign));
    }

    #[test]
    fn delimiter_arrow() {
        assert_eq!(delimiter_lookup("->"), Some(Delimiter::Arrow));
        assert_eq!(delimiter_lookup("-"), None);
    }
}
