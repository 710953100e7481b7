//! Expression grammar: the 13-level precedence ladder, dict/set and
//! slice/subscript disambiguation, and call-argument kwarg rules.
//!
//! Builds a recursive expression tree (`UnOp`/`BinOp`/`TernOp`/`FCall`/
//! `AttributeAccess`/`Subscript`/`Slice`) using the same zero-copy-peek,
//! `Option`-propagating idiom as the statement grammar, one parsing
//! method per precedence level from ternary down to primary/atom.

use super::Parser;
use crate::ast::{
    AttributeAccess, BinOp, BinaryOp, Expr, FCall, Literal, Slice, Subscript, SubscriptKind,
    Symbol, TernOp, UnOp, UnaryOp,
};
use crate::lexer::token::{Delimiter, Keyword, LiteralKind, Operator, TokenKind};

impl<'t, 'src> Parser<'t, 'src> {
    pub(super) fn parse_expr(&mut self) -> Option<Expr> {
        self.parse_ternary()
    }

    fn peek2(&self) -> crate::lexer::token::Token<'src> {
        self.tokens
            .get(self.pos + 1)
            .copied()
            .unwrap_or_else(|| self.peek())
    }

    // ── 1. ternary ───────────────────────────────────────────────────────────

    fn parse_ternary(&mut self) -> Option<Expr> {
        let if_expr = self.parse_or()?;
        if self.match_keyword(Keyword::If) {
            let condition = self.parse_or()?;
            self.consume_keyword(Keyword::Else, "expected 'else' in conditional expression")?;
            let else_expr = self.parse_ternary()?;
            Some(Expr::TernOp(Box::new(TernOp {
                condition,
                if_expr,
                else_expr,
            })))
        } else {
            Some(if_expr)
        }
    }

    // ── 2-3. or / and ────────────────────────────────────────────────────────

    fn parse_or(&mut self) -> Option<Expr> {
        let mut left = self.parse_and()?;
        while self.match_keyword(Keyword::Or) {
            let right = self.parse_and()?;
            left = binop(BinaryOp::Or, left, right);
        }
        Some(left)
    }

    fn parse_and(&mut self) -> Option<Expr> {
        let mut left = self.parse_comparison()?;
        while self.match_keyword(Keyword::And) {
            let right = self.parse_comparison()?;
            left = binop(BinaryOp::And, left, right);
        }
        Some(left)
    }

    // ── 4. single comparison ─────────────────────────────────────────────────

    fn parse_comparison(&mut self) -> Option<Expr> {
        let left = self.parse_bitor()?;
        let Some(op) = self.try_consume_comparison_op() else {
            return Some(left);
        };
        let right = self.parse_bitor()?;
        if self.peek_starts_comparison() {
            self.set_error("Chained comparisons not fully supported");
            return None;
        }
        Some(binop(op, left, right))
    }

    fn try_consume_comparison_op(&mut self) -> Option<BinaryOp> {
        if self.match_operator(Operator::Eq) {
            return Some(BinaryOp::Eq);
        }
        if self.match_operator(Operator::NotEq) {
            return Some(BinaryOp::NotEq);
        }
        if self.match_operator(Operator::GtEq) {
            return Some(BinaryOp::GtEq);
        }
        if self.match_operator(Operator::LtEq) {
            return Some(BinaryOp::LtEq);
        }
        if self.match_operator(Operator::Gt) {
            return Some(BinaryOp::Gt);
        }
        if self.match_operator(Operator::Lt) {
            return Some(BinaryOp::Lt);
        }
        if self.match_keyword(Keyword::Is) {
            return Some(if self.match_keyword(Keyword::Not) {
                BinaryOp::IsNot
            } else {
                BinaryOp::Is
            });
        }
        if self.match_keyword(Keyword::In) {
            return Some(BinaryOp::In);
        }
        if self.check_keyword(Keyword::Not) && matches!(self.peek2().kind, TokenKind::Keyword(Keyword::In))
        {
            self.advance();
            self.advance();
            return Some(BinaryOp::NotIn);
        }
        None
    }

    fn peek_starts_comparison(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Operator(
                Operator::Eq
                    | Operator::NotEq
                    | Operator::Gt
                    | Operator::Lt
                    | Operator::GtEq
                    | Operator::LtEq
            )
        ) || self.check_keyword(Keyword::Is)
            || self.check_keyword(Keyword::In)
            || (self.check_keyword(Keyword::Not)
                && matches!(self.peek2().kind, TokenKind::Keyword(Keyword::In)))
    }

    // ── 5-7. bitwise ladder ──────────────────────────────────────────────────

    fn parse_bitor(&mut self) -> Option<Expr> {
        let mut left = self.parse_bitxor()?;
        while self.match_operator(Operator::BitOr) {
            let right = self.parse_bitxor()?;
            left = binop(BinaryOp::BitOr, left, right);
        }
        Some(left)
    }

    fn parse_bitxor(&mut self) -> Option<Expr> {
        let mut left = self.parse_bitand()?;
        while self.match_operator(Operator::BitXor) {
            let right = self.parse_bitand()?;
            left = binop(BinaryOp::BitXor, left, right);
        }
        Some(left)
    }

    fn parse_bitand(&mut self) -> Option<Expr> {
        let mut left = self.parse_shift()?;
        while self.match_operator(Operator::BitAnd) {
            let right = self.parse_shift()?;
            left = binop(BinaryOp::BitAnd, left, right);
        }
        Some(left)
    }

    // ── 8. shift ─────────────────────────────────────────────────────────────

    fn parse_shift(&mut self) -> Option<Expr> {
        let mut left = self.parse_additive()?;
        loop {
            let op = if self.match_operator(Operator::Shl) {
                BinaryOp::Shl
            } else if self.match_operator(Operator::Shr) {
                BinaryOp::Shr
            } else {
                break;
            };
            let right = self.parse_additive()?;
            left = binop(op, left, right);
        }
        Some(left)
    }

    // ── 9-10. additive / multiplicative ──────────────────────────────────────

    fn parse_additive(&mut self) -> Option<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let op = if self.match_operator(Operator::Add) {
                BinaryOp::Add
            } else if self.match_operator(Operator::Sub) {
                BinaryOp::Sub
            } else {
                break;
            };
            let right = self.parse_multiplicative()?;
            left = binop(op, left, right);
        }
        Some(left)
    }

    fn parse_multiplicative(&mut self) -> Option<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let op = if self.match_operator(Operator::Mul) {
                BinaryOp::Mul
            } else if self.match_operator(Operator::Div) {
                BinaryOp::Div
            } else if self.match_operator(Operator::Mod) {
                BinaryOp::Mod
            } else if self.match_operator(Operator::FloorDiv) {
                BinaryOp::FloorDiv
            } else {
                break;
            };
            let right = self.parse_unary()?;
            left = binop(op, left, right);
        }
        Some(left)
    }

    // ── 11. unary (right-recursive) ──────────────────────────────────────────

    fn parse_unary(&mut self) -> Option<Expr> {
        let op = if self.match_operator(Operator::Add) {
            Some(UnaryOp::Plus)
        } else if self.match_operator(Operator::Sub) {
            Some(UnaryOp::Neg)
        } else if self.match_operator(Operator::BitNot) {
            Some(UnaryOp::BitNot)
        } else if self.match_keyword(Keyword::Not) {
            Some(UnaryOp::Not)
        } else {
            None
        };
        match op {
            Some(op) => {
                let operand = self.parse_unary()?;
                Some(Expr::UnOp(Box::new(UnOp { op, operand })))
            }
            None => self.parse_power(),
        }
    }

    // ── 12. power (right-associative) ────────────────────────────────────────

    fn parse_power(&mut self) -> Option<Expr> {
        let base = self.parse_primary()?;
        if self.match_operator(Operator::Pow) {
            let exponent = self.parse_unary()?;
            Some(binop(BinaryOp::Pow, base, exponent))
        } else {
            Some(base)
        }
    }

    // ── 13. primary: atom + postfix ──────────────────────────────────────────

    /// `pub(super)` because `for`-loop targets are parsed at this level
    /// (see `stmt.rs`) to avoid the ambiguity of the full expression
    /// grammar swallowing the loop's `in` keyword as a comparison
    /// operator.
    pub(super) fn parse_primary(&mut self) -> Option<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            if self.check_delimiter(Delimiter::LParen) {
                expr = self.parse_call(expr)?;
            } else if self.check_delimiter(Delimiter::Dot) {
                self.advance();
                let name = self.consume_identifier("expected attribute name after '.'")?;
                expr = Expr::AttributeAccess(Box::new(AttributeAccess {
                    object: expr,
                    attribute_name: name.to_string(),
                }));
            } else if self.check_delimiter(Delimiter::LBracket) {
                expr = self.parse_subscript(expr)?;
            } else {
                break;
            }
        }
        Some(expr)
    }

    fn parse_atom(&mut self) -> Option<Expr> {
        if self.check_keyword(Keyword::Lambda) {
            self.unsupported("lambda expressions");
            return None;
        }
        match self.peek().kind {
            TokenKind::Literal(LiteralKind::Integer, text) => {
                self.advance();
                Some(Expr::Literal(Literal::Int(text.parse().unwrap_or(0))))
            }
            TokenKind::Literal(LiteralKind::Float, text) => {
                self.advance();
                Some(Expr::Literal(Literal::Float(text.parse().unwrap_or(0.0))))
            }
            TokenKind::Literal(LiteralKind::FormattedString, _) => {
                self.unsupported("f-string interpolation");
                None
            }
            TokenKind::Literal(LiteralKind::Bytes, text) => {
                self.advance();
                Some(Expr::Literal(Literal::Bytes(
                    string_literal_body(text).into_bytes(),
                )))
            }
            TokenKind::Literal(
                LiteralKind::String | LiteralKind::UnicodeString | LiteralKind::RawString,
                text,
            ) => {
                self.advance();
                Some(Expr::Literal(Literal::Str(string_literal_body(text))))
            }
            TokenKind::Keyword(Keyword::True) => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(true)))
            }
            TokenKind::Keyword(Keyword::False) => {
                self.advance();
                Some(Expr::Literal(Literal::Bool(false)))
            }
            TokenKind::Keyword(Keyword::None) => {
                self.advance();
                Some(Expr::Literal(Literal::None))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                Some(Expr::Symbol(Symbol {
                    name: name.to_string(),
                    ty: crate::ast::Type::Unknown,
                }))
            }
            TokenKind::Delimiter(Delimiter::LBracket) => self.parse_list_literal(),
            TokenKind::Delimiter(Delimiter::LBrace) => self.parse_dict_or_set_literal(),
            TokenKind::Delimiter(Delimiter::LParen) => self.parse_paren_form(),
            _ => {
                self.set_error("expected expression");
                None
            }
        }
    }

    // ── containers ───────────────────────────────────────────────────────────

    fn parse_list_literal(&mut self) -> Option<Expr> {
        self.advance(); // '['
        let mut elements = Vec::new();
        if !self.check_delimiter(Delimiter::RBracket) {
            loop {
                elements.push(self.parse_expr()?);
                if !self.match_delimiter(Delimiter::Comma) {
                    break;
                }
                if self.check_delimiter(Delimiter::RBracket) {
                    break;
                }
            }
        }
        self.consume_delimiter(Delimiter::RBracket, "expected ']' to close list literal")?;
        Some(Expr::Literal(Literal::List(elements)))
    }

    fn parse_dict_or_set_literal(&mut self) -> Option<Expr> {
        self.advance(); // '{'
        if self.match_delimiter(Delimiter::RBrace) {
            return Some(Expr::Literal(Literal::Dict {
                keys: vec![],
                values: vec![],
            }));
        }
        let first = self.parse_expr()?;
        if self.match_delimiter(Delimiter::Colon) {
            let mut keys = vec![first];
            let mut values = vec![self.parse_expr()?];
            while self.match_delimiter(Delimiter::Comma) {
                if self.check_delimiter(Delimiter::RBrace) {
                    break;
                }
                keys.push(self.parse_expr()?);
                self.consume_delimiter(Delimiter::Colon, "expected ':' in dict literal")?;
                values.push(self.parse_expr()?);
            }
            self.consume_delimiter(Delimiter::RBrace, "expected '}' to close dict literal")?;
            Some(Expr::Literal(Literal::Dict { keys, values }))
        } else {
            let mut elements = vec![first];
            while self.match_delimiter(Delimiter::Comma) {
                if self.check_delimiter(Delimiter::RBrace) {
                    break;
                }
                elements.push(self.parse_expr()?);
            }
            self.consume_delimiter(Delimiter::RBrace, "expected '}' to close set literal")?;
            Some(Expr::Literal(Literal::Set(elements)))
        }
    }

    fn parse_paren_form(&mut self) -> Option<Expr> {
        self.advance(); // '('
        if self.match_delimiter(Delimiter::RParen) {
            return Some(Expr::Literal(Literal::Tuple(vec![])));
        }
        let first = self.parse_expr()?;
        if self.check_delimiter(Delimiter::Comma) {
            let mut elements = vec![first];
            while self.match_delimiter(Delimiter::Comma) {
                if self.check_delimiter(Delimiter::RParen) {
                    break;
                }
                elements.push(self.parse_expr()?);
            }
            self.consume_delimiter(Delimiter::RParen, "expected ')' to close tuple literal")?;
            Some(Expr::Literal(Literal::Tuple(elements)))
        } else {
            self.consume_delimiter(
                Delimiter::RParen,
                "expected ')' to close parenthesized expression",
            )?;
            Some(first)
        }
    }

    // ── calls ────────────────────────────────────────────────────────────────

    fn parse_call(&mut self, callable: Expr) -> Option<Expr> {
        self.advance(); // '('
        let mut args = Vec::new();
        let mut kwarg_names = Vec::new();
        let mut kwarg_values = Vec::new();
        let mut seen_kwarg = false;
        if !self.check_delimiter(Delimiter::RParen) {
            loop {
                if self.check_operator(Operator::Mul) || self.check_operator(Operator::Pow) {
                    self.unsupported("argument unpacking");
                    return None;
                }
                let is_kwarg = self.peek_identifier().is_some()
                    && matches!(self.peek2().kind, TokenKind::Operator(Operator::Assign));
                if is_kwarg {
                    seen_kwarg = true;
                    let name = self.consume_identifier("expected keyword argument name")?;
                    self.advance(); // '='
                    let value = self.parse_expr()?;
                    kwarg_names.push(name.to_string());
                    kwarg_values.push(value);
                } else {
                    if seen_kwarg {
                        self.set_error("positional argument cannot follow keyword argument");
                        return None;
                    }
                    args.push(self.parse_expr()?);
                }
                if !self.match_delimiter(Delimiter::Comma) {
                    break;
                }
                if self.check_delimiter(Delimiter::RParen) {
                    break;
                }
            }
        }
        self.consume_delimiter(Delimiter::RParen, "expected ')' to end function call")?;
        Some(Expr::FCall(Box::new(FCall {
            callable,
            args,
            kwarg_names,
            kwarg_values,
        })))
    }

    // ── subscript / slice ────────────────────────────────────────────────────

    fn parse_subscript(&mut self, value: Expr) -> Option<Expr> {
        let is_slice = self.bracket_contains_top_level_colon();
        self.advance(); // '['
        if is_slice {
            let slice = self.parse_slice_body()?;
            self.consume_delimiter(Delimiter::RBracket, "expected ']' to close subscript")?;
            Some(Expr::Subscript(Box::new(Subscript {
                value,
                slice: SubscriptKind::Slice(Box::new(slice)),
            })))
        } else {
            let index = self.parse_expr()?;
            self.consume_delimiter(Delimiter::RBracket, "expected ']' to close subscript")?;
            Some(Expr::Subscript(Box::new(Subscript {
                value,
                slice: SubscriptKind::Index(Box::new(index)),
            })))
        }
    }

    /// `self.pos` is at the opening `[`. Scans ahead for a colon at
    /// bracket depth 1, without consuming anything, to decide slice vs
    /// plain index before committing to either parse.
    fn bracket_contains_top_level_colon(&self) -> bool {
        let mut depth = 0i32;
        let mut i = self.pos;
        loop {
            let Some(tok) = self.tokens.get(i).copied() else {
                return false;
            };
            match tok.kind {
                TokenKind::Delimiter(Delimiter::LBracket | Delimiter::LParen | Delimiter::LBrace) => {
                    depth += 1;
                }
                TokenKind::Delimiter(Delimiter::RBracket | Delimiter::RParen | Delimiter::RBrace) => {
                    depth -= 1;
                    if depth == 0 {
                        return false;
                    }
                }
                TokenKind::Delimiter(Delimiter::Colon) if depth == 1 => return true,
                TokenKind::Eof => return false,
                _ => {}
            }
            i += 1;
        }
    }

    fn parse_slice_body(&mut self) -> Option<Slice> {
        let start = if self.check_delimiter(Delimiter::Colon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.consume_delimiter(Delimiter::Colon, "expected ':' in slice")?;
        let stop = if self.check_delimiter(Delimiter::Colon) || self.check_delimiter(Delimiter::RBracket)
        {
            None
        } else {
            Some(self.parse_expr()?)
        };
        let step = if self.match_delimiter(Delimiter::Colon) {
            if self.check_delimiter(Delimiter::RBracket) {
                None
            } else {
                Some(self.parse_expr()?)
            }
        } else {
            None
        };
        Some(Slice { start, stop, step })
    }
}

fn binop(op: BinaryOp, left: Expr, right: Expr) -> Expr {
    Expr::BinOp(Box::new(BinOp { op, left, right }))
}

/// Strips a string/bytes literal's prefix letters and quote delimiters,
/// returning the raw inner text. No escape-sequence decoding is
/// performed.
fn string_literal_body(raw: &str) -> String {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    if i >= bytes.len() {
        return String::new();
    }
    let quote = bytes[i];
    let triple = bytes.get(i + 1) == Some(&quote) && bytes.get(i + 2) == Some(&quote);
    let start = if triple { i + 3 } else { i + 1 };
    let qlen = if triple { 3 } else { 1 };
    let end = bytes.len().saturating_sub(qlen);
    if end > start { raw[start..end].to_string() } else { String::new() }
}

#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::parser::parse_tokens;
    use crate::ast::{BinaryOp, Expr, Literal, Stmt};

    fn parse_expr_stmt(src: &str) -> Expr {
        let tokens = tokenize(src).unwrap();
        let source = parse_tokens(&tokens).unwrap();
        match source.decls.into_iter().next().unwrap() {
            Stmt::Expr(e) => e,
            Stmt::Assignment(a) => a.value,
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn power_is_right_associative() {
        let e = parse_expr_stmt("2 ** 3 ** 2\n");
        let Expr::BinOp(b) = e else { panic!("expected BinOp") };
        assert_eq!(b.op, BinaryOp::Pow);
        assert!(matches!(b.left, Expr::Literal(Literal::Int(2))));
        assert!(matches!(b.right, Expr::BinOp(_)));
    }

    #[test]
    fn additive_is_left_associative() {
        let e = parse_expr_stmt("1 - 2 - 3\n");
        let Expr::BinOp(outer) = e else { panic!("expected BinOp") };
        assert_eq!(outer.op, BinaryOp::Sub);
        assert!(matches!(outer.left, Expr::BinOp(_)));
        assert!(matches!(outer.right, Expr::Literal(Literal::Int(3))));
    }

    #[test]
    fn chained_comparison_rejected() {
        let tokens = tokenize("1 < 2 < 3\n").unwrap();
        let err = parse_tokens(&tokens).unwrap_err();
        assert!(err.message.contains("Chained comparisons"));
    }

    #[test]
    fn dict_vs_set_disambiguation() {
        assert!(matches!(
            parse_expr_stmt("{}\n"),
            Expr::Literal(Literal::Dict { .. })
        ));
        assert!(matches!(
            parse_expr_stmt("{1}\n"),
            Expr::Literal(Literal::Set(_))
        ));
        assert!(matches!(
            parse_expr_stmt("{1: 2}\n"),
            Expr::Literal(Literal::Dict { .. })
        ));
    }

    #[test]
    fn slice_vs_index() {
        let e = parse_expr_stmt("a[1:2]\n");
        let Expr::Subscript(s) = e else { panic!("expected Subscript") };
        assert!(matches!(s.slice, crate::ast::SubscriptKind::Slice(_)));

        let e = parse_expr_stmt("a[1]\n");
        let Expr::Subscript(s) = e else { panic!("expected Subscript") };
        assert!(matches!(s.slice, crate::ast::SubscriptKind::Index(_)));
    }

    #[test]
    fn kwargs_after_positional() {
        let e = parse_expr_stmt("f(1, x=2)\n");
        let Expr::FCall(c) = e else { panic!("expected FCall") };
        assert_eq!(c.args.len(), 1);
        assert_eq!(c.kwarg_names, vec!["x".to_string()]);
    }

    #[test]
    fn positional_after_kwarg_rejected() {
        let tokens = tokenize("f(x=1, 2)\n").unwrap();
        let err = parse_tokens(&tokens).unwrap_err();
        assert!(err.message.contains("positional argument"));
    }

    #[test]
    fn lambda_rejected() {
        let tokens = tokenize("lambda x: x\n").unwrap();
        let err = parse_tokens(&tokens).unwrap_err();
        assert!(err.message.contains("not supported"));
    }
}
