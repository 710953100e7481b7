//! Statement grammar: declarations, control flow, assignment forms, and
//! explicit rejections of unsupported constructs.
//!
//! Covers import/class/def declarations, if/elif/else lowered to a
//! right-leaning chain, for/while loops, return/pass/break/continue, and
//! the plain and annotated assignment forms. `with`, `try`, `raise`,
//! `yield`, `del`, `global`, `nonlocal`, star-imports, and `*args`/
//! `**kwargs` are recognized only far enough to report a dedicated
//! "not supported" error.

use super::Parser;
use crate::ast::{
    Assignment, AssignOp, Attribute, Class, ClassMember, Decorator, ElseBranch, For, Function,
    If, Import, ImportSymbol, Parameter, Return, Stmt,
};
use crate::lexer::token::{Delimiter, Keyword, Kind, Operator};

impl<'t, 'src> Parser<'t, 'src> {
    /// Top-level and nested-body declaration: decorators, import/class/def,
    /// or a fallthrough to plain statement.
    pub(super) fn parse_declaration(&mut self) -> Option<Stmt> {
        if self.check_delimiter(Delimiter::At) {
            let decorators = self.parse_decorators()?;
            return self.parse_decorated(decorators);
        }
        if self.check_keyword(Keyword::Import) {
            return self.parse_import();
        }
        if self.check_keyword(Keyword::From) {
            return self.parse_from_import();
        }
        if self.check_keyword(Keyword::Class) {
            return self.parse_class(Vec::new());
        }
        if self.check_keyword(Keyword::Def) {
            return self.parse_function(Vec::new());
        }
        self.parse_statement()
    }

    fn parse_decorators(&mut self) -> Option<Vec<Decorator>> {
        let mut decorators = Vec::new();
        while self.match_delimiter(Delimiter::At) {
            let name = self.parse_dotted_name()?;
            if self.check_delimiter(Delimiter::LParen) {
                self.unsupported("decorator arguments");
                return None;
            }
            decorators.push(Decorator { name });
            self.consume_stmt_terminator()?;
            self.skip_trivia_within_body();
        }
        Some(decorators)
    }

    fn parse_decorated(&mut self, decorators: Vec<Decorator>) -> Option<Stmt> {
        if self.check_keyword(Keyword::Class) {
            self.parse_class(decorators)
        } else if self.check_keyword(Keyword::Def) {
            self.parse_function(decorators)
        } else {
            self.set_error("decorators may only be applied to a class or function definition");
            None
        }
    }

    fn skip_trivia_within_body(&mut self) {
        while matches!(self.peek().kind(), Kind::Newline) {
            self.advance();
        }
    }

    // ── import ───────────────────────────────────────────────────────────────

    fn parse_import(&mut self) -> Option<Stmt> {
        self.advance(); // 'import'
        let name = self.parse_dotted_name()?;
        let alias = self.parse_optional_alias()?;
        self.consume_stmt_terminator()?;
        Some(Stmt::Import(Import {
            name,
            alias,
            symbols: Vec::new(),
        }))
    }

    fn parse_from_import(&mut self) -> Option<Stmt> {
        self.advance(); // 'from'
        let name = self.parse_dotted_name()?;
        self.consume_keyword(Keyword::Import, "expected 'import' after module name")?;
        if self.check_operator(Operator::Mul) {
            self.unsupported("star-imports");
            return None;
        }
        let mut symbols = Vec::new();
        loop {
            let sym_name = self.consume_identifier("expected imported symbol name")?;
            let sym_alias = self.parse_optional_alias()?;
            symbols.push(ImportSymbol {
                name: sym_name.to_string(),
                alias: sym_alias,
            });
            if !self.match_delimiter(Delimiter::Comma) {
                break;
            }
            if matches!(self.peek().kind(), Kind::Newline | Kind::Eof) {
                break;
            }
        }
        self.consume_stmt_terminator()?;
        Some(Stmt::Import(Import {
            name,
            alias: None,
            symbols,
        }))
    }

    fn parse_dotted_name(&mut self) -> Option<String> {
        let mut name = self.consume_identifier("expected module name")?.to_string();
        while self.check_delimiter(Delimiter::Dot) {
            self.advance();
            let part = self.consume_identifier("expected name after '.'")?;
            name.push('.');
            name.push_str(part);
        }
        Some(name)
    }

    fn parse_optional_alias(&mut self) -> Option<Option<String>> {
        if self.match_keyword(Keyword::As) {
            let alias = self.consume_identifier("expected alias name after 'as'")?;
            Some(Some(alias.to_string()))
        } else {
            Some(None)
        }
    }

    // ── class ────────────────────────────────────────────────────────────────

    fn parse_class(&mut self, decorators: Vec<Decorator>) -> Option<Stmt> {
        self.advance(); // 'class'
        let name = self.consume_identifier("expected class name")?.to_string();
        let mut bases = Vec::new();
        if self.match_delimiter(Delimiter::LParen) {
            if !self.check_delimiter(Delimiter::RParen) {
                loop {
                    bases.push(self.parse_expr()?);
                    if !self.match_delimiter(Delimiter::Comma) {
                        break;
                    }
                    if self.check_delimiter(Delimiter::RParen) {
                        break;
                    }
                }
            }
            self.consume_delimiter(Delimiter::RParen, "expected ')' to close base class list")?;
        }
        self.consume_delimiter(Delimiter::Colon, "expected ':' to start class body")?;
        let body = self.parse_body()?;

        let mut attributes = Vec::new();
        let mut functions = Vec::new();
        for stmt in body.stmts {
            match stmt {
                Stmt::Function(f) => functions.push(f),
                Stmt::Class(c) => attributes.push(ClassMember::NestedClass(Box::new(c))),
                Stmt::Assignment(a) => {
                    let Some(target_name) = bare_name_target(&a.target) else {
                        self.set_error(
                            "complex assignment targets inside class bodies are not supported",
                        );
                        return None;
                    };
                    attributes.push(ClassMember::Attribute(Attribute {
                        name: target_name,
                        ty: a.ty,
                        initial_value: Some(a.value),
                    }));
                }
                Stmt::Pass => {}
                Stmt::Expr(crate::ast::Expr::Literal(crate::ast::Literal::Str(_))) => {}
                _ => {
                    self.set_error("unsupported statement inside class body");
                    return None;
                }
            }
        }

        Some(Stmt::Class(Class {
            name,
            bases,
            attributes,
            functions,
            decorators,
        }))
    }

    // ── function ─────────────────────────────────────────────────────────────

    fn parse_function(&mut self, decorators: Vec<Decorator>) -> Option<Stmt> {
        self.advance(); // 'def'
        let name = self.consume_identifier("expected function name")?.to_string();
        self.consume_delimiter(Delimiter::LParen, "expected '(' after function name")?;
        let params = self.parse_parameters()?;
        self.consume_delimiter(Delimiter::RParen, "expected ')' to close parameter list")?;
        let return_type = if self.match_delimiter(Delimiter::Arrow) {
            self.parse_type_annotation()?
        } else {
            crate::ast::Type::Unknown
        };
        self.consume_delimiter(Delimiter::Colon, "expected ':' to start function body")?;
        let body = self.parse_body()?;
        Some(Stmt::Function(Function {
            name,
            params,
            body,
            return_type,
            decorators,
        }))
    }

    fn parse_parameters(&mut self) -> Option<Vec<Parameter>> {
        let mut params = Vec::new();
        let mut seen_default = false;
        if self.check_delimiter(Delimiter::RParen) {
            return Some(params);
        }
        loop {
            if self.check_operator(Operator::Mul) || self.check_operator(Operator::Pow) {
                self.unsupported("*args/**kwargs parameters");
                return None;
            }
            let name = self.consume_identifier("expected parameter name")?.to_string();
            let ty = if self.match_delimiter(Delimiter::Colon) {
                self.parse_type_annotation()?
            } else {
                crate::ast::Type::Unknown
            };
            let default_value = if self.match_operator(Operator::Assign) {
                seen_default = true;
                Some(self.parse_expr()?)
            } else {
                if seen_default {
                    self.set_error("non-default parameter cannot follow a default parameter");
                    return None;
                }
                None
            };
            params.push(Parameter {
                name,
                ty,
                default_value,
            });
            if !self.match_delimiter(Delimiter::Comma) {
                break;
            }
            if self.check_delimiter(Delimiter::RParen) {
                break;
            }
        }
        Some(params)
    }

    fn parse_type_annotation(&mut self) -> Option<crate::ast::Type> {
        let name = self.consume_identifier("expected type annotation")?;
        if self.check_delimiter(Delimiter::LBracket) {
            self.unsupported("generic type annotations");
            return None;
        }
        Some(crate::ast::name_to_type(name))
    }

    // ── body / suite ─────────────────────────────────────────────────────────

    pub(super) fn parse_body(&mut self) -> Option<crate::ast::Body> {
        self.consume_stmt_terminator_newline_only()?;
        if !self.match_kind(Kind::Indent) {
            // An EOF-terminated body with no statements is accepted.
            if self.is_at_end() {
                return Some(crate::ast::Body::default());
            }
            self.set_error("expected an indented block");
            return None;
        }
        let mut stmts = Vec::new();
        loop {
            while matches!(self.peek().kind(), Kind::Newline) {
                self.advance();
            }
            if self.check_kind(Kind::Dedent) || self.is_at_end() {
                break;
            }
            let stmt = self.parse_declaration()?;
            stmts.push(stmt);
        }
        if self.check_kind(Kind::Dedent) {
            self.advance();
        }
        Some(crate::ast::Body { stmts })
    }

    fn consume_stmt_terminator_newline_only(&mut self) -> Option<()> {
        if self.check_kind(Kind::Newline) {
            self.advance();
            Some(())
        } else {
            self.set_error("expected newline after ':'");
            None
        }
    }

    fn match_kind(&mut self, kind: Kind) -> bool {
        if self.check_kind(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── statement ────────────────────────────────────────────────────────────

    fn parse_statement(&mut self) -> Option<Stmt> {
        if self.check_keyword(Keyword::If) {
            return self.parse_if();
        }
        if self.check_keyword(Keyword::For) {
            return self.parse_for();
        }
        if self.check_keyword(Keyword::While) {
            return self.parse_while();
        }
        if self.check_keyword(Keyword::Def) {
            return self.parse_function(Vec::new());
        }
        if self.check_keyword(Keyword::Class) {
            return self.parse_class(Vec::new());
        }
        for (kw, name) in [
            (Keyword::With, "with"),
            (Keyword::Try, "try"),
            (Keyword::Raise, "raise"),
            (Keyword::Yield, "yield"),
            (Keyword::Del, "del"),
            (Keyword::Global, "global"),
            (Keyword::Nonlocal, "nonlocal"),
        ] {
            if self.check_keyword(kw) {
                self.unsupported(name);
                return None;
            }
        }
        if self.match_keyword(Keyword::Return) {
            let value = if matches!(self.peek().kind(), Kind::Newline | Kind::Dedent | Kind::Eof)
            {
                None
            } else {
                Some(self.parse_expr()?)
            };
            self.consume_stmt_terminator()?;
            return Some(Stmt::Return(Return { value }));
        }
        if self.match_keyword(Keyword::Pass) {
            self.consume_stmt_terminator()?;
            return Some(Stmt::Pass);
        }
        if self.match_keyword(Keyword::Break) {
            self.consume_stmt_terminator()?;
            return Some(Stmt::Break);
        }
        if self.match_keyword(Keyword::Continue) {
            self.consume_stmt_terminator()?;
            return Some(Stmt::Continue);
        }

        let stmt = self.parse_expr_or_assignment_statement()?;
        if self.check_delimiter(Delimiter::Semicolon) {
            self.unsupported("multiple statements on one line separated by ';'");
            return None;
        }
        self.consume_stmt_terminator()?;
        Some(stmt)
    }

    fn parse_expr_or_assignment_statement(&mut self) -> Option<Stmt> {
        let target = self.parse_expr()?;

        if self.match_delimiter(Delimiter::Colon) {
            let ty = self.parse_type_annotation()?;
            if !matches!(
                target,
                crate::ast::Expr::Symbol(_)
                    | crate::ast::Expr::AttributeAccess(_)
                    | crate::ast::Expr::Subscript(_)
            ) {
                self.set_error("invalid target for annotated assignment");
                return None;
            }
            self.consume_operator(
                Operator::Assign,
                "annotated assignment requires a plain '=' right-hand side",
            )?;
            let value = self.parse_expr()?;
            return Some(Stmt::Assignment(Assignment {
                target,
                value,
                op: AssignOp::Assign,
                ty,
            }));
        }

        if let Some(op) = self.try_consume_assign_op() {
            let value = self.parse_expr()?;
            return Some(Stmt::Assignment(Assignment {
                target,
                value,
                op,
                ty: crate::ast::Type::Unknown,
            }));
        }

        Some(Stmt::Expr(target))
    }

    fn try_consume_assign_op(&mut self) -> Option<AssignOp> {
        let pairs = [
            (Operator::Assign, AssignOp::Assign),
            (Operator::AddAssign, AssignOp::AddAssign),
            (Operator::SubAssign, AssignOp::SubAssign),
            (Operator::MulAssign, AssignOp::MulAssign),
            (Operator::DivAssign, AssignOp::DivAssign),
            (Operator::ModAssign, AssignOp::ModAssign),
            (Operator::FloorDivAssign, AssignOp::FloorDivAssign),
            (Operator::PowAssign, AssignOp::PowAssign),
            (Operator::BitAndAssign, AssignOp::BitAndAssign),
            (Operator::BitOrAssign, AssignOp::BitOrAssign),
            (Operator::BitXorAssign, AssignOp::BitXorAssign),
            (Operator::ShlAssign, AssignOp::ShlAssign),
            (Operator::ShrAssign, AssignOp::ShrAssign),
        ];
        for (op, assign_op) in pairs {
            if self.match_operator(op) {
                return Some(assign_op);
            }
        }
        None
    }

    // ── if / elif / else ─────────────────────────────────────────────────────

    fn parse_if(&mut self) -> Option<Stmt> {
        self.advance(); // 'if'
        let condition = self.parse_expr()?;
        self.consume_delimiter(Delimiter::Colon, "expected ':' after if condition")?;
        let body = self.parse_body()?;
        let else_branch = self.parse_elif_or_else()?;
        Some(Stmt::If(If {
            condition,
            body,
            else_branch,
        }))
    }

    fn parse_elif_or_else(&mut self) -> Option<Option<ElseBranch>> {
        if self.match_keyword(Keyword::Elif) {
            let condition = self.parse_expr()?;
            self.consume_delimiter(Delimiter::Colon, "expected ':' after elif condition")?;
            let body = self.parse_body()?;
            let nested_else = self.parse_elif_or_else()?;
            return Some(Some(ElseBranch::Elif(Box::new(If {
                condition,
                body,
                else_branch: nested_else,
            }))));
        }
        if self.match_keyword(Keyword::Else) {
            self.consume_delimiter(Delimiter::Colon, "expected ':' after else")?;
            let body = self.parse_body()?;
            return Some(Some(ElseBranch::Else(body)));
        }
        Some(None)
    }

    // ── for / while ──────────────────────────────────────────────────────────

    fn parse_for(&mut self) -> Option<Stmt> {
        self.advance(); // 'for'
        let target = self.parse_primary()?;
        self.consume_keyword(Keyword::In, "expected 'in' after for-loop target")?;
        let cond = self.parse_expr()?;
        self.consume_delimiter(Delimiter::Colon, "expected ':' after for-loop iterable")?;
        let body = self.parse_body()?;
        Some(Stmt::For(For {
            is_while: false,
            target: Some(target),
            cond,
            body,
        }))
    }

    fn parse_while(&mut self) -> Option<Stmt> {
        self.advance(); // 'while'
        let cond = self.parse_expr()?;
        self.consume_delimiter(Delimiter::Colon, "expected ':' after while condition")?;
        let body = self.parse_body()?;
        Some(Stmt::For(For {
            is_while: true,
            target: None,
            cond,
            body,
        }))
    }
}

/// Extracts the bare name from an assignment target that is a plain
/// `Symbol`, for class-body attribute re-bucketing. Any other target
/// shape (attribute access, subscript) is an unsupported complex target
/// inside a class body.
fn bare_name_target(target: &crate::ast::Expr) -> Option<String> {
    match target {
        crate::ast::Expr::Symbol(s) => Some(s.name.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ElseBranch, Stmt, Type};
    use crate::lexer::tokenize;
    use crate::parser::parse_tokens;

    fn parse_ok(src: &str) -> crate::ast::Source {
        let tokens = tokenize(src).unwrap();
        parse_tokens(&tokens).unwrap()
    }

    fn parse_err(src: &str) -> String {
        let tokens = tokenize(src).unwrap();
        parse_tokens(&tokens).unwrap_err().message
    }

    #[test]
    fn simple_assignment() {
        let source = parse_ok("x = 1\n");
        let Stmt::Assignment(a) = &source.decls[0] else {
            panic!("expected assignment")
        };
        assert_eq!(a.ty, Type::Unknown);
    }

    #[test]
    fn function_with_annotated_params_and_return() {
        let source = parse_ok("def f(a: int, b: int = 2) -> int:\n    return a + b\n");
        let Stmt::Function(f) = &source.decls[0] else {
            panic!("expected function")
        };
        assert_eq!(f.name, "f");
        assert_eq!(f.return_type, Type::Int);
        assert_eq!(f.params.len(), 2);
        assert_eq!(f.params[0].ty, Type::Int);
        assert!(f.params[0].default_value.is_none());
        assert!(f.params[1].default_value.is_some());
    }

    #[test]
    fn class_rebuckets_attributes_and_functions() {
        let source = parse_ok(
            "class A(B):\n    n: int = 0\n    def m(self):\n        pass\n",
        );
        let Stmt::Class(c) = &source.decls[0] else {
            panic!("expected class")
        };
        assert_eq!(c.name, "A");
        assert_eq!(c.bases.len(), 1);
        assert_eq!(c.attributes.len(), 1);
        assert_eq!(c.functions.len(), 1);
        assert_eq!(c.functions[0].name, "m");
    }

    #[test]
    fn class_body_docstring_and_pass_discarded() {
        let source = parse_ok("class A:\n    \"\"\"doc\"\"\"\n    pass\n    x = 1\n");
        let Stmt::Class(c) = &source.decls[0] else {
            panic!("expected class")
        };
        assert_eq!(c.attributes.len(), 1);
        assert_eq!(c.functions.len(), 0);
    }

    #[test]
    fn class_body_complex_target_rejected() {
        let err = parse_err("class A:\n    self.x = 1\n");
        assert!(err.contains("complex assignment targets"));
    }

    #[test]
    fn if_elif_else_lowers_right_leaning() {
        let source = parse_ok("if a:\n    x = 1\nelif b:\n    x = 2\nelse:\n    x = 3\n");
        let Stmt::If(top) = &source.decls[0] else {
            panic!("expected if")
        };
        let Some(ElseBranch::Elif(elif)) = &top.else_branch else {
            panic!("expected elif chain")
        };
        assert!(matches!(&elif.else_branch, Some(ElseBranch::Else(_))));
    }

    #[test]
    fn for_loop_shape() {
        let source = parse_ok("for i in range(10):\n    pass\n");
        let Stmt::For(f) = &source.decls[0] else {
            panic!("expected for")
        };
        assert!(!f.is_while);
        assert!(f.target.is_some());
    }

    #[test]
    fn while_loop_shape() {
        let source = parse_ok("while True:\n    pass\n");
        let Stmt::For(f) = &source.decls[0] else {
            panic!("expected for/while node")
        };
        assert!(f.is_while);
        assert!(f.target.is_none());
    }

    #[test]
    fn import_forms() {
        let source = parse_ok("import os.path as p\n");
        let Stmt::Import(i) = &source.decls[0] else {
            panic!("expected import")
        };
        assert_eq!(i.name, "os.path");
        assert_eq!(i.alias.as_deref(), Some("p"));
    }

    #[test]
    fn from_import_with_symbols() {
        let source = parse_ok("from a.b import c, d as e\n");
        let Stmt::Import(i) = &source.decls[0] else {
            panic!("expected import")
        };
        assert_eq!(i.name, "a.b");
        assert_eq!(i.symbols.len(), 2);
        assert_eq!(i.symbols[1].alias.as_deref(), Some("e"));
    }

    #[test]
    fn star_import_rejected() {
        let err = parse_err("from os.path import *\n");
        assert!(err.contains("not supported"));
    }

    #[test]
    fn decorator_attaches_to_def() {
        let source = parse_ok("@staticmethod\ndef f():\n    pass\n");
        let Stmt::Function(f) = &source.decls[0] else {
            panic!("expected function")
        };
        assert_eq!(f.decorators.len(), 1);
        assert_eq!(f.decorators[0].name, "staticmethod");
    }

    #[test]
    fn decorator_arguments_rejected() {
        let err = parse_err("@app.route(\"/x\")\ndef f():\n    pass\n");
        assert!(err.contains("not supported") || err.contains("attribute"));
    }

    #[test]
    fn decorator_on_non_def_rejected() {
        let err = parse_err("@staticmethod\nx = 1\n");
        assert!(err.contains("decorators may only be applied"));
    }

    #[test]
    fn non_default_after_default_rejected() {
        let err = parse_err("def f(a=1, b):\n    pass\n");
        assert!(err.contains("non-default parameter"));
    }

    #[test]
    fn varargs_rejected() {
        let err = parse_err("def f(*args):\n    pass\n");
        assert!(err.contains("not supported"));
    }

    #[test]
    fn semicolon_multi_statement_rejected() {
        let err = parse_err("x = 1; y = 2\n");
        assert!(err.contains("not supported"));
    }

    #[test]
    fn with_statement_rejected() {
        let err = parse_err("with open(\"f\"):\n    pass\n");
        assert!(err.contains("not supported"));
    }

    #[test]
    fn body_ending_at_eof_is_accepted() {
        let source = parse_ok("def f():\n    return 1");
        let Stmt::Function(f) = &source.decls[0] else {
            panic!("expected function")
        };
        assert_eq!(f.body.stmts.len(), 1);
    }

    #[test]
    fn augmented_assignment() {
        let source = parse_ok("x += 1\n");
        let Stmt::Assignment(a) = &source.decls[0] else {
            panic!("expected assignment")
        };
        assert_eq!(a.op, crate::ast::AssignOp::AddAssign);
    }

    #[test]
    fn annotated_assignment_sets_type() {
        let source = parse_ok("x: int = 1\n");
        let Stmt::Assignment(a) = &source.decls[0] else {
            panic!("expected assignment")
        };
        assert_eq!(a.ty, Type::Int);
    }
}
