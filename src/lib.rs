//! A layout-sensitive lexer and recursive-descent parser for a Python-3
//! subset, producing a fully-typed AST and a (skeleton) hierarchical
//! symbol table for later semantic analysis.
//!
//! The pipeline is synchronous and single-threaded, leaves first:
//!
//! ```text
//! source &str -> lexer::tokenize -> Token[] -> parser::parse_tokens -> ast::Source
//! ```
//!
//! # Usage
//!
//! ```
//! use pyfront::ast::{Stmt, Expr, Literal};
//!
//! let source = pyfront::parse("x = 1\n").unwrap();
//! assert!(matches!(&source.decls[0], Stmt::Assignment(a) if matches!(&a.value, Expr::Literal(Literal::Int(1)))));
//! ```
//!
//! Most callers only need [`parse`]. The per-phase entry points
//! ([`lexer::tokenize`], [`parser::parse_tokens`]) are exposed for
//! callers that want to inspect the token stream directly, or that
//! already have one from elsewhere.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod symtable;

pub use error::Error;
pub use parser::parse;
