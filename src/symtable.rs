//! Scope tree / symbol table skeleton.
//!
//! The scope tree is rendered as a small arena (`Vec<Scope>` indexed by
//! [`ScopeId`]) rather than parent-owned boxes with raw parent
//! back-pointers, since `find` walks child→parent while a future
//! `collect` would walk parent→child.
//!
//! [`SymbolTable::collect`] and [`SymbolTable::resolve`] are the two
//! traversal passes that populate and refine the scope tree from an AST;
//! their algorithm is declared but intentionally left as no-ops here
//! pending a specified traversal — both are documented stubs rather than
//! a guessed implementation. `find` has no such gap: it is a plain
//! scope-chain walk fully specified regardless of how scopes come to be
//! populated, so it is implemented for real.

use std::collections::HashMap;

use crate::ast::{Expr, Source, Stmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Module,
    Class,
    Function,
    Comprehension,
    Lambda,
}

/// Index into a [`SymbolTable`]'s scope arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// A lexical region with its own symbol namespace.
///
/// `ast_node` borrows from the AST the table describes, rather than the
/// source's non-owning raw pointer — the borrow checker, not a
/// convention, is what guarantees the table cannot outlive the tree it
/// points into.
#[derive(Debug)]
pub struct Scope<'ast> {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub ast_node: Option<&'ast Stmt>,
    pub symbols: HashMap<String, Symbol<'ast>>,
    pub children: Vec<ScopeId>,
}

/// A name bound somewhere in the program.
#[derive(Debug, Clone)]
pub enum Symbol<'ast> {
    Module { definition: &'ast Stmt },
    Class { definition: &'ast Stmt },
    Function { definition: &'ast Stmt },
    Variable {
        scope_kind: ScopeKind,
        initial_value: Option<&'ast Expr>,
        first_use: Option<&'ast Expr>,
        last_use: Option<&'ast Expr>,
    },
}

/// A tree of [`Scope`]s rooted at a single `Module` scope, lifetime-tied
/// to the [`Source`] AST it describes.
#[derive(Debug)]
pub struct SymbolTable<'ast> {
    scopes: Vec<Scope<'ast>>,
}

impl<'ast> SymbolTable<'ast> {
    /// Constructs a table holding only its root `Module` scope — an
    /// empty symbol map and no children.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Module,
                parent: None,
                ast_node: None,
                symbols: HashMap::new(),
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope<'ast> {
        &self.scopes[id.0]
    }

    /// Adds a new child scope under `parent` and returns its id.
    pub fn push_scope(
        &mut self,
        parent: ScopeId,
        kind: ScopeKind,
        ast_node: Option<&'ast Stmt>,
    ) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            kind,
            parent: Some(parent),
            ast_node,
            symbols: HashMap::new(),
            children: Vec::new(),
        });
        self.scopes[parent.0].children.push(id);
        id
    }

    /// Walks `scope`'s symbol map, then each ancestor's in turn, stopping
    /// at the first match, regardless of how scopes come to be populated.
    pub fn find(&self, scope: ScopeId, name: &str) -> Option<&Symbol<'ast>> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let s = &self.scopes[id.0];
            if let Some(sym) = s.symbols.get(name) {
                return Some(sym);
            }
            current = s.parent;
        }
        None
    }

    /// Populates the scope tree by walking `ast`. Intentionally left as
    /// a no-op: its traversal algorithm is declared but not yet
    /// specified, so it is not guessed here.
    pub fn collect(&mut self, _ast: &'ast Source) {}

    /// Resolves deferred `Unknown` symbol references after `collect` has
    /// run. Unimplemented for the same reason as [`Self::collect`].
    pub fn resolve(&mut self, _ast: &'ast Source) {}
}

impl Default for SymbolTable<'_> {
    fn default() -> Self {
        Self::new()
    }
}
