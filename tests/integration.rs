//! End-to-end tests of the public `pyfront::parse` entry point: a set
//! of concrete parse scenarios, plus representative rejections of every
//! unsupported construct.

use pyfront::ast::{
    AssignOp, BinaryOp, ClassMember, ElseBranch, Expr, Literal, Stmt, SubscriptKind, Type,
};

fn parse_ok(src: &str) -> pyfront::ast::Source {
    pyfront::parse(src).unwrap_or_else(|e| panic!("expected parse to succeed, got: {e}"))
}

fn parse_err(src: &str) -> String {
    pyfront::parse(src).unwrap_err().to_string()
}

// ── concrete parse scenarios ─────────────────────────────────────────────────

#[test]
fn scenario_1_simple_assignment() {
    let source = parse_ok("x = 1\n");
    let Stmt::Assignment(a) = &source.decls[0] else {
        panic!("expected assignment")
    };
    let Expr::Symbol(target) = &a.target else {
        panic!("expected symbol target")
    };
    assert_eq!(target.name, "x");
    assert_eq!(a.op, AssignOp::Assign);
    assert_eq!(a.ty, Type::Unknown);
    assert!(matches!(&a.value, Expr::Literal(Literal::Int(1))));
}

#[test]
fn scenario_2_function_with_types() {
    let source = parse_ok("def f(a: int, b: int = 2) -> int:\n    return a + b\n");
    let Stmt::Function(f) = &source.decls[0] else {
        panic!("expected function")
    };
    assert_eq!(f.name, "f");
    assert_eq!(f.return_type, Type::Int);
    assert_eq!(f.params[0].name, "a");
    assert_eq!(f.params[0].ty, Type::Int);
    assert!(f.params[0].default_value.is_none());
    assert_eq!(f.params[1].name, "b");
    assert!(matches!(
        &f.params[1].default_value,
        Some(Expr::Literal(Literal::Int(2)))
    ));
    assert_eq!(f.body.stmts.len(), 1);
    let Stmt::Return(r) = &f.body.stmts[0] else {
        panic!("expected return")
    };
    let Some(Expr::BinOp(b)) = &r.value else {
        panic!("expected binop")
    };
    assert_eq!(b.op, BinaryOp::Add);
}

#[test]
fn scenario_3_power_right_associative() {
    let source = parse_ok("x = 2 ** 3 ** 2\n");
    let Stmt::Assignment(a) = &source.decls[0] else {
        panic!("expected assignment")
    };
    let Expr::BinOp(outer) = &a.value else {
        panic!("expected binop")
    };
    assert_eq!(outer.op, BinaryOp::Pow);
    assert!(matches!(&outer.left, Expr::Literal(Literal::Int(2))));
    let Expr::BinOp(inner) = &outer.right else {
        panic!("expected nested binop")
    };
    assert_eq!(inner.op, BinaryOp::Pow);
}

#[test]
fn scenario_4_class_rebucketing() {
    let source = parse_ok(
        "class A(B):\n    n: int = 0\n    def m(self):\n        pass\n",
    );
    let Stmt::Class(c) = &source.decls[0] else {
        panic!("expected class")
    };
    assert_eq!(c.name, "A");
    assert_eq!(c.bases.len(), 1);
    assert!(matches!(&c.bases[0], Expr::Symbol(s) if s.name == "B"));
    assert_eq!(c.attributes.len(), 1);
    let ClassMember::Attribute(attr) = &c.attributes[0] else {
        panic!("expected attribute")
    };
    assert_eq!(attr.name, "n");
    assert_eq!(attr.ty, Type::Int);
    assert!(matches!(
        &attr.initial_value,
        Some(Expr::Literal(Literal::Int(0)))
    ));
    assert_eq!(c.functions.len(), 1);
    assert_eq!(c.functions[0].name, "m");
    assert_eq!(c.functions[0].params[0].name, "self");
    assert!(matches!(&c.functions[0].body.stmts[0], Stmt::Pass));
}

#[test]
fn scenario_5_call_with_kwargs() {
    let source = parse_ok("f(1, x=2)\n");
    let Stmt::Expr(Expr::FCall(call)) = &source.decls[0] else {
        panic!("expected call expression statement")
    };
    assert!(matches!(&call.callable, Expr::Symbol(s) if s.name == "f"));
    assert_eq!(call.args.len(), 1);
    assert!(matches!(&call.args[0], Expr::Literal(Literal::Int(1))));
    assert_eq!(call.kwarg_names, vec!["x".to_string()]);
    assert!(matches!(
        &call.kwarg_values[0],
        Expr::Literal(Literal::Int(2))
    ));
}

#[test]
fn scenario_6_chained_comparison_rejected() {
    let msg = parse_err("1 < 2 < 3\n");
    assert!(msg.contains("Chained comparisons not fully supported"));
}

#[test]
fn scenario_7_unindent_mismatch() {
    let msg = parse_err("if True:\n    x = 1\n  y = 2\n");
    assert!(msg.contains("Unindent does not match any outer indentation level"));
}

// ── additional parser invariants ─────────────────────────────────────────────

#[test]
fn additive_is_left_associative() {
    let source = parse_ok("x = 1 - 2 - 3\n");
    let Stmt::Assignment(a) = &source.decls[0] else {
        panic!("expected assignment")
    };
    let Expr::BinOp(outer) = &a.value else {
        panic!("expected binop")
    };
    assert_eq!(outer.op, BinaryOp::Sub);
    assert!(matches!(&outer.left, Expr::BinOp(_)));
    assert!(matches!(&outer.right, Expr::Literal(Literal::Int(3))));
}

#[test]
fn if_elif_else_lowers_right_leaning() {
    let source = parse_ok("if a:\n    pass\nelif b:\n    pass\nelse:\n    pass\n");
    let Stmt::If(top) = &source.decls[0] else {
        panic!("expected if")
    };
    let Some(ElseBranch::Elif(elif)) = &top.else_branch else {
        panic!("expected elif in chain")
    };
    assert!(matches!(&elif.else_branch, Some(ElseBranch::Else(_))));
}

#[test]
fn dict_vs_set_disambiguation() {
    assert!(matches!(
        parse_decl_expr("{}\n"),
        Expr::Literal(Literal::Dict { .. })
    ));
    assert!(matches!(
        parse_decl_expr("{1}\n"),
        Expr::Literal(Literal::Set(_))
    ));
    assert!(matches!(
        parse_decl_expr("{1: 2}\n"),
        Expr::Literal(Literal::Dict { .. })
    ));
}

#[test]
fn slice_vs_plain_index() {
    let Expr::Subscript(s) = parse_decl_expr("a[1:2]\n") else {
        panic!("expected subscript")
    };
    assert!(matches!(s.slice, SubscriptKind::Slice(_)));
    let Expr::Subscript(s) = parse_decl_expr("a[1]\n") else {
        panic!("expected subscript")
    };
    assert!(matches!(s.slice, SubscriptKind::Index(_)));
}

fn parse_decl_expr(src: &str) -> Expr {
    let source = parse_ok(src);
    match source.decls.into_iter().next().unwrap() {
        Stmt::Expr(e) => e,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

// ── unsupported-construct rejections ─────────────────────────────────────────

#[test]
fn fstring_interpolation_rejected() {
    let msg = parse_err("x = f\"hi {name}\"\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn decorator_arguments_rejected() {
    let msg = parse_err("@app.route(\"/x\")\ndef f():\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn lambda_body_rejected() {
    let msg = parse_err("f = lambda x: x\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn with_statement_rejected() {
    let msg = parse_err("with open(\"f\") as fh:\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn try_statement_rejected() {
    let msg = parse_err("try:\n    pass\nexcept:\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn raise_statement_rejected() {
    let msg = parse_err("raise ValueError()\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn yield_statement_rejected() {
    let msg = parse_err("def gen():\n    yield 1\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn del_statement_rejected() {
    let msg = parse_err("del x\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn global_statement_rejected() {
    let msg = parse_err("def f():\n    global x\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn nonlocal_statement_rejected() {
    let msg = parse_err("def f():\n    nonlocal x\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn varargs_rejected() {
    let msg = parse_err("def f(*args):\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn kwvarargs_rejected() {
    let msg = parse_err("def f(**kwargs):\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn star_import_rejected() {
    let msg = parse_err("from os.path import *\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn chained_comparison_rejected_again() {
    let msg = parse_err("a < b < c\n");
    assert!(msg.contains("Chained comparisons"));
}

#[test]
fn generic_type_annotation_rejected() {
    let msg = parse_err("def f(x: List[int]):\n    pass\n");
    assert!(msg.contains("not supported"));
}

#[test]
fn complex_class_body_target_rejected() {
    let msg = parse_err("class A:\n    self.x = 1\n");
    assert!(msg.contains("not supported") || msg.contains("complex assignment targets"));
}

#[test]
fn argument_unpacking_rejected() {
    let msg = parse_err("f(*args)\n");
    assert!(msg.contains("not supported"));
}
