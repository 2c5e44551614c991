#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use miette::SourceSpan;

pub type Span = SourceSpan;

pub fn span(start: usize, len: usize) -> Span {
    SourceSpan::new(start.into(), len)
}

pub fn span_between(start: usize, end: usize) -> Span {
    debug_assert!(end >= start);
    span(start, end - start)
}

pub fn join(a: Span, b: Span) -> Span {
    let start = a.offset().min(b.offset());
    let end = (a.offset() + a.len()).max(b.offset() + b.len());
    span_between(start, end)
}

/// A predicate or assignment right-hand side: a closed tree over the
/// restricted expression grammar. There is no variant for calls, attribute
/// access, subscripting or any other host-language syntax, so such syntax
/// cannot reach the evaluator.
#[derive(Clone, Debug, PartialEq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExprKind {
    IntLit(i64),
    BoolLit(bool),
    Var(String),
    Unary {
        op: UnaryOp,
        expr: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinOp,
        right: Box<Expr>,
    },
    /// `a < b <= c`: each adjacent pair compares left-to-right and the
    /// chain reduces with logical AND.
    Compare {
        first: Box<Expr>,
        rest: Vec<(CmpOp, Expr)>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Mod,

    And,
    Or,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Expr {
    /// Names of all variables referenced anywhere in the expression.
    pub fn variables(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut BTreeSet<String>) {
        match &self.kind {
            ExprKind::IntLit(_) | ExprKind::BoolLit(_) => {}
            ExprKind::Var(name) => {
                out.insert(name.clone());
            }
            ExprKind::Unary { expr, .. } => expr.collect_variables(out),
            ExprKind::Binary { left, right, .. } => {
                left.collect_variables(out);
                right.collect_variables(out);
            }
            ExprKind::Compare { first, rest } => {
                first.collect_variables(out);
                for (_, comparand) in rest {
                    comparand.collect_variables(out);
                }
            }
        }
    }
}

/// A program in the tiny statement language. Programs are not written in
/// source text; they are constructed from specification files, and that
/// construction is the single point where untrusted shapes are validated.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Assign(AssignStmt),
    If(IfStmt),
    While(WhileStmt),
}

/// One `assign` record. Targets are applied in order, one step each; the
/// order is the spec file's object order.
#[derive(Clone, Debug, PartialEq)]
pub struct AssignStmt {
    pub targets: Vec<(String, Expr)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct IfStmt {
    pub cond: Expr,
    pub then_block: Vec<Stmt>,
    pub else_block: Vec<Stmt>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WhileStmt {
    pub cond: Expr,
    pub body: Vec<Stmt>,
}
