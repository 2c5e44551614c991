#![forbid(unsafe_code)]

use miette::Diagnostic;
use thiserror::Error;
use warden_ast::Span;

/// Predicate text used syntax outside the allow-listed expression grammar.
///
/// This is a security boundary: predicate text comes from untrusted
/// specification files, and anything the grammar does not recognize is
/// rejected here, before evaluation, never silently evaluated.
#[derive(Debug, Error, Diagnostic)]
#[error("unsafe expression: {message}")]
#[diagnostic(code(warden::unsafe_expr))]
pub struct UnsafeExpression {
    pub message: String,
    #[label]
    pub span: Span,
}
