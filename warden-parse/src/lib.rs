#![forbid(unsafe_code)]

mod error;
mod parser;

use warden_lex::Lexer;

pub use error::UnsafeExpression;
pub use parser::Parser;

/// Parses untrusted predicate text into an expression tree.
///
/// This is the only way to build an [`warden_ast::Expr`] from text. Any
/// syntax outside the allow-listed grammar — calls, attribute access,
/// subscripting, string or collection literals, assignment, division,
/// unknown characters — fails with [`UnsafeExpression`].
pub fn parse_predicate(src: &str) -> Result<warden_ast::Expr, UnsafeExpression> {
    let tokens = Lexer::new(src).lex().map_err(|e| UnsafeExpression {
        message: e.message,
        span: e.span,
    })?;
    let mut parser = Parser::new(&tokens);
    parser.parse_expr_eof()
}

#[cfg(test)]
mod tests {
    use warden_ast::{BinOp, CmpOp, ExprKind, UnaryOp};

    use super::*;

    #[test]
    fn parse_precedence_mul_binds_tighter_than_add() {
        let expr = parse_predicate("1 + 2 * 3").unwrap();
        let ExprKind::Binary { op, right, .. } = &expr.kind else {
            panic!("expected binary, got {expr:?}");
        };
        assert_eq!(*op, BinOp::Add);
        assert!(matches!(
            right.kind,
            ExprKind::Binary { op: BinOp::Mul, .. }
        ));
    }

    #[test]
    fn parse_cmp_binds_tighter_than_bool_ops() {
        let expr = parse_predicate("a >= 0 and b < 10 or done").unwrap();
        let ExprKind::Binary { op, left, .. } = &expr.kind else {
            panic!("expected binary, got {expr:?}");
        };
        assert_eq!(*op, BinOp::Or);
        assert!(matches!(
            left.kind,
            ExprKind::Binary { op: BinOp::And, .. }
        ));
    }

    #[test]
    fn parse_comparison_chain() {
        let expr = parse_predicate("0 <= x < n").unwrap();
        let ExprKind::Compare { first, rest } = &expr.kind else {
            panic!("expected compare chain, got {expr:?}");
        };
        assert!(matches!(first.kind, ExprKind::IntLit(0)));
        assert_eq!(rest.len(), 2);
        assert_eq!(rest[0].0, CmpOp::Le);
        assert_eq!(rest[1].0, CmpOp::Lt);
    }

    #[test]
    fn parse_unary_and_literals() {
        let expr = parse_predicate("not -x == +1").unwrap();
        let ExprKind::Unary { op, expr: inner } = &expr.kind else {
            panic!("expected unary, got {expr:?}");
        };
        assert_eq!(*op, UnaryOp::Not);
        assert!(matches!(inner.kind, ExprKind::Compare { .. }));

        assert!(matches!(
            parse_predicate("true").unwrap().kind,
            ExprKind::BoolLit(true)
        ));
        assert!(matches!(
            parse_predicate("false").unwrap().kind,
            ExprKind::BoolLit(false)
        ));
    }

    #[test]
    fn parse_parenthesized_grouping() {
        let expr = parse_predicate("(1 + 2) * 3").unwrap();
        assert!(matches!(
            expr.kind,
            ExprKind::Binary { op: BinOp::Mul, .. }
        ));
    }

    #[test]
    fn reject_call_syntax() {
        let err = parse_predicate("abs(x) > 0").unwrap_err();
        assert!(err.message.contains("call syntax"));
    }

    #[test]
    fn reject_attribute_access() {
        let err = parse_predicate("os.system > 0").unwrap_err();
        assert!(err.message.contains("attribute access"));
    }

    #[test]
    fn reject_subscripting() {
        let err = parse_predicate("xs[0] == 1").unwrap_err();
        assert!(err.message.contains("subscripting"));
    }

    #[test]
    fn reject_string_and_collection_literals() {
        assert!(parse_predicate("x == \"s\"")
            .unwrap_err()
            .message
            .contains("string literals"));
        assert!(parse_predicate("[1, 2]")
            .unwrap_err()
            .message
            .contains("collection literals"));
    }

    #[test]
    fn reject_assignment_and_division() {
        assert!(parse_predicate("x = 1")
            .unwrap_err()
            .message
            .contains("assignment"));
        assert!(parse_predicate("x / 2 == 0")
            .unwrap_err()
            .message
            .contains("division"));
    }

    #[test]
    fn reject_unknown_characters() {
        let err = parse_predicate("x ** 2 @ 1").unwrap_err();
        assert!(err.message.contains("unexpected character"));
    }

    #[test]
    fn reject_trailing_garbage() {
        let err = parse_predicate("x > 0 y").unwrap_err();
        assert!(err.message.contains("expected end of expression"));
    }
}
