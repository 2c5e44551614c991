#![forbid(unsafe_code)]

use warden_ast::{join, span_between, BinOp, CmpOp, Expr, ExprKind, Span, UnaryOp};
use warden_lex::{Token, TokenKind};

use crate::error::UnsafeExpression;

pub struct Parser<'a> {
    tokens: &'a [Token],
    idx: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self { tokens, idx: 0 }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.idx)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|t| &t.kind)
    }

    fn peek_span(&self) -> Span {
        self.peek()
            .map(|t| t.span)
            .unwrap_or_else(|| span_between(0, 0))
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == Some(&kind)
    }

    fn next(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.idx).cloned();
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }

    fn unsafe_here(&self, message: impl Into<String>) -> UnsafeExpression {
        UnsafeExpression {
            message: message.into(),
            span: self.peek_span(),
        }
    }

    pub fn parse_expr_eof(&mut self) -> Result<Expr, UnsafeExpression> {
        let expr = self.parse_expr()?;
        match self.peek_kind() {
            Some(TokenKind::Eof) | None => Ok(expr),
            Some(TokenKind::Eq) => {
                Err(self.unsafe_here("assignment is not allowed in a predicate"))
            }
            Some(TokenKind::Comma) => {
                Err(self.unsafe_here("tuple or argument syntax is not allowed in a predicate"))
            }
            Some(_) => Err(self.unsafe_here("expected end of expression")),
        }
    }

    pub fn parse_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        self.parse_or_expr()
    }

    fn parse_or_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let mut left = self.parse_and_expr()?;
        while self.at(TokenKind::KwOr) {
            self.next();
            let right = self.parse_and_expr()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op: BinOp::Or,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn parse_and_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let mut left = self.parse_cmp_expr()?;
        while self.at(TokenKind::KwAnd) {
            self.next();
            let right = self.parse_cmp_expr()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op: BinOp::And,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn cmp_op(&self) -> Option<CmpOp> {
        match self.peek_kind() {
            Some(TokenKind::EqEq) => Some(CmpOp::Eq),
            Some(TokenKind::Neq) => Some(CmpOp::Ne),
            Some(TokenKind::Lt) => Some(CmpOp::Lt),
            Some(TokenKind::Le) => Some(CmpOp::Le),
            Some(TokenKind::Gt) => Some(CmpOp::Gt),
            Some(TokenKind::Ge) => Some(CmpOp::Ge),
            _ => None,
        }
    }

    /// Comparison chains (`a < b <= c`) are part of the grammar: each pair
    /// compares left-to-right and the chain reduces with AND.
    fn parse_cmp_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let first = self.parse_add_expr()?;
        let mut rest = Vec::new();
        while let Some(op) = self.cmp_op() {
            self.next();
            let comparand = self.parse_add_expr()?;
            rest.push((op, comparand));
        }
        if rest.is_empty() {
            return Ok(first);
        }
        let span = join(first.span, rest.last().map(|(_, e)| e.span).unwrap_or(first.span));
        Ok(Expr {
            span,
            kind: ExprKind::Compare {
                first: Box::new(first),
                rest,
            },
        })
    }

    fn parse_add_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let mut left = self.parse_mul_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => Some(BinOp::Add),
                Some(TokenKind::Minus) => Some(BinOp::Sub),
                _ => None,
            };
            let Some(op) = op else { break };
            self.next();
            let right = self.parse_mul_expr()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn parse_mul_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let mut left = self.parse_unary_expr()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => Some(BinOp::Mul),
                Some(TokenKind::Percent) => Some(BinOp::Mod),
                Some(TokenKind::Slash) => {
                    return Err(
                        self.unsafe_here("division is not part of the predicate language")
                    );
                }
                _ => None,
            };
            let Some(op) = op else { break };
            self.next();
            let right = self.parse_unary_expr()?;
            let span = join(left.span, right.span);
            left = Expr {
                span,
                kind: ExprKind::Binary {
                    left: Box::new(left),
                    op,
                    right: Box::new(right),
                },
            };
        }
        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let op = match self.peek_kind() {
            Some(TokenKind::Minus) => Some(UnaryOp::Neg),
            Some(TokenKind::Plus) => Some(UnaryOp::Pos),
            Some(TokenKind::KwNot) => Some(UnaryOp::Not),
            _ => None,
        };
        if let Some(op) = op {
            let t = self.next().unwrap();
            let expr = self.parse_unary_expr()?;
            let span = join(t.span, expr.span);
            return Ok(Expr {
                span,
                kind: ExprKind::Unary {
                    op,
                    expr: Box::new(expr),
                },
            });
        }
        self.parse_primary_expr()
    }

    fn parse_primary_expr(&mut self) -> Result<Expr, UnsafeExpression> {
        let expr = match self.peek_kind() {
            Some(TokenKind::Int(_)) => {
                let t = self.next().unwrap();
                let TokenKind::Int(n) = t.kind else { unreachable!() };
                Expr {
                    span: t.span,
                    kind: ExprKind::IntLit(n),
                }
            }
            Some(TokenKind::KwTrue) => {
                let t = self.next().unwrap();
                Expr {
                    span: t.span,
                    kind: ExprKind::BoolLit(true),
                }
            }
            Some(TokenKind::KwFalse) => {
                let t = self.next().unwrap();
                Expr {
                    span: t.span,
                    kind: ExprKind::BoolLit(false),
                }
            }
            Some(TokenKind::Ident(_)) => {
                let t = self.next().unwrap();
                let TokenKind::Ident(name) = t.kind else { unreachable!() };
                Expr {
                    span: t.span,
                    kind: ExprKind::Var(name),
                }
            }
            Some(TokenKind::LParen) => {
                self.next();
                let inner = self.parse_expr()?;
                if !self.at(TokenKind::RParen) {
                    return Err(self.unsafe_here("expected ')'"));
                }
                self.next();
                inner
            }
            Some(TokenKind::Str) => {
                return Err(self.unsafe_here("string literals are not allowed in a predicate"));
            }
            Some(TokenKind::LBracket) => {
                return Err(
                    self.unsafe_here("collection literals are not allowed in a predicate")
                );
            }
            _ => {
                return Err(self.unsafe_here("expected an integer, boolean, variable, or '('"));
            }
        };

        // The grammar has no postfix forms. Name the ones untrusted input
        // is most likely to try.
        match self.peek_kind() {
            Some(TokenKind::LParen) => {
                Err(self.unsafe_here("call syntax is not allowed in a predicate"))
            }
            Some(TokenKind::Dot) => {
                Err(self.unsafe_here("attribute access is not allowed in a predicate"))
            }
            Some(TokenKind::LBracket) => {
                Err(self.unsafe_here("subscripting is not allowed in a predicate"))
            }
            _ => Ok(expr),
        }
    }
}
