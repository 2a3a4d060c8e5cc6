use crate::lang::ast::*;
use crate::lang::error::{LangError, LangResult};
use crate::lang::lexer::Lexer;
use crate::lang::token::{Span, Token, TokenKind};

/// Deepest expression tree the parser will build.
pub const MAX_DEPTH: usize = 200;

/// Pratt parser for single-variable expressions.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse one complete expression; trailing tokens are an error.
    pub fn parse_expression(&mut self) -> LangResult<Expr> {
        if self.is_at_end() {
            return Err(LangError::parse("empty expression"));
        }
        let expr = self.parse_expr(0)?;
        if !self.is_at_end() {
            let tok = self.peek();
            return Err(
                LangError::parse(format!("unexpected {:?} after expression", tok.kind))
                    .with_span(tok.span),
            );
        }
        Ok(expr)
    }

    /// Pratt parser: parse expression with given minimum binding power.
    fn parse_expr(&mut self, min_bp: u8) -> LangResult<Expr> {
        self.descend()?;
        let entry = self.depth;
        let mut lhs = self.parse_prefix()?;

        loop {
            let (op, left_bp, right_bp) = match self.peek_kind() {
                TokenKind::Plus => (BinOpKind::Add, 9, 10),
                TokenKind::Minus => (BinOpKind::Sub, 9, 10),
                TokenKind::Star => (BinOpKind::Mul, 11, 12),
                TokenKind::Slash => (BinOpKind::Div, 11, 12),
                TokenKind::SlashSlash => (BinOpKind::FloorDiv, 11, 12),
                TokenKind::Percent => (BinOpKind::Mod, 11, 12),
                // right-associative, binds tighter than unary minus on its left
                TokenKind::StarStar | TokenKind::Caret => (BinOpKind::Pow, 16, 15),
                _ => break,
            };

            if left_bp < min_bp {
                break;
            }

            self.advance(); // consume operator
            // each chained operator deepens the left spine by one
            self.descend()?;
            let rhs = self.parse_expr(right_bp)?;
            let span = lhs.span().merge(rhs.span());
            lhs = Expr::BinOp {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
                span,
            };
        }

        self.depth = entry - 1;
        Ok(lhs)
    }

    /// Parse prefix expression (atom or unary operator).
    fn parse_prefix(&mut self) -> LangResult<Expr> {
        self.descend()?;
        let expr = self.parse_atom_or_unary();
        self.depth -= 1;
        expr
    }

    fn parse_atom_or_unary(&mut self) -> LangResult<Expr> {
        match self.peek_kind() {
            TokenKind::Number(n) => {
                let span = self.advance().span;
                Ok(Expr::Number(n, span))
            }
            TokenKind::Ident(name) => {
                let span = self.advance().span;
                if self.peek_kind() == TokenKind::LParen {
                    self.parse_call(name, span)
                } else {
                    Ok(Expr::Ident(name, span))
                }
            }
            TokenKind::LParen => self.parse_grouped(),
            TokenKind::Minus | TokenKind::Plus => {
                let tok = self.advance();
                let op = if tok.kind == TokenKind::Minus {
                    UnaryOpKind::Neg
                } else {
                    UnaryOpKind::Pos
                };
                let operand = self.parse_expr(13)?; // unary binds tighter than * but looser than **
                let span = tok.span.merge(operand.span());
                Ok(Expr::UnaryOp {
                    op,
                    operand: Box::new(operand),
                    span,
                })
            }
            _ => {
                let tok = self.peek();
                Err(LangError::parse(format!(
                    "expected expression, found {:?}",
                    tok.kind
                ))
                .with_span(tok.span))
            }
        }
    }

    fn parse_grouped(&mut self) -> LangResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let expr = self.parse_expr(0)?;
        self.expect(TokenKind::RParen)?;
        Ok(expr)
    }

    fn parse_call(&mut self, name: String, start: Span) -> LangResult<Expr> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::new();

        if self.peek_kind() != TokenKind::RParen {
            args.push(self.parse_expr(0)?);
            while self.peek_kind() == TokenKind::Comma {
                self.advance();
                if self.peek_kind() == TokenKind::RParen {
                    break;
                }
                args.push(self.parse_expr(0)?);
            }
        }

        let end = self.expect(TokenKind::RParen)?.span;
        Ok(Expr::Call {
            name,
            args,
            span: start.merge(end),
        })
    }

    fn descend(&mut self) -> LangResult<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(LangError::parse("expression nested too deeply").with_span(self.peek().span));
        }
        Ok(())
    }

    // --- Token helpers ---

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind.clone()
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind) -> LangResult<Token> {
        let tok = self.peek().clone();
        if std::mem::discriminant(&tok.kind) == std::mem::discriminant(&kind) {
            Ok(self.advance())
        } else {
            Err(LangError::parse(format!(
                "expected {:?}, found {:?}",
                kind, tok.kind
            ))
            .with_span(tok.span))
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.tokens[self.pos].kind, TokenKind::Eof)
    }
}

/// Tokenize and parse `source` in one step.
pub fn parse(source: &str) -> LangResult<Expr> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(tokens).parse_expression()
}
