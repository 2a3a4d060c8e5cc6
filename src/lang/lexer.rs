use crate::lang::error::{LangError, LangResult};
use crate::lang::token::{Span, Token, TokenKind};

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> LangResult<Vec<Token>> {
        while !self.is_at_end() {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            let token = self.next_token()?;
            // Insert implicit multiplication if applicable
            if let Some(prev) = self.tokens.last() {
                if prev.kind.can_end_implicit_mul() && token.kind.can_start_implicit_mul() {
                    // An identifier directly followed by '(' is a call. Adjacent names or
                    // adjacent literals (`x y`, `1 2`) stay a syntax error.
                    let is_func_call = matches!(&prev.kind, TokenKind::Ident(_))
                        && matches!(&token.kind, TokenKind::LParen);
                    let is_juxtaposed = matches!(
                        (&prev.kind, &token.kind),
                        (TokenKind::Ident(_), TokenKind::Ident(_) | TokenKind::Number(_))
                            | (TokenKind::Number(_), TokenKind::Number(_))
                    );
                    if !is_func_call && !is_juxtaposed {
                        let span = Span::new(prev.span.end, token.span.start);
                        self.tokens.push(Token::new(TokenKind::Star, span));
                    }
                }
            }
            self.tokens.push(token);
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        Ok(self.tokens)
    }

    fn next_token(&mut self) -> LangResult<Token> {
        let start = self.pos;
        let ch = self.advance();

        match ch {
            '+' => Ok(Token::new(TokenKind::Plus, Span::new(start, self.pos))),
            '-' => Ok(Token::new(TokenKind::Minus, Span::new(start, self.pos))),
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    Ok(Token::new(TokenKind::StarStar, Span::new(start, self.pos)))
                } else {
                    Ok(Token::new(TokenKind::Star, Span::new(start, self.pos)))
                }
            }
            '/' => {
                if self.peek() == Some('/') {
                    self.advance();
                    Ok(Token::new(TokenKind::SlashSlash, Span::new(start, self.pos)))
                } else {
                    Ok(Token::new(TokenKind::Slash, Span::new(start, self.pos)))
                }
            }
            '^' => Ok(Token::new(TokenKind::Caret, Span::new(start, self.pos))),
            '%' => Ok(Token::new(TokenKind::Percent, Span::new(start, self.pos))),
            '(' => Ok(Token::new(TokenKind::LParen, Span::new(start, self.pos))),
            ')' => Ok(Token::new(TokenKind::RParen, Span::new(start, self.pos))),
            ',' => Ok(Token::new(TokenKind::Comma, Span::new(start, self.pos))),
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => self.read_number(start),
            c if c.is_ascii_digit() => self.read_number(start),
            c if is_ident_start(c) => self.read_identifier(start),
            // Unicode math operators
            '\u{00D7}' => Ok(Token::new(TokenKind::Star, Span::new(start, self.pos))), // ×
            '\u{00F7}' => Ok(Token::new(TokenKind::Slash, Span::new(start, self.pos))), // ÷
            '\u{22C5}' => Ok(Token::new(TokenKind::Star, Span::new(start, self.pos))), // ⋅
            '\u{2212}' => Ok(Token::new(TokenKind::Minus, Span::new(start, self.pos))), // −
            _ => Err(
                LangError::lex(format!("unexpected character: '{}'", ch))
                    .with_span(Span::new(start, self.pos)),
            ),
        }
    }

    fn read_number(&mut self, start: usize) -> LangResult<Token> {
        self.read_digits();

        if self.peek() == Some('.') {
            self.advance();
            self.read_digits();
        }

        // Scientific notation, only when an exponent actually follows: `2e` is `2 * e`.
        if matches!(self.peek(), Some('e') | Some('E')) {
            let sign = usize::from(matches!(self.peek_at(1), Some('+') | Some('-')));
            if self.peek_at(1 + sign).is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
                if sign == 1 {
                    self.advance();
                }
                self.read_digits();
            }
        }

        let text: String = self.source[start..self.pos]
            .iter()
            .filter(|c| **c != '_')
            .collect();
        let val: f64 = text.parse().map_err(|_| {
            LangError::lex(format!("invalid number: {}", text)).with_span(Span::new(start, self.pos))
        })?;
        Ok(Token::new(TokenKind::Number(val), Span::new(start, self.pos)))
    }

    fn read_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self, start: usize) -> LangResult<Token> {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        Ok(Token::new(TokenKind::Ident(text), Span::new(start, self.pos)))
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn advance(&mut self) -> char {
        let ch = self.source[self.pos];
        self.pos += 1;
        ch
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
