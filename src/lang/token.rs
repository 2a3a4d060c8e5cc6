/// Source location span (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Ident(String),

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    SlashSlash, // //
    StarStar,   // **
    Caret,
    Percent,

    // Delimiters
    LParen,
    RParen,
    Comma,

    Eof,
}

impl TokenKind {
    /// Whether this token can appear as the last token before implicit multiplication.
    pub fn can_end_implicit_mul(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::RParen
        )
    }

    /// Whether this token can appear as the first token after implicit multiplication.
    pub fn can_start_implicit_mul(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen
        )
    }
}
