use crate::lang::token::Span;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct LangError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Option<Span>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    NameError,
    ArityError,
    TypeError,
    DivisionByZero,
    /// Argument outside the function's domain (`sqrt(-1)`, `log(0)`).
    MathDomain,
    /// Finite arguments produced an infinite result (`exp(1000)`).
    MathRange,
}

impl LangError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn lex(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::LexError, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError, message)
    }

    pub fn name(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NameError, message)
    }

    pub fn arity(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ArityError, message)
    }

    pub fn type_err(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::TypeError, message)
    }

    pub fn division_by_zero(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DivisionByZero, message)
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MathDomain, message)
    }

    pub fn range(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MathRange, message)
    }

    /// Whether the failure comes from the source text rather than from evaluation.
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::LexError | ErrorKind::ParseError)
    }
}

impl fmt::Display for LangError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)?;
        if let Some(span) = self.span {
            write!(f, " (at {}..{})", span.start, span.end)?;
        }
        Ok(())
    }
}

impl std::error::Error for LangError {}

pub type LangResult<T> = Result<T, LangError>;
