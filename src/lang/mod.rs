//! Single-variable expression language: lexer, Pratt parser and evaluator
//! over an explicit [`MathContext`](env::MathContext).

pub mod ast;
pub mod builtins;
pub mod env;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;
pub mod types;

pub use env::MathContext;
pub use error::{ErrorKind, LangError, LangResult};
pub use eval::{Evaluator, FREE_VARIABLE};
pub use parser::parse;
