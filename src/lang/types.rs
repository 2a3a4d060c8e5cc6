use crate::lang::error::LangResult;
use std::fmt;

/// What a name in the evaluation context resolves to.
#[derive(Debug, Clone)]
pub enum Binding {
    /// Numeric constant or the bound free variable.
    Value(f64),
    /// A callable builtin.
    Function(Builtin),
}

impl Binding {
    pub fn type_name(&self) -> &'static str {
        match self {
            Binding::Value(_) => "number",
            Binding::Function(_) => "function",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Range(usize, usize),
}

impl Arity {
    pub fn accepts(&self, n: usize) -> bool {
        match self {
            Arity::Exact(expected) => n == *expected,
            Arity::Range(min, max) => n >= *min && n <= *max,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Range(min, max) if *max == usize::MAX => write!(f, "at least {}", min),
            Arity::Range(min, max) => write!(f, "{} to {}", min, max),
        }
    }
}

/// A built-in function pointer taking the whole argument list.
pub type BuiltinFnPtr = fn(&[f64]) -> LangResult<f64>;

/// Function pointer shapes; the caller checks arity before dispatch.
#[derive(Clone, Copy)]
pub enum BuiltinFn {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
    Nary(BuiltinFnPtr),
}

impl BuiltinFn {
    pub fn call(&self, args: &[f64]) -> LangResult<f64> {
        match self {
            BuiltinFn::Unary(f) => Ok(f(args[0])),
            BuiltinFn::Binary(f) => Ok(f(args[0], args[1])),
            BuiltinFn::Nary(f) => f(args),
        }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin>")
    }
}
