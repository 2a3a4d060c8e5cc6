use crate::lang::ast::*;
use crate::lang::builtins::{call_builtin, check_result};
use crate::lang::env::MathContext;
use crate::lang::error::{LangError, LangResult};
use crate::lang::token::Span;
use crate::lang::types::Binding;

/// Name of the free variable bound at each sample.
pub const FREE_VARIABLE: &str = "x";

/// The tree-walking evaluator.
///
/// Borrows its context; the free variable is supplied per call and shadows
/// any context binding of the same name.
pub struct Evaluator<'a> {
    context: &'a MathContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a MathContext) -> Self {
        Self { context }
    }

    /// Evaluate `expr` with the free variable bound to `x`.
    pub fn eval(&self, expr: &Expr, x: f64) -> LangResult<f64> {
        match expr {
            Expr::Number(n, _) => Ok(*n),

            Expr::Ident(name, span) => {
                if name == FREE_VARIABLE {
                    return Ok(x);
                }
                match self.context.get(name) {
                    Some(Binding::Value(v)) => Ok(*v),
                    Some(Binding::Function(f)) => Err(LangError::type_err(format!(
                        "{} is a function and must be called",
                        f.name
                    ))
                    .with_span(*span)),
                    None => Err(
                        LangError::name(format!("name '{}' is not defined", name)).with_span(*span)
                    ),
                }
            }

            Expr::BinOp {
                op, lhs, rhs, span, ..
            } => {
                let left = self.eval(lhs, x)?;
                let right = self.eval(rhs, x)?;
                eval_binop(*op, left, right, *span)
            }

            Expr::UnaryOp { op, operand, .. } => {
                let val = self.eval(operand, x)?;
                Ok(match op {
                    UnaryOpKind::Neg => -val,
                    UnaryOpKind::Pos => val,
                })
            }

            Expr::Call { name, args, span } => {
                let builtin = match self.context.get(name) {
                    Some(Binding::Function(f)) => f,
                    Some(other) if name != FREE_VARIABLE => {
                        return Err(LangError::type_err(format!(
                            "'{}' is a {} and is not callable",
                            name,
                            other.type_name()
                        ))
                        .with_span(*span))
                    }
                    _ if name == FREE_VARIABLE => {
                        return Err(LangError::type_err(format!(
                            "'{}' is a number and is not callable",
                            name
                        ))
                        .with_span(*span))
                    }
                    _ => {
                        return Err(LangError::name(format!("name '{}' is not defined", name))
                            .with_span(*span))
                    }
                };

                let mut arg_vals = Vec::with_capacity(args.len());
                for arg in args {
                    arg_vals.push(self.eval(arg, x)?);
                }
                call_builtin(builtin, &arg_vals).map_err(|e| e.with_span(*span))
            }
        }
    }
}

fn eval_binop(op: BinOpKind, a: f64, b: f64, span: Span) -> LangResult<f64> {
    match op {
        BinOpKind::Add => Ok(a + b),
        BinOpKind::Sub => Ok(a - b),
        BinOpKind::Mul => Ok(a * b),
        BinOpKind::Div => {
            if b == 0.0 {
                return Err(LangError::division_by_zero("float division by zero").with_span(span));
            }
            Ok(a / b)
        }
        BinOpKind::FloorDiv => {
            if b == 0.0 {
                return Err(
                    LangError::division_by_zero("float floor division by zero").with_span(span)
                );
            }
            Ok((a / b).floor())
        }
        BinOpKind::Mod => {
            if b == 0.0 {
                return Err(LangError::division_by_zero("float modulo by zero").with_span(span));
            }
            // Result takes the sign of the divisor.
            let r = a % b;
            if r != 0.0 && (r < 0.0) != (b < 0.0) {
                Ok(r + b)
            } else {
                Ok(r)
            }
        }
        BinOpKind::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(LangError::division_by_zero(
                    "0.0 cannot be raised to a negative power",
                )
                .with_span(span));
            }
            check_result("**", &[a, b], a.powf(b)).map_err(|e| e.with_span(span))
        }
    }
}
