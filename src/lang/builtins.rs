use crate::lang::env::MathContext;
use crate::lang::error::{LangError, LangResult};
use crate::lang::types::*;
use std::f64::consts;

/// Names of built-in mathematical constants.
pub const BUILTIN_CONSTANTS: &[(&str, f64)] = &[
    ("pi", consts::PI),
    ("e", consts::E),
    ("tau", consts::TAU),
    ("inf", f64::INFINITY),
    ("nan", f64::NAN),
];

/// Register all built-in functions and constants into the context.
pub fn register_builtins(ctx: &mut MathContext) {
    for &(name, value) in BUILTIN_CONSTANTS {
        ctx.set_constant(name, value);
    }

    for &(name, f) in MATH_UNARY {
        ctx.set_function(Builtin {
            name,
            arity: Arity::Exact(1),
            func: BuiltinFn::Unary(f),
        });
    }

    for &(name, f) in MATH_BINARY {
        ctx.set_function(Builtin {
            name,
            arity: Arity::Exact(2),
            func: BuiltinFn::Binary(f),
        });
    }

    for &(name, arity, f) in MATH_NARY {
        ctx.set_function(Builtin {
            name,
            arity,
            func: BuiltinFn::Nary(f),
        });
    }
}

/// Call a builtin, enforcing its arity and turning NaN or overflow into errors.
pub fn call_builtin(builtin: &Builtin, args: &[f64]) -> LangResult<f64> {
    if !builtin.arity.accepts(args.len()) {
        return Err(LangError::arity(format!(
            "{}: expected {} arguments, got {}",
            builtin.name,
            builtin.arity,
            args.len()
        )));
    }
    let value = builtin.func.call(args)?;
    check_result(builtin.name, args, value)
}

/// NaN from non-NaN inputs is a domain error; infinity from finite inputs is a range error.
pub fn check_result(name: &str, args: &[f64], value: f64) -> LangResult<f64> {
    if value.is_nan() && !args.iter().any(|a| a.is_nan()) {
        return Err(LangError::domain(format!("{}: math domain error", name)));
    }
    if value.is_infinite() && args.iter().all(|a| a.is_finite()) {
        return Err(LangError::range(format!("{}: math range error", name)));
    }
    Ok(value)
}

// --- Math unary functions ---

const MATH_UNARY: &[(&str, fn(f64) -> f64)] = &[
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("asin", f64::asin),
    ("acos", f64::acos),
    ("atan", f64::atan),
    ("sinh", f64::sinh),
    ("cosh", f64::cosh),
    ("tanh", f64::tanh),
    ("asinh", f64::asinh),
    ("acosh", f64::acosh),
    ("atanh", f64::atanh),
    ("exp", f64::exp),
    ("exp2", f64::exp2),
    ("expm1", f64::exp_m1),
    ("sqrt", f64::sqrt),
    ("cbrt", f64::cbrt),
    ("fabs", f64::abs),
    ("abs", f64::abs),
    ("floor", f64::floor),
    ("ceil", f64::ceil),
    ("trunc", f64::trunc),
    ("degrees", f64::to_degrees),
    ("radians", f64::to_radians),
];

const MATH_BINARY: &[(&str, fn(f64, f64) -> f64)] = &[
    ("atan2", f64::atan2),
    ("hypot", f64::hypot),
    ("copysign", f64::copysign),
    ("fmod", fmod),
    ("pow", f64::powf),
];

const MATH_NARY: &[(&str, Arity, BuiltinFnPtr)] = &[
    ("log", Arity::Range(1, 2), builtin_log),
    ("log10", Arity::Exact(1), builtin_log10),
    ("log2", Arity::Exact(1), builtin_log2),
    ("log1p", Arity::Exact(1), builtin_log1p),
    ("factorial", Arity::Exact(1), builtin_factorial),
    ("round", Arity::Range(1, 2), builtin_round),
    ("min", Arity::Range(2, usize::MAX), builtin_min),
    ("max", Arity::Range(2, usize::MAX), builtin_max),
];

fn fmod(x: f64, y: f64) -> f64 {
    x % y
}

fn positive_arg(name: &str, x: f64) -> LangResult<f64> {
    if x <= 0.0 {
        Err(LangError::domain(format!("{}: math domain error", name)))
    } else {
        Ok(x)
    }
}

/// `log(x)` is the natural log; `log(x, base)` divides by `ln(base)`.
fn builtin_log(args: &[f64]) -> LangResult<f64> {
    let x = positive_arg("log", args[0])?;
    match args.get(1) {
        None => Ok(x.ln()),
        Some(&base) => {
            let base = positive_arg("log", base)?;
            if base == 1.0 {
                return Err(LangError::division_by_zero("log: base 1 has zero logarithm"));
            }
            Ok(x.ln() / base.ln())
        }
    }
}

fn builtin_log10(args: &[f64]) -> LangResult<f64> {
    Ok(positive_arg("log10", args[0])?.log10())
}

fn builtin_log2(args: &[f64]) -> LangResult<f64> {
    Ok(positive_arg("log2", args[0])?.log2())
}

fn builtin_log1p(args: &[f64]) -> LangResult<f64> {
    if args[0] <= -1.0 {
        return Err(LangError::domain("log1p: math domain error"));
    }
    Ok(args[0].ln_1p())
}

fn builtin_factorial(args: &[f64]) -> LangResult<f64> {
    let n = args[0];
    if n < 0.0 || n.fract() != 0.0 {
        return Err(LangError::domain(
            "factorial: only accepts non-negative integral values",
        ));
    }
    // Past 170! the product overflows f64 and the result check reports a range error.
    let mut acc: f64 = 1.0;
    let mut k = 2.0;
    while k <= n && acc.is_finite() {
        acc *= k;
        k += 1.0;
    }
    Ok(acc)
}

/// Round half to even, optionally to `ndigits` decimal places.
fn builtin_round(args: &[f64]) -> LangResult<f64> {
    let x = args[0];
    match args.get(1) {
        None => Ok(x.round_ties_even()),
        Some(&digits) => {
            if digits.fract() != 0.0 {
                return Err(LangError::type_err("round: ndigits must be an integer"));
            }
            let scale = 10f64.powi(digits as i32);
            if !scale.is_finite() || scale == 0.0 {
                return Ok(x);
            }
            Ok((x * scale).round_ties_even() / scale)
        }
    }
}

fn builtin_max(args: &[f64]) -> LangResult<f64> {
    Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

fn builtin_min(args: &[f64]) -> LangResult<f64> {
    Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::error::ErrorKind;

    fn call(name: &str, args: &[f64]) -> LangResult<f64> {
        let ctx = MathContext::standard();
        match ctx.get(name) {
            Some(Binding::Function(b)) => call_builtin(b, args),
            other => panic!("{} is not a function: {:?}", name, other),
        }
    }

    #[test]
    fn test_standard_table_has_constants_and_functions() {
        let ctx = MathContext::standard();
        assert!(matches!(ctx.get("pi"), Some(Binding::Value(v)) if *v == consts::PI));
        assert!(matches!(ctx.get("sin"), Some(Binding::Function(_))));
        assert!(ctx.get("__import__").is_none());
        assert!(ctx.get("x").is_none());
    }

    #[test]
    fn test_unary_and_binary() {
        assert_eq!(call("sqrt", &[16.0]).unwrap(), 4.0);
        assert_eq!(call("hypot", &[3.0, 4.0]).unwrap(), 5.0);
        assert_eq!(call("degrees", &[consts::PI]).unwrap(), 180.0);
    }

    #[test]
    fn test_log_variants() {
        assert!((call("log", &[consts::E]).unwrap() - 1.0).abs() < 1e-12);
        assert!((call("log", &[8.0, 2.0]).unwrap() - 3.0).abs() < 1e-12);
        assert_eq!(call("log", &[0.0]).unwrap_err().kind, ErrorKind::MathDomain);
        assert_eq!(call("log10", &[-1.0]).unwrap_err().kind, ErrorKind::MathDomain);
        assert_eq!(
            call("log", &[2.0, 1.0]).unwrap_err().kind,
            ErrorKind::DivisionByZero
        );
    }

    #[test]
    fn test_domain_and_range_errors() {
        assert_eq!(call("sqrt", &[-1.0]).unwrap_err().kind, ErrorKind::MathDomain);
        assert_eq!(call("acos", &[2.0]).unwrap_err().kind, ErrorKind::MathDomain);
        assert_eq!(call("exp", &[1000.0]).unwrap_err().kind, ErrorKind::MathRange);
        assert_eq!(call("fmod", &[1.0, 0.0]).unwrap_err().kind, ErrorKind::MathDomain);
    }

    #[test]
    fn test_arity_checked() {
        assert_eq!(call("sin", &[]).unwrap_err().kind, ErrorKind::ArityError);
        assert_eq!(call("max", &[1.0]).unwrap_err().kind, ErrorKind::ArityError);
        assert_eq!(call("max", &[1.0, 5.0, 3.0]).unwrap(), 5.0);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(call("round", &[2.5]).unwrap(), 2.0);
        assert_eq!(call("round", &[3.5]).unwrap(), 4.0);
        assert!((call("round", &[1.2345, 2.0]).unwrap() - 1.23).abs() < 1e-12);
    }

    #[test]
    fn test_factorial() {
        assert_eq!(call("factorial", &[5.0]).unwrap(), 120.0);
        assert_eq!(call("factorial", &[0.0]).unwrap(), 1.0);
        assert_eq!(call("factorial", &[2.5]).unwrap_err().kind, ErrorKind::MathDomain);
        assert_eq!(call("factorial", &[200.0]).unwrap_err().kind, ErrorKind::MathRange);
    }

    #[test]
    fn test_nan_input_passes_through() {
        assert!(call("sin", &[f64::NAN]).unwrap().is_nan());
    }
}
