use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use log::debug;

use crate::ast::token::{Token, TokenKind};
use crate::ast::Expr;
use crate::error::EvalError;

/// Variable bindings: name to value.
pub type Vars = HashMap<String, f64>;

/// Function bindings: name to callable.
pub type Funcs = HashMap<String, Function>;

type NativeFn = Arc<dyn Fn(&[f64]) -> Result<f64, String> + Send + Sync>;

/// The kind of a callable's parameter or return value. Only `Number` is
/// legal anywhere in a registered function's signature; the other kinds
/// exist so hosts can describe foreign callables and have validation name
/// exactly what is wrong with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Number,
    Integer,
    Boolean,
    Text,
}

/// Call shape of a registered function: fixed parameter kinds, an optional
/// trailing variadic parameter, and the kinds of its return values.
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
    pub params: Vec<ValueKind>,
    pub variadic: Option<ValueKind>,
    pub results: Vec<ValueKind>,
}

impl Signature {
    /// A fixed-arity, all-numeric signature with a single numeric result.
    pub fn numeric(arity: usize) -> Self {
        Signature {
            params: vec![ValueKind::Number; arity],
            variadic: None,
            results: vec![ValueKind::Number],
        }
    }

    /// Like [`Signature::numeric`], plus a trailing numeric variadic
    /// parameter accepting zero or more extra arguments.
    pub fn numeric_variadic(required: usize) -> Self {
        Signature {
            variadic: Some(ValueKind::Number),
            ..Signature::numeric(required)
        }
    }
}

/// A host-registered callable: a call-shape descriptor plus the native
/// closure to invoke. The descriptor is what validation inspects, so an
/// illegal shape is rejected before the closure ever runs.
#[derive(Clone)]
pub struct Function {
    signature: Signature,
    body: NativeFn,
}

impl Function {
    /// Registers a fixed-arity numeric function.
    pub fn new<F>(arity: usize, body: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Function::with_signature(Signature::numeric(arity), body)
    }

    /// Registers a numeric function taking `required` fixed arguments and
    /// any number of extra ones.
    pub fn variadic<F>(required: usize, body: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Function::with_signature(Signature::numeric_variadic(required), body)
    }

    /// Registers a callable with an explicit signature. The signature is
    /// validated at call time (or by [`Env::check_funcs`]), not here.
    pub fn with_signature<F>(signature: Signature, body: F) -> Self
    where
        F: Fn(&[f64]) -> Result<f64, String> + Send + Sync + 'static,
    {
        Function {
            signature,
            body: Arc::new(body),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Validates the call shape: every fixed parameter numeric, the variadic
    /// element (if any) numeric, exactly one numeric return value.
    pub fn check(&self, name: &str) -> Result<(), EvalError> {
        for (index, kind) in self.signature.params.iter().enumerate() {
            if *kind != ValueKind::Number {
                return Err(EvalError::ParamNotNumber {
                    name: name.to_string(),
                    nth: index + 1,
                });
            }
        }
        if matches!(self.signature.variadic, Some(kind) if kind != ValueKind::Number) {
            return Err(EvalError::VariadicNotNumber(name.to_string()));
        }
        match self.signature.results.as_slice() {
            [] => Err(EvalError::NoReturnValue(name.to_string())),
            [ValueKind::Number] => Ok(()),
            [_] => Err(EvalError::ReturnNotNumber(name.to_string())),
            _ => Err(EvalError::TooManyReturnValues(name.to_string())),
        }
    }

    fn invoke(&self, name: &str, args: &[f64]) -> Result<f64, EvalError> {
        (self.body)(args).map_err(|reason| EvalError::Function {
            name: name.to_string(),
            reason,
        })
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// The caller-supplied environment an expression tree is evaluated against.
/// Evaluation only reads it; sharing one environment across threads is safe
/// as long as nobody mutates it concurrently.
#[derive(Debug, Clone, Default)]
pub struct Env {
    pub vars: Vars,
    pub funcs: Funcs,
}

impl Env {
    pub fn new() -> Self {
        Env::default()
    }

    /// Eagerly validates every registered function, returning the first
    /// shape violation. The per-call lazy validation catches the same
    /// problems; this lets a host fail fast at registration time instead.
    pub fn check_funcs(&self) -> Result<(), EvalError> {
        for (name, func) in &self.funcs {
            func.check(name)?;
        }
        Ok(())
    }
}

impl Expr {
    /// Computes the tree's numeric value against `env`.
    ///
    /// Operands evaluate left before right and call arguments in order, so
    /// side effects of host functions happen in source order. Arithmetic
    /// follows IEEE-754: division by zero and invalid `pow` domains produce
    /// infinities or NaN rather than errors.
    pub fn value(&self, env: &Env) -> Result<f64, EvalError> {
        match self {
            Expr::Literal(token) => Ok(literal_value(token)),
            Expr::Variable(name) => env
                .vars
                .get(name)
                .copied()
                .ok_or_else(|| EvalError::UndeclaredVariable(name.clone())),
            Expr::Unary { op, operand } => Ok(op.apply(operand.value(env)?)),
            Expr::Binary { op, left, right } => {
                let l = left.value(env)?;
                let r = right.value(env)?;
                Ok(op.apply(l, r))
            }
            Expr::Call { name, args } => {
                let func = env
                    .funcs
                    .get(name)
                    .ok_or_else(|| EvalError::UndeclaredFunction(name.clone()))?;
                func.check(name)?;

                let required = func.signature.params.len();
                if args.len() < required {
                    return Err(EvalError::TooFewArguments(name.clone()));
                }
                if args.len() > required && func.signature.variadic.is_none() {
                    return Err(EvalError::TooManyArguments(name.clone()));
                }

                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(arg.value(env)?);
                }
                debug!("calling {name}({values:?})");
                func.invoke(name, &values)
            }
        }
    }
}

/// Decodes a literal token's text into its numeric value. The lexer has
/// already vetted every digit, so decoding cannot fail; oversized radix
/// literals lose precision the same way any large f64 does.
fn literal_value(token: &Token) -> f64 {
    match token.kind {
        TokenKind::Integer | TokenKind::Float => token.text.parse().unwrap_or(f64::NAN),
        TokenKind::BinLiteral => fold_digits(&token.text[2..], 2),
        TokenKind::HexLiteral => fold_digits(&token.text[2..], 16),
        TokenKind::OctLiteral => {
            // Either 0o17-style or the bare 0755 form.
            let digits = match token.text.as_bytes().get(1) {
                Some(b'o' | b'O') => &token.text[2..],
                _ => &token.text[1..],
            };
            fold_digits(digits, 8)
        }
        _ => f64::NAN,
    }
}

fn fold_digits(digits: &str, base: u32) -> f64 {
    digits
        .chars()
        .filter_map(|ch| ch.to_digit(base))
        .fold(0.0, |acc, digit| acc * f64::from(base) + f64::from(digit))
}
