use thiserror::Error;

use crate::ast::Pos;

/// A syntax error anchored to the source position of the offending token.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{pos}: {kind}")]
pub struct SyntaxError {
    pub pos: Pos,
    pub kind: SyntaxErrorKind,
}

impl SyntaxError {
    pub(crate) fn new(pos: Pos, kind: SyntaxErrorKind) -> Self {
        SyntaxError { pos, kind }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxErrorKind {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("{} literal has no digits", base_name(*.base))]
    LiteralNoDigits { base: u32 },
    #[error("invalid digit {digit:?} in {} literal", base_name(*.base))]
    InvalidDigit { base: u32, digit: char },
    #[error("unexpected token {text:?}")]
    UnexpectedToken { text: String },
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected ')'")]
    ExpectedRParen,
    #[error("unexpected {text:?} after expression")]
    TrailingToken { text: String },
}

/// Errors raised while evaluating a parsed tree. These depend on the
/// environment rather than the source text, so they carry no position.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("undeclared variable {0:?}")]
    UndeclaredVariable(String),
    #[error("undeclared function {0:?}")]
    UndeclaredFunction(String),
    #[error("too few arguments to call {0:?}")]
    TooFewArguments(String),
    #[error("too many arguments to call {0:?}")]
    TooManyArguments(String),
    #[error("the {} parameter of function {name:?} is not a number", ordinal(*.nth))]
    ParamNotNumber { name: String, nth: usize },
    #[error("the variadic parameter of function {0:?} is not a number")]
    VariadicNotNumber(String),
    #[error("function {0:?} must return a value")]
    NoReturnValue(String),
    #[error("function {0:?} must return only one value")]
    TooManyReturnValues(String),
    #[error("function {0:?} must return a number")]
    ReturnNotNumber(String),
    #[error("function {name:?} failed: {reason}")]
    Function { name: String, reason: String },
}

/// Union of the two error families, returned by the [`Calc`](crate::Calc)
/// façade which both parses and evaluates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

fn base_name(base: u32) -> &'static str {
    match base {
        2 => "binary",
        8 => "octal",
        16 => "hexadecimal",
        _ => "unknown",
    }
}

fn ordinal(n: usize) -> String {
    match n {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        _ => format!("{n}th"),
    }
}
