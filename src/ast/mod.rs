use std::collections::BTreeSet;

mod evaluator;
mod lexer;
mod parser;
mod token;

pub use evaluator::{Env, Funcs, Function, Signature, ValueKind, Vars};
pub use parser::Parser;
pub use token::{Pos, Token, TokenKind};

/// A parsed expression tree.
///
/// Trees are immutable once built and hold no environment state, so a single
/// tree may be evaluated any number of times, against different environments,
/// and shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric literal; the value is decoded from the token's text and
    /// base at evaluation time.
    Literal(Token),
    /// A name resolved against the environment's variable bindings.
    Variable(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// A call to a host-registered function with ordered argument subtrees.
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    /// Collects the sorted, deduplicated names of every variable the tree
    /// references, so a host can populate the environment before evaluating.
    pub fn var_names(&self) -> Vec<String> {
        let mut names = BTreeSet::new();
        self.collect_vars(&mut names);
        names.into_iter().map(str::to_string).collect()
    }

    fn collect_vars<'a>(&'a self, names: &mut BTreeSet<&'a str>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Variable(name) => {
                names.insert(name);
            }
            Expr::Unary { operand, .. } => operand.collect_vars(names),
            Expr::Binary { left, right, .. } => {
                left.collect_vars(names);
                right.collect_vars(names);
            }
            Expr::Call { args, .. } => {
                for arg in args {
                    arg.collect_vars(names);
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    Plus,
    Neg,
}

impl UnaryOp {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            UnaryOp::Plus => value,
            UnaryOp::Neg => -value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    /// `//`: floor of true division.
    FloorDiv,
    /// `%`: floating-point remainder, sign of the dividend.
    Rem,
    /// `**`: `f64::powf`; invalid domains yield NaN, not an error.
    Pow,
}

impl BinaryOp {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOp::Add => left + right,
            BinaryOp::Sub => left - right,
            BinaryOp::Mul => left * right,
            BinaryOp::Div => left / right,
            BinaryOp::FloorDiv => (left / right).floor(),
            BinaryOp::Rem => left % right,
            BinaryOp::Pow => left.powf(right),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary_apply() {
        assert_eq!(UnaryOp::Plus.apply(-3.5), -3.5);
        assert_eq!(UnaryOp::Neg.apply(-3.5), 3.5);
    }

    #[test]
    fn binary_apply_core_arithmetic() {
        assert_eq!(BinaryOp::Add.apply(1.0, 2.5), 3.5);
        assert_eq!(BinaryOp::Sub.apply(1.0, 2.5), -1.5);
        assert_eq!(BinaryOp::Mul.apply(4.0, 2.5), 10.0);
        assert_eq!(BinaryOp::Div.apply(5.0, 2.0), 2.5);
    }

    #[test]
    fn floor_division_rounds_toward_negative_infinity() {
        assert_eq!(BinaryOp::FloorDiv.apply(7.0, 2.0), 3.0);
        assert_eq!(BinaryOp::FloorDiv.apply(-7.0, 2.0), -4.0);
    }

    #[test]
    fn remainder_takes_sign_of_dividend() {
        assert_eq!(BinaryOp::Rem.apply(7.0, 3.0), 1.0);
        assert_eq!(BinaryOp::Rem.apply(-7.0, 3.0), -1.0);
        assert_eq!(BinaryOp::Rem.apply(7.0, -3.0), 1.0);
    }

    #[test]
    fn power_lets_nan_propagate() {
        assert_eq!(BinaryOp::Pow.apply(2.0, 10.0), 1024.0);
        assert_eq!(BinaryOp::Pow.apply(4.0, 0.5), 2.0);
        assert!(BinaryOp::Pow.apply(-1.0, 0.5).is_nan());
    }

    #[test]
    fn division_by_zero_is_infinite_not_an_error() {
        assert_eq!(BinaryOp::Div.apply(1.0, 0.0), f64::INFINITY);
        assert_eq!(BinaryOp::Div.apply(-1.0, 0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn var_names_are_sorted_and_deduplicated() {
        let expr = Parser::parse("b + a * gtmd(b, 5) - _c").expect("parse");
        assert_eq!(expr.var_names(), vec!["_c", "a", "b"]);
    }
}
