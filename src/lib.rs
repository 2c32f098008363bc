//! secalc evaluates small arithmetic expressions, e.g. `wyy(c3p, gtmd(5)) ** 2`,
//! against a caller-provided environment of named variables and native
//! functions.
//!
//! The pipeline is text -> tokens -> tree -> value: a position-tracking
//! lexer feeds a recursive-descent parser one token at a time, and the
//! resulting tree evaluates to `f64` against an [`Env`]. Syntax errors carry
//! the `(row, column)` of the offending token; evaluation errors do not,
//! since they depend on the environment rather than the source text.
//!
//! ```
//! use secalc::{functions::math_funcs, Env};
//!
//! let tree = secalc::parse("pow(2, 10) / max(2, 4)").unwrap();
//! let env = Env {
//!     vars: Default::default(),
//!     funcs: math_funcs(),
//! };
//! assert_eq!(tree.value(&env).unwrap(), 256.0);
//! ```

pub mod ast;
pub mod error;
pub mod functions;

pub use ast::{
    BinaryOp, Env, Expr, Funcs, Function, Parser, Pos, Signature, Token, TokenKind, UnaryOp,
    ValueKind, Vars,
};
pub use error::{Error, EvalError, SyntaxError, SyntaxErrorKind};

/// Parses an expression string into a reusable [`Expr`] tree.
pub fn parse(text: &str) -> Result<Expr, SyntaxError> {
    Parser::parse(text)
}

/// Hook invoked before each evaluation with the variable bindings and the
/// names the expression references, letting a host lazily populate values.
pub type BeforeEval = Box<dyn Fn(&mut Vars, &[String]) + Send + Sync>;

/// Convenience façade bundling an environment with parse-and-evaluate.
///
/// Hosts that want to parse once and evaluate many times should use
/// [`parse`] and [`Expr::value`] directly; `Calc` re-parses on every call.
#[derive(Default)]
pub struct Calc {
    pub env: Env,
    pub before_eval: Option<BeforeEval>,
}

impl Calc {
    pub fn new() -> Self {
        Calc::default()
    }

    /// Parses and evaluates `text` against the held environment.
    pub fn eval(&mut self, text: &str) -> Result<f64, Error> {
        let tree = parse(text)?;
        if let Some(hook) = &self.before_eval {
            let names = tree.var_names();
            hook(&mut self.env.vars, &names);
        }
        Ok(tree.value(&self.env)?)
    }

    /// Validates every registered function's call shape up front.
    pub fn check_funcs(&self) -> Result<(), EvalError> {
        self.env.check_funcs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::math_funcs;

    #[test]
    fn eval_with_math_funcs() {
        let mut calc = Calc::new();
        calc.env.funcs = math_funcs();
        calc.env.vars.insert("x".to_string(), 3.0);

        assert_eq!(calc.eval("pow(x, 2) + sqrt(16) - abs(0-1)").unwrap(), 12.0);
    }

    #[test]
    fn before_eval_populates_missing_variables() {
        let mut calc = Calc::new();
        calc.env
            .funcs
            .insert("gtmd".to_string(), Function::new(1, |args| Ok(args[0])));
        calc.before_eval = Some(Box::new(|vars, names| {
            for name in names {
                vars.entry(name.clone()).or_insert(1919810.0);
            }
        }));

        assert_eq!(calc.eval("gtmd(c3p) + c3p").unwrap(), 3839620.0);
    }

    #[test]
    fn syntax_and_eval_errors_keep_their_family() {
        let mut calc = Calc::new();
        assert!(matches!(calc.eval("(1+2"), Err(Error::Syntax(_))));
        assert!(matches!(calc.eval("missing"), Err(Error::Eval(_))));
    }

    #[test]
    fn literal_only_scripts() {
        let mut calc = Calc::new();
        assert_eq!(calc.eval("0b101010").unwrap(), 42.0);
        assert_eq!(calc.eval("(111)").unwrap(), 111.0);
    }
}
