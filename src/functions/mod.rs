//! Ready-made numeric function bindings a host can drop into an [`Env`].
//!
//! [`Env`]: crate::ast::Env

use crate::ast::{Funcs, Function};

/// Returns the standard math function set: `pow`, `sqrt`, `abs`, `floor`,
/// `ceil`, and the variadic `min`/`max`. All of them are thin wrappers over
/// the `f64` methods of the same name.
pub fn math_funcs() -> Funcs {
    let mut funcs = Funcs::new();
    funcs.insert(
        "pow".to_string(),
        Function::new(2, |args| Ok(args[0].powf(args[1]))),
    );
    funcs.insert("sqrt".to_string(), Function::new(1, |args| Ok(args[0].sqrt())));
    funcs.insert("abs".to_string(), Function::new(1, |args| Ok(args[0].abs())));
    funcs.insert(
        "floor".to_string(),
        Function::new(1, |args| Ok(args[0].floor())),
    );
    funcs.insert("ceil".to_string(), Function::new(1, |args| Ok(args[0].ceil())));
    funcs.insert(
        "min".to_string(),
        Function::variadic(1, |args| {
            Ok(args.iter().copied().fold(f64::INFINITY, f64::min))
        }),
    );
    funcs.insert(
        "max".to_string(),
        Function::variadic(1, |args| {
            Ok(args.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        }),
    );
    funcs
}
