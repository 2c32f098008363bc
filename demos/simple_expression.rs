use log::debug;
use secalc::functions::math_funcs;
use secalc::{Calc, Function};

fn main() {
    pretty_env_logger::init();

    let mut calc = Calc::new();
    calc.env.funcs = math_funcs();
    calc.env
        .funcs
        .insert("gtmd".to_string(), Function::new(1, |args| Ok(args[0])));
    calc.env.vars.insert("c3p".to_string(), 100.0);

    calc.check_funcs().expect("registered functions are legal");

    let expression = "pow(c3p, gtmd(2)) ** 0.5 + 0x10";
    debug!("evaluating {expression:?}");

    match calc.eval(expression) {
        Ok(result) => println!("{expression} = {result}"),
        Err(err) => println!("Error: {err}"),
    }
}
