use secalc::functions::math_funcs;
use secalc::Calc;

fn main() {
    pretty_env_logger::init();

    let mut calc = Calc::new();
    calc.env.funcs = math_funcs();
    // Supply a default for any variable a formula mentions but the
    // environment lacks.
    calc.before_eval = Some(Box::new(|vars, names| {
        for name in names {
            vars.entry(name.clone()).or_insert(1.0);
        }
    }));

    let formulas = [
        "1+1",
        "0b101010",
        "2**3**2",
        "(1+2)*3.142/100%2",
        "pow(radius, 2) * pi",
        "min(a, b, c) + max(a, b, c)",
        "1 + (2",
    ];

    for formula in formulas {
        match calc.eval(formula) {
            Ok(result) => println!("{formula:>28} = {result}"),
            Err(err) => println!("{formula:>28} ! {err}"),
        }
    }
}
