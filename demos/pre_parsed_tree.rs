use secalc::functions::math_funcs;
use secalc::Env;

fn main() {
    pretty_env_logger::init();

    // Parse once, evaluate against as many environments as needed.
    let tree = secalc::parse("pow(x, 2) + x - 1").expect("failed to parse");
    println!("referenced variables: {:?}", tree.var_names());

    for x in [1.0, 2.5, 10.0] {
        let mut env = Env {
            vars: Default::default(),
            funcs: math_funcs(),
        };
        env.vars.insert("x".to_string(), x);

        match tree.value(&env) {
            Ok(result) => println!("x = {x}: {result}"),
            Err(err) => println!("x = {x}: error: {err}"),
        }
    }
}
