use criterion::{black_box, criterion_group, criterion_main, Criterion};
use secalc::functions::math_funcs;
use secalc::{parse, Env};

fn polynomial_env() -> Env {
    let mut env = Env {
        vars: Default::default(),
        funcs: math_funcs(),
    };
    env.vars.insert("x".to_string(), 5.0);
    env
}

fn benchmark_parse(c: &mut Criterion) {
    let expr = "18111/2*pow(x,4) - 90555*pow(x,3) + 633885/2*pow(x,2) - 472973*x + 215504";

    c.bench_function("parse_polynomial", |b| {
        b.iter(|| parse(black_box(expr)).unwrap())
    });
}

fn benchmark_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Expression Evaluation");

    let expr = "18111/2*pow(x,4) - 90555*pow(x,3) + 633885/2*pow(x,2) - 472973*x + 215504";
    let env = polynomial_env();
    let tree = parse(expr).unwrap();

    group.bench_function("parse_and_evaluate", |b| {
        b.iter(|| parse(black_box(expr)).unwrap().value(&env).unwrap())
    });

    group.bench_function("pre_parsed_evaluate", |b| {
        b.iter(|| tree.value(black_box(&env)).unwrap())
    });

    group.bench_function("native_rust", |b| {
        let x: f64 = black_box(5.0);
        b.iter(|| {
            black_box(
                18111.0 / 2.0 * x.powf(4.0) - 90555.0 * x.powf(3.0)
                    + 633885.0 / 2.0 * x.powf(2.0)
                    - 472973.0 * x
                    + 215504.0,
            )
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_evaluation);
criterion_main!(benches);
