use std::f64::consts::{E, FRAC_PI_2, PI};

use function_parser::{compile, evaluate, BuildError, CompileError, ParseError};
use rstest::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[rstest]
#[case("x", 3.0, 3.0)]
#[case("2+3*4", 0.0, 14.0)]
#[case("(2+3)*4", 0.0, 20.0)]
#[case("2^3^2", 0.0, 64.0)]
#[case("sin(x)", 0.0, 0.0)]
#[case("x^2 - 2*x + 1", 1.0, 0.0)]
#[case("  x   *   x ", 5.0, 25.0)]
#[case("((x))", 7.0, 7.0)]
#[case("100/10/5", 0.0, 2.0)]
#[case("8-4-2", 0.0, 2.0)]
fn test_evaluate(#[case] expression: &str, #[case] x: f64, #[case] expected: f64) {
    let function = compile(expression).expect("compiling should succeed");
    assert_eq!(evaluate(&function, x), expected, "when evaluating '{expression}'");
}

#[rstest]
#[case("sin(x)", FRAC_PI_2, 1.0)]
#[case("cos(pi)", 0.0, -1.0)]
#[case("cos(pi)", 42.0, -1.0)]
#[case("e^x", 1.0, E)]
#[case("sin(x)^2+cos(x)^2", 0.7, 1.0)]
#[case("2*pi*x", 0.5, PI)]
#[case("sin(pi/6)*2", 0.0, 1.0)]
fn test_evaluate_approx(#[case] expression: &str, #[case] x: f64, #[case] expected: f64) {
    let function = compile(expression).expect("compiling should succeed");
    assert_close(evaluate(&function, x), expected);
}

#[rstest]
#[case("(")]
#[case(")")]
#[case("1(")]
#[case("")]
#[case("x+")]
#[case("x y")]
#[case("sin(x")]
#[case("x # 1")]
fn test_parse_failures(#[case] expression: &str) {
    let error = compile(expression).expect_err("compiling should fail");
    assert!(
        matches!(error, CompileError::Parse(_)),
        "expected a parse error for '{expression}', got {error:?}"
    );
}

#[test]
fn test_unknown_function() {
    assert!(matches!(
        compile("tan(x)"),
        Err(CompileError::Build(BuildError::UnknownFunction { name, .. })) if name == "tan"
    ));
}

#[test]
fn test_unknown_variable() {
    assert!(matches!(
        compile("y"),
        Err(CompileError::Build(BuildError::UnknownSymbol { name, .. })) if name == "y"
    ));
}

#[test]
fn test_assignment_is_unsupported() {
    assert!(matches!(
        compile("x=2"),
        Err(CompileError::Build(BuildError::Unsupported { .. }))
    ));
}

#[test]
fn test_errors_render() {
    let error = compile("1(").unwrap_err();
    assert_eq!(error.to_string(), "a number cannot be called");
    assert_eq!(
        error,
        CompileError::Parse(ParseError::CallOnNumber {
            span: (0..2).into()
        })
    );

    let error = compile("cos(y)").unwrap_err();
    assert_eq!(error.to_string(), "unknown variable `y`");
}

#[test]
fn test_special_values() {
    assert_eq!(compile("1/x").unwrap().evaluate(0.0), f64::INFINITY);
    assert_eq!(compile("0-1/x").unwrap().evaluate(0.0), f64::NEG_INFINITY);
    assert!(compile("x/x").unwrap().evaluate(0.0).is_nan());
    assert!(compile("x+1").unwrap().evaluate(f64::NAN).is_nan());
}

#[test]
fn test_compile_is_idempotent() {
    let first = compile("3*x^2 + sin(x)/x").unwrap();
    let second = compile("3*x^2 + sin(x)/x").unwrap();

    for x in [-10.0, -1.5, 0.25, 1.0, 2.0, 1e6] {
        assert_eq!(first.evaluate(x).to_bits(), second.evaluate(x).to_bits());
    }
}

#[test]
fn test_concurrent_compiles() {
    let handles = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let expression = format!("x*{i}+{i}");
                let function = compile(&expression).unwrap();
                (0..100)
                    .map(|x| function.evaluate(x as f64))
                    .collect::<Vec<_>>()
            })
        })
        .collect::<Vec<_>>();

    for (i, handle) in handles.into_iter().enumerate() {
        let i = i as f64;
        let results = handle.join().unwrap();
        for (x, result) in results.into_iter().enumerate() {
            assert_eq!(result, x as f64 * i + i);
        }
    }
}

#[test]
fn test_shared_between_threads() {
    let function = std::sync::Arc::new(compile("x*x").unwrap());

    let handles = (1..=4)
        .map(|i| {
            let function = std::sync::Arc::clone(&function);
            std::thread::spawn(move || function.evaluate(i as f64))
        })
        .collect::<Vec<_>>();

    let results = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(results, vec![1.0, 4.0, 9.0, 16.0]);
}

#[test]
fn test_long_sum() {
    let expression = vec!["x"; 100_000].join("+");
    let function = compile(&expression).unwrap();
    assert_eq!(function.evaluate(1.0), 100_000.0);
    assert_eq!(function.evaluate(0.5), 50_000.0);
}

#[test]
fn test_deeply_nested_calls() {
    let depth = 50_000;
    let expression = format!("{}x{}", "sin(".repeat(depth), ")".repeat(depth));
    let function = compile(&expression).unwrap();

    let result = function.evaluate(1.0);
    assert!(result > 0.0 && result < 1.0, "got {result}");
    assert_eq!(function.evaluate(0.0), 0.0);
}

#[test]
fn test_deeply_nested_parens() {
    let depth = 50_000;
    let expression = format!("{}x+1{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(compile(&expression).unwrap().evaluate(2.0), 3.0);
}
