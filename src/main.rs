use std::io::{self, BufRead, Write};

use clap::Parser;
use function_parser::{lexer, parser, token::TokenKind, CompiledExpression};
use miette::{miette, IntoDiagnostic, LabeledSpan, NamedSource, WrapErr};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Input {
    /// The expression to evaluate, e.g. "2*sin(x)+1". Prompted for on every round when omitted.
    expression: Option<String>,

    /// The value to evaluate the expression at. Prompted for on every round when omitted.
    #[clap(long, allow_negative_numbers = true)]
    x: Option<f64>,

    /// Debug the lexer, printing out each token. Does not parse or evaluate the expression.
    #[clap(long, default_value = "false", requires = "expression")]
    debug_lexer: bool,

    /// Debug the parser, printing out the expression tree. Does not evaluate the expression.
    #[clap(long, default_value = "false", requires = "expression")]
    debug_parser: bool,
}

fn main() {
    let Input {
        expression,
        x,
        debug_lexer,
        debug_parser,
    } = Input::parse();

    let result = match (expression.as_deref(), x) {
        (Some(source), _) if debug_lexer => run_debug_lexer(source),
        (Some(source), _) if debug_parser => run_debug_parser(source),
        (Some(source), Some(x)) => run_once(source, x),
        (expression, x) => run_interactive(expression, x),
    };

    if let Err(e) = result {
        eprintln!("{:?}", e);
        std::process::exit(1);
    }
}

fn with_source_code(report: miette::Report, source: &str) -> miette::Report {
    report.with_source_code(NamedSource::new("f(x)", source.to_string()))
}

fn compile(source: &str) -> miette::Result<CompiledExpression> {
    function_parser::compile(source).map_err(|e| with_source_code(e.into(), source))
}

fn run_once(source: &str, x: f64) -> miette::Result<()> {
    let function = compile(source)?;
    println!("f({x}) = {}", function.evaluate(x));

    Ok(())
}

/// Alternates between reading an expression and a value for `x`, until stdin runs out.
fn run_interactive(expression: Option<&str>, x: Option<f64>) -> miette::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("****\nf(x)=");
        let source = match expression {
            Some(source) => {
                println!("{source}");
                source.to_string()
            }
            None => match prompt(&mut lines)? {
                Some(line) => line,
                None => return Ok(()),
            },
        };

        let function = compile(&source)?;

        let x = match x {
            Some(x) => x,
            None => {
                print!("x = ");
                match prompt(&mut lines)? {
                    Some(line) => parse_x(&line)?,
                    None => return Ok(()),
                }
            }
        };

        println!("####\nf(x) = {source}");
        println!("f({x}) = {}", function.evaluate(x));
    }
}

fn prompt(lines: &mut impl Iterator<Item = io::Result<String>>) -> miette::Result<Option<String>> {
    io::stdout().flush().into_diagnostic()?;

    lines
        .next()
        .transpose()
        .into_diagnostic()
        .wrap_err("failed to read from stdin")
}

fn parse_x(line: &str) -> miette::Result<f64> {
    line.trim().parse::<f64>().map_err(|e: std::num::ParseFloatError| {
        miette!(
            labels = vec![LabeledSpan::at(0..line.len(), e.to_string())],
            "invalid value for x"
        )
        .with_source_code(line.to_string())
    })
}

fn run_debug_lexer(source: &str) -> miette::Result<()> {
    let source_code = NamedSource::new("f(x)", source.to_string());

    for token in lexer::Lexer::new(source) {
        let token =
            token.map_err(|e| miette::Report::new(e).with_source_code(source_code.clone()))?;
        let class = match token.kind {
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Number(_) => "numeric literal",
            _ => "symbol",
        };

        let diag = miette!(
            labels = vec![token.span.labeled(format!("{:?}", token.kind))],
            severity = miette::Severity::Advice,
            "found {class} `{}`",
            token.kind.text()
        )
        .with_source_code(source_code.clone());
        eprintln!("{:?}", diag);
    }

    Ok(())
}

fn run_debug_parser(source: &str) -> miette::Result<()> {
    let ast = parser::Parser::new(source)
        .parse()
        .map_err(|e| with_source_code(e.into(), source))?;

    print!("{}", ast.print_tree());

    Ok(())
}
