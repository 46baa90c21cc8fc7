pub mod ast;
pub mod compiler;
pub mod error;
mod helpers;
pub mod lexer;
pub mod parser;
pub mod token;

pub use compiler::{CompiledExpression, Function, NamedConstant};
pub use error::{BuildError, CompileError, LexError, ParseError};

use ast::{Expression, TokenTree};

/// Parses `text` into an expression tree.
pub fn parse(text: &str) -> Result<TokenTree<Expression>, ParseError> {
    parser::Parser::new(text).parse()
}

/// Resolves every name and literal in `expression` and turns it into a callable.
pub fn build(expression: &TokenTree<Expression>) -> Result<CompiledExpression, BuildError> {
    compiler::Compiler::compile(expression)
}

/// Parses and builds `text` in one go.
///
/// ```
/// let f = function_parser::compile("2*sin(x)+1").unwrap();
/// assert_eq!(function_parser::evaluate(&f, 0.0), 1.0);
/// ```
pub fn compile(text: &str) -> Result<CompiledExpression, CompileError> {
    let expression = parse(text)?;
    Ok(build(&expression)?)
}

pub fn evaluate(compiled: &CompiledExpression, x: f64) -> f64 {
    compiled.evaluate(x)
}
