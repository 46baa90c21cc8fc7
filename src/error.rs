use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

use crate::ast::BinaryOperator;

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum LexError {
    #[error("unexpected character '{character}'")]
    #[diagnostic(code = "unexpected_character")]
    UnexpectedCharacter {
        character: char,
        #[label("unexpected character")]
        span: SourceSpan,
    },
}

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum ParseError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Lex(#[from] LexError),

    #[error("unmatched closing parenthesis")]
    #[diagnostic(code = "unmatched_close_paren")]
    UnmatchedCloseParen {
        #[label("no matching '('")]
        span: SourceSpan,
    },

    #[error("unclosed parenthesis")]
    #[diagnostic(code = "unclosed_paren")]
    UnclosedParen {
        #[label("this '(' is never closed")]
        span: SourceSpan,
    },

    #[error("a number cannot be called")]
    #[diagnostic(
        code = "call_on_number",
        help = "only the functions `sin` and `cos` can be applied with `name(...)`"
    )]
    CallOnNumber {
        #[label("number followed by '('")]
        span: SourceSpan,
    },

    #[error("missing operand for '{operator}'")]
    #[diagnostic(code = "missing_operand")]
    MissingOperand {
        operator: BinaryOperator,
        #[label("operator needs two operands")]
        span: SourceSpan,
    },

    #[error("unexpected operand")]
    #[diagnostic(
        code = "unexpected_operand",
        help = "operands must be joined by an operator"
    )]
    UnexpectedOperand {
        #[label("expected an operator before this")]
        span: SourceSpan,
    },

    #[error("expected an expression")]
    #[diagnostic(code = "empty_expression")]
    EmptyExpression,
}

#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum BuildError {
    #[error("unknown variable `{name}`")]
    #[diagnostic(
        code = "unknown_symbol",
        help = "the only variable is `x`, the constants are `pi` and `e`"
    )]
    UnknownSymbol {
        name: String,
        #[label("not a variable or constant")]
        span: SourceSpan,
    },

    #[error("unknown function `{name}`")]
    #[diagnostic(code = "unknown_function", help = "supported functions: `sin`, `cos`")]
    UnknownFunction {
        name: String,
        #[label("not a function")]
        span: SourceSpan,
    },

    #[error("invalid number `{text}`")]
    #[diagnostic(code = "invalid_number")]
    InvalidNumber {
        text: String,
        #[label("cannot be parsed as a number")]
        span: SourceSpan,
    },

    #[error("unsupported operation '{operator}'")]
    #[diagnostic(code = "unsupported")]
    Unsupported {
        operator: BinaryOperator,
        #[label("cannot be evaluated")]
        span: SourceSpan,
    },
}

/// Any failure while turning expression text into a [`crate::CompiledExpression`].
#[derive(Debug, Clone, PartialEq, Diagnostic, Error)]
pub enum CompileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Build(#[from] BuildError),
}
