use crate::ast::{BinaryOperator, Expression, Name, TokenTree};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::{Span, Token, TokenKind};

/// An item of the output queue, in postfix order.
#[derive(Debug, PartialEq, Clone)]
pub(crate) enum Postfix {
    Operand(TokenTree<Expression>),
    Operator(TokenTree<BinaryOperator>),
}

#[derive(Debug)]
enum StackEntry {
    Operator(TokenTree<BinaryOperator>),
    OpenParen(Span),
}

impl StackEntry {
    fn precedence(&self) -> Option<u8> {
        match self {
            StackEntry::Operator(op) => Some(op.node.precedence()),
            StackEntry::OpenParen(_) => None,
        }
    }
}

pub struct Parser<'source> {
    lexer: Lexer<'source>,
}

impl<'source> Parser<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            lexer: Lexer::new(source),
        }
    }

    pub fn parse(&mut self) -> Result<TokenTree<Expression>, ParseError> {
        let postfix = self.parse_postfix()?;
        reduce_postfix(postfix)
    }

    /// Reorders the token stream into postfix order using the shunting-yard algorithm.
    ///
    /// An identifier directly followed by `(` pushes a call operator, so `sin(x)` comes out as
    /// `sin x :`.
    pub(crate) fn parse_postfix(&mut self) -> Result<Vec<Postfix>, ParseError> {
        let mut output = Vec::new();
        let mut operators: Vec<StackEntry> = Vec::new();
        let mut previous: Option<Token<'source>> = None;

        while let Some(token) = self.lexer.next().transpose()? {
            match token.kind {
                TokenKind::Identifier(name) => output.push(Postfix::Operand(TokenTree::new(
                    Expression::Variable(Name(name.to_string())),
                    token.span,
                ))),
                TokenKind::Number(text) => output.push(Postfix::Operand(TokenTree::new(
                    Expression::Constant(text.to_string()),
                    token.span,
                ))),
                TokenKind::OpenParen => {
                    match previous {
                        Some(Token {
                            kind: TokenKind::Identifier(_),
                            span,
                        }) => {
                            operators.push(StackEntry::Operator(TokenTree::new(
                                BinaryOperator::Call,
                                span,
                            )));
                        }
                        Some(Token {
                            kind: TokenKind::Number(_),
                            span,
                        }) => {
                            return Err(ParseError::CallOnNumber {
                                span: Span::new(span.start, token.span.end).into(),
                            });
                        }
                        _ => {}
                    }

                    operators.push(StackEntry::OpenParen(token.span));
                }
                TokenKind::CloseParen => loop {
                    match operators.pop() {
                        Some(StackEntry::Operator(op)) => output.push(Postfix::Operator(op)),
                        Some(StackEntry::OpenParen(_)) => break,
                        None => {
                            return Err(ParseError::UnmatchedCloseParen {
                                span: token.span.into(),
                            })
                        }
                    }
                },
                kind => {
                    if let Some(op) = BinaryOperator::from_token(&kind) {
                        // Ties pop too, which makes every operator left associative
                        let precedence = op.precedence();
                        while operators
                            .last()
                            .and_then(StackEntry::precedence)
                            .is_some_and(|top| top >= precedence)
                        {
                            if let Some(StackEntry::Operator(top)) = operators.pop() {
                                output.push(Postfix::Operator(top));
                            }
                        }

                        operators.push(StackEntry::Operator(TokenTree::new(op, token.span)));
                    }
                }
            }

            previous = Some(token);
        }

        while let Some(entry) = operators.pop() {
            match entry {
                StackEntry::Operator(op) => output.push(Postfix::Operator(op)),
                StackEntry::OpenParen(span) => {
                    return Err(ParseError::UnclosedParen { span: span.into() })
                }
            }
        }

        Ok(output)
    }
}

/// Rebuilds a tree from postfix order. Operators take the most recent operand as their right
/// child and the one before it as their left child.
pub(crate) fn reduce_postfix(postfix: Vec<Postfix>) -> Result<TokenTree<Expression>, ParseError> {
    let mut stack: Vec<TokenTree<Expression>> = Vec::new();

    for item in postfix {
        match item {
            Postfix::Operand(operand) => stack.push(operand),
            Postfix::Operator(op) => {
                let missing_operand = ParseError::MissingOperand {
                    operator: op.node,
                    span: op.span.into(),
                };
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(missing_operand);
                };

                let span = Span::new(
                    lhs.span.start.min(op.span.start),
                    rhs.span.end.max(op.span.end),
                );
                stack.push(TokenTree::new(
                    Expression::BinaryOp {
                        op,
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                    },
                    span,
                ));
            }
        }
    }

    let mut roots = stack.into_iter();
    match (roots.next(), roots.next()) {
        (Some(root), None) => Ok(root),
        (Some(_), Some(extra)) => Err(ParseError::UnexpectedOperand {
            span: extra.span.into(),
        }),
        (None, _) => Err(ParseError::EmptyExpression),
    }
}
