use std::fmt;

use crate::token::Span;

#[derive(Debug, PartialEq, Clone)]
pub struct TokenTree<T> {
    pub node: T,
    pub span: Span,
}

impl<T> TokenTree<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    /// A bare identifier: `x`, a named constant, or a function name on the left of a call.
    Variable(Name),
    /// A numeric literal, kept as written until the expression is built.
    Constant(String),
    BinaryOp {
        op: TokenTree<BinaryOperator>,
        lhs: Box<TokenTree<Expression>>,
        rhs: Box<TokenTree<Expression>>,
    },
}

#[derive(Debug, PartialEq, Clone)]
pub struct Name(pub String);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Applies the function named by the left operand to the right operand.
    Call,
}

impl BinaryOperator {
    pub fn symbol(self) -> char {
        match self {
            Self::Assign => '=',
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
            Self::Pow => '^',
            Self::Call => ':',
        }
    }

    /// Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Self::Assign => 0,
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
            Self::Pow => 3,
            Self::Call => 4,
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TokenTree<Expression> {
    /// Renders the tree one node per line, children indented below their parent.
    ///
    /// ```
    /// let ast = function_parser::parse("x+1").unwrap();
    /// assert_eq!(ast.print_tree().to_string(), "+\n    x\n    1\n");
    /// ```
    pub fn print_tree(&self) -> TreePrinter<'_> {
        TreePrinter(self)
    }
}

const INDENT_WIDTH: usize = 5;

pub struct TreePrinter<'tree>(&'tree TokenTree<Expression>);

impl fmt::Display for TreePrinter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![(self.0, 0)];

        while let Some((expression, width)) = pending.pop() {
            match &expression.node {
                Expression::Variable(Name(name)) => writeln!(f, "{name:>width$}")?,
                Expression::Constant(text) => writeln!(f, "{text:>width$}")?,
                Expression::BinaryOp { op, lhs, rhs } => {
                    let symbol = op.node.symbol();
                    writeln!(f, "{symbol:>width$}")?;
                    pending.push((rhs.as_ref(), width + INDENT_WIDTH));
                    pending.push((lhs.as_ref(), width + INDENT_WIDTH));
                }
            }
        }

        Ok(())
    }
}

impl Drop for Expression {
    // Unlinks children onto a heap stack, so dropping a very deep tree does not recurse.
    fn drop(&mut self) {
        let Expression::BinaryOp { lhs, rhs, .. } = self else {
            return;
        };

        let mut children = vec![take_node(lhs), take_node(rhs)];
        while let Some(mut child) = children.pop() {
            if let Expression::BinaryOp { lhs, rhs, .. } = &mut child {
                children.push(take_node(lhs));
                children.push(take_node(rhs));
            }
        }
    }
}

fn take_node(tree: &mut TokenTree<Expression>) -> Expression {
    std::mem::replace(&mut tree.node, Expression::Constant(String::new()))
}

#[cfg(test)]
mod tests {
    use crate::parser::Parser;

    #[test]
    fn test_print_tree() {
        let ast = Parser::new("2+3*4").parse().unwrap();
        assert_eq!(
            ast.print_tree().to_string(),
            concat!(
                "+\n",
                "    2\n",
                "    *\n",
                "         3\n",
                "         4\n",
            )
        );
    }

    #[test]
    fn test_print_call() {
        let ast = Parser::new("cos(pi)").parse().unwrap();
        assert_eq!(ast.print_tree().to_string(), ":\n  cos\n   pi\n");
    }

    #[test]
    fn test_print_deep_tree() {
        let depth = 1_000;
        let nested = format!("{}x{}", "cos(".repeat(depth), ")".repeat(depth));

        let printed = Parser::new(&nested).parse().unwrap().print_tree().to_string();
        assert_eq!(printed.lines().count(), 2 * depth + 1);
        assert_eq!(printed.lines().last().map(str::trim_start), Some("x"));
    }

    #[test]
    fn test_drop_deep_tree() {
        let depth = 100_000;
        let chain = Parser::new(&vec!["x"; depth].join("-")).parse().unwrap();
        let nested = format!("{}x{}", "sin(".repeat(depth), ")".repeat(depth));
        let nested = Parser::new(&nested).parse().unwrap();

        drop(chain);
        drop(nested);
    }
}
