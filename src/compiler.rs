use std::f64::consts;

use crate::ast::{BinaryOperator, Expression, Name, TokenTree};
use crate::error::BuildError;

/// A unary function that can be applied with `name(argument)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
}

impl Function {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            _ => None,
        }
    }

    pub fn apply(self, argument: f64) -> f64 {
        match self {
            Self::Sin => argument.sin(),
            Self::Cos => argument.cos(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NamedConstant {
    Pi,
    E,
}

impl NamedConstant {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            _ => None,
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Self::Pi => consts::PI,
            Self::E => consts::E,
        }
    }
}

/// One step of a compiled expression. The program runs against a value stack, in postfix order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) enum Instruction {
    LoadX,
    LoadConstant(f64),
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    /// Replaces the top of the stack with the function applied to it.
    Call(Function),
}

impl Instruction {
    /// How the instruction changes the stack height.
    fn stack_effect(self) -> isize {
        match self {
            Instruction::LoadX | Instruction::LoadConstant(_) => 1,
            Instruction::Call(_) => 0,
            Instruction::Add
            | Instruction::Sub
            | Instruction::Mul
            | Instruction::Div
            | Instruction::Pow => -1,
        }
    }
}

/// A parsed expression turned into a flat program over `x`.
///
/// Building resolves every name and literal up front, so evaluating never fails. Results follow
/// IEEE-754: `1/0` is infinite and `0/0` is NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledExpression {
    program: Vec<Instruction>,
    max_stack: usize,
}

impl CompiledExpression {
    pub fn evaluate(&self, x: f64) -> f64 {
        let mut stack: Vec<f64> = Vec::with_capacity(self.max_stack);

        for instruction in &self.program {
            match *instruction {
                Instruction::LoadX => stack.push(x),
                Instruction::LoadConstant(value) => stack.push(value),
                Instruction::Add => apply_binary(&mut stack, |a, b| a + b),
                Instruction::Sub => apply_binary(&mut stack, |a, b| a - b),
                Instruction::Mul => apply_binary(&mut stack, |a, b| a * b),
                Instruction::Div => apply_binary(&mut stack, |a, b| a / b),
                Instruction::Pow => apply_binary(&mut stack, f64::powf),
                Instruction::Call(function) => {
                    if let Some(top) = stack.last_mut() {
                        *top = function.apply(*top);
                    }
                }
            }
        }

        // Programs are built from a single tree, so exactly one value is left
        stack.pop().unwrap_or(f64::NAN)
    }
}

fn apply_binary(stack: &mut Vec<f64>, operation: impl FnOnce(f64, f64) -> f64) {
    if let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) {
        stack.push(operation(lhs, rhs));
    }
}

enum Work<'tree> {
    Visit(&'tree TokenTree<Expression>),
    Emit(Instruction),
}

pub struct Compiler;

impl Compiler {
    /// Flattens the tree into postfix instructions.
    ///
    /// Uses an explicit work stack rather than recursion, so arbitrarily deep trees (a long
    /// `x+x+...+x` chain, or many nested calls) compile and evaluate in constant native stack.
    pub fn compile(expression: &TokenTree<Expression>) -> Result<CompiledExpression, BuildError> {
        let mut program = Vec::new();
        let mut work = vec![Work::Visit(expression)];

        while let Some(item) = work.pop() {
            let tree = match item {
                Work::Emit(instruction) => {
                    program.push(instruction);
                    continue;
                }
                Work::Visit(tree) => tree,
            };

            match &tree.node {
                Expression::Variable(Name(name)) if name == "x" => program.push(Instruction::LoadX),
                Expression::Variable(Name(name)) => match NamedConstant::from_name(name) {
                    Some(constant) => program.push(Instruction::LoadConstant(constant.value())),
                    None => {
                        return Err(BuildError::UnknownSymbol {
                            name: name.clone(),
                            span: tree.span.into(),
                        })
                    }
                },
                Expression::Constant(text) => {
                    let value = text
                        .parse::<f64>()
                        .map_err(|_| BuildError::InvalidNumber {
                            text: text.clone(),
                            span: tree.span.into(),
                        })?;
                    program.push(Instruction::LoadConstant(value));
                }
                Expression::BinaryOp { op, lhs, rhs } => {
                    let instruction = match op.node {
                        BinaryOperator::Add => Instruction::Add,
                        BinaryOperator::Sub => Instruction::Sub,
                        BinaryOperator::Mul => Instruction::Mul,
                        BinaryOperator::Div => Instruction::Div,
                        BinaryOperator::Pow => Instruction::Pow,
                        BinaryOperator::Call => {
                            let function = Self::resolve_function(op, lhs)?;
                            work.push(Work::Emit(Instruction::Call(function)));
                            work.push(Work::Visit(rhs));
                            continue;
                        }
                        BinaryOperator::Assign => {
                            return Err(BuildError::Unsupported {
                                operator: op.node,
                                span: op.span.into(),
                            })
                        }
                    };

                    // Popped in reverse: lhs first, then rhs, then the operator
                    work.push(Work::Emit(instruction));
                    work.push(Work::Visit(rhs));
                    work.push(Work::Visit(lhs));
                }
            }
        }

        let max_stack = program
            .iter()
            .scan(0isize, |height, instruction| {
                *height += instruction.stack_effect();
                Some(*height)
            })
            .max()
            .unwrap_or(0)
            .max(0) as usize;

        Ok(CompiledExpression { program, max_stack })
    }

    fn resolve_function(
        op: &TokenTree<BinaryOperator>,
        function: &TokenTree<Expression>,
    ) -> Result<Function, BuildError> {
        let Expression::Variable(Name(name)) = &function.node else {
            return Err(BuildError::Unsupported {
                operator: op.node,
                span: op.span.into(),
            });
        };

        Function::from_name(name).ok_or_else(|| BuildError::UnknownFunction {
            name: name.clone(),
            span: op.span.into(),
        })
    }
}
