use crate::{ast::BinaryOperator, token::TokenKind};

impl BinaryOperator {
    pub(crate) fn from_token(kind: &TokenKind) -> Option<Self> {
        Some(match kind {
            TokenKind::Equals => Self::Assign,
            TokenKind::Plus => Self::Add,
            TokenKind::Minus => Self::Sub,
            TokenKind::Star => Self::Mul,
            TokenKind::Slash => Self::Div,
            TokenKind::Caret => Self::Pow,

            TokenKind::OpenParen
            | TokenKind::CloseParen
            | TokenKind::Identifier(_)
            | TokenKind::Number(_) => return None,
        })
    }
}
