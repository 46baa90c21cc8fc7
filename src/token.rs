use miette::{LabeledSpan, SourceSpan};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn labeled(&self, message: impl Into<String>) -> LabeledSpan {
        LabeledSpan::at(self.start..self.end, message)
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start..span.end).into()
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Token<'source> {
    pub kind: TokenKind<'source>,
    pub span: Span,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind<'source> {
    // Punctuation
    Equals,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    OpenParen,
    CloseParen,

    // Identifiers
    Identifier(&'source str),

    // Literals
    Number(&'source str), // NOTE: Parsed into a float when the expression is built.
}

impl<'source> TokenKind<'source> {
    /// The source text this token kind was scanned from.
    pub fn text(&self) -> &'source str {
        match self {
            TokenKind::Equals => "=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Identifier(text) | TokenKind::Number(text) => text,
        }
    }
}
