use crate::error::LexError;
use crate::token::{Span, Token, TokenKind};

pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    position: usize,
    failed: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            failed: false,
        }
    }
}

macro_rules! token {
    ($kind:ident, $start:ident, $self:ident) => {
        return Some(Ok(Token {
            kind: TokenKind::$kind,
            span: Span {
                start: $start,
                end: $self.position,
            },
        }))
    };
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Result<Token<'source>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let c_start = self.position;

            self.rest = chars.as_str();
            self.position += c.len_utf8();

            match c {
                '=' => token!(Equals, c_start, self),
                '+' => token!(Plus, c_start, self),
                '-' => token!(Minus, c_start, self),
                '*' => token!(Star, c_start, self),
                '/' => token!(Slash, c_start, self),
                '^' => token!(Caret, c_start, self),
                '(' => token!(OpenParen, c_start, self),
                ')' => token!(CloseParen, c_start, self),

                c if c.is_ascii_alphabetic() => {
                    self.eat_while(|c| c.is_ascii_alphanumeric());
                    break Some(Ok(self.token_from(c_start, TokenKind::Identifier)));
                }
                c if c.is_ascii_digit() => {
                    self.eat_while(|c| c.is_ascii_digit());
                    break Some(Ok(self.token_from(c_start, TokenKind::Number)));
                }

                c if c.is_whitespace() => continue,

                _ => {
                    self.failed = true;
                    break Some(Err(LexError::UnexpectedCharacter {
                        character: c,
                        span: Span::new(c_start, self.position).into(),
                    }));
                }
            }
        }
    }
}

impl<'source> Lexer<'source> {
    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        let len = self
            .rest
            .find(|c: char| !predicate(c))
            .unwrap_or(self.rest.len());

        self.position += len;
        self.rest = &self.rest[len..];
    }

    fn token_from(
        &self,
        start: usize,
        kind: impl FnOnce(&'source str) -> TokenKind<'source>,
    ) -> Token<'source> {
        Token {
            kind: kind(&self.source[start..self.position]),
            span: Span {
                start,
                end: self.position,
            },
        }
    }
}
