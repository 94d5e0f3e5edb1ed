//! Logos-based parser for type signatures.
//!
//! Accepts the strings [`TypeSpecifier::signature`] produces:
//! `Name(.Name)*(<T,...>)?([])?`.

use logos::Logos;

use super::specifier::TypeSpecifier;
use crate::base::Location;
use crate::error::SignatureError;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
enum SignatureToken {
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*(\.[a-zA-Z_][a-zA-Z0-9_]*)*")]
    Name,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token(",")]
    Comma,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,
}

struct Token<'a> {
    kind: SignatureToken,
    text: &'a str,
    offset: usize,
}

fn tokenize(input: &str) -> Result<Vec<Token<'_>>, SignatureError> {
    let mut lexer = SignatureToken::lexer(input);
    let mut tokens = Vec::new();
    while let Some(kind) = lexer.next() {
        let offset = lexer.span().start;
        let text = lexer.slice();
        match kind {
            Ok(kind) => tokens.push(Token { kind, text, offset }),
            Err(()) => {
                return Err(SignatureError::InvalidToken {
                    text: text.to_string(),
                    offset,
                });
            }
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    end: usize,
    location: &'a Location,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<SignatureToken> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn offset(&self) -> usize {
        self.tokens.get(self.pos).map_or(self.end, |t| t.offset)
    }

    fn eat(&mut self, kind: SignatureToken) -> bool {
        if self.peek() == Some(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SignatureToken, expected: &'static str) -> Result<(), SignatureError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(SignatureError::Expected {
                expected,
                offset: self.offset(),
            })
        }
    }

    fn type_specifier(&mut self) -> Result<TypeSpecifier, SignatureError> {
        let Some(token) = self.tokens.get(self.pos).filter(|t| t.kind == SignatureToken::Name) else {
            return Err(SignatureError::Expected {
                expected: "a type name",
                offset: self.offset(),
            });
        };
        let name = token.text;
        self.pos += 1;

        let mut type_parameters = None;
        if self.eat(SignatureToken::LAngle) {
            let mut params = vec![self.type_specifier()?];
            while self.eat(SignatureToken::Comma) {
                params.push(self.type_specifier()?);
            }
            self.expect(SignatureToken::RAngle, "'>'")?;
            type_parameters = Some(params);
        }

        let mut is_array = false;
        if self.eat(SignatureToken::LBracket) {
            self.expect(SignatureToken::RBracket, "']'")?;
            is_array = true;
        }
        Ok(TypeSpecifier::new(
            self.location.clone(),
            name,
            type_parameters,
            is_array,
        ))
    }
}

/// Parse a signature into an unresolved [`TypeSpecifier`] located at `location`.
pub fn parse_type_signature(location: &Location, input: &str) -> Result<TypeSpecifier, SignatureError> {
    let mut parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        end: input.len(),
        location,
    };
    let spec = parser.type_specifier()?;
    if parser.pos < parser.tokens.len() {
        return Err(SignatureError::TrailingInput {
            offset: parser.offset(),
        });
    }
    Ok(spec)
}
