use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, TokenStream, RESERVED_LOOKUP};

/// Handles the text matched by a pattern. Returning `None` means the text
/// produced no token (whitespace, comments) and lexing continues.
pub type RegexHandler = fn(&mut Lexer, &str) -> Option<Token>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Every pattern is anchored at the start of the remaining input
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z][a-zA-Z0-9]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^([0-9]+(\\.[0-9]*)?|\\.[0-9]+)").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^#[^\\r\\n]*").unwrap(), handler: skip_handler },
    ];
}

/// Pull-based tokenizer over an in-memory source.
///
/// Tokens are produced one at a time through [`TokenStream::next_token`];
/// anything that is not an identifier, keyword, number, whitespace or
/// comment comes back as a single [`TokenKind::Char`].
pub struct Lexer {
    source: String,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            pos: 0,
            source,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span(&self, len: usize) -> Span {
        Span {
            start: Position(self.pos as u32, Rc::clone(&self.file)),
            end: Position((self.pos + len) as u32, Rc::clone(&self.file)),
        }
    }
}

impl TokenStream for Lexer {
    fn next_token(&mut self) -> Token {
        loop {
            if self.at_eof() {
                return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), self.span(0));
            }

            let matched = PATTERNS.iter().find_map(|pattern| {
                pattern
                    .regex
                    .find(self.remainder())
                    .map(|found| (pattern.handler, found.as_str().to_string()))
            });

            match matched {
                Some((handler, text)) => {
                    if let Some(token) = handler(self, &text) {
                        return token;
                    }
                }
                None => return char_handler(self),
            }
        }
    }
}

fn symbol_handler(lexer: &mut Lexer, text: &str) -> Option<Token> {
    let kind = RESERVED_LOOKUP
        .get(text)
        .copied()
        .unwrap_or(TokenKind::Identifier);

    let token = MK_TOKEN!(kind, String::from(text), lexer.span(text.len()));
    lexer.advance_n(text.len());
    Some(token)
}

fn number_handler(lexer: &mut Lexer, text: &str) -> Option<Token> {
    let token = MK_TOKEN!(TokenKind::Number, String::from(text), lexer.span(text.len()));
    lexer.advance_n(text.len());
    Some(token)
}

fn skip_handler(lexer: &mut Lexer, text: &str) -> Option<Token> {
    lexer.advance_n(text.len());
    None
}

fn char_handler(lexer: &mut Lexer) -> Token {
    let Some(c) = lexer.remainder().chars().next() else {
        return MK_TOKEN!(TokenKind::EOF, String::from("EOF"), lexer.span(0));
    };

    let token = MK_TOKEN!(TokenKind::Char(c), c.to_string(), lexer.span(c.len_utf8()));
    lexer.advance_n(c.len_utf8());
    token
}

/// Collects every token of `source`, including the trailing EOF.
pub fn tokenize(source: String, file: Option<String>) -> Vec<Token> {
    let mut lexer = Lexer::new(source, file);
    let mut tokens = vec![];

    loop {
        let token = lexer.next_token();
        let done = token.kind == TokenKind::EOF;
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
