//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the whole-source `parse`
//! entry point. The parser pulls tokens one at a time from a
//! [`TokenStream`] and keeps exactly one token of lookahead; the grammar
//! itself lives in `expr` (precedence climbing) and `decl` (prototypes,
//! definitions, externs and top-level expressions).

use crate::{
    ast::declarations::Declaration,
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind, TokenStream},
    },
    Position,
};

use super::{decl::parse_declaration, precedence::PrecedenceTable};

/// The main parser structure that maintains parsing state.
///
/// There is no token buffer and no backtracking: `current` is the only
/// token the parser can see, and `advance` replaces it destructively.
pub struct Parser {
    /// Where tokens are pulled from
    tokens: Box<dyn TokenStream>,
    /// The single lookahead token
    current: Token,
    /// Binary operator precedences, fixed for the parser's lifetime
    precedence: PrecedenceTable,
}

impl Parser {
    /// Creates a new Parser and primes it with the first token.
    ///
    /// # Arguments
    ///
    /// * `tokens` - The token stream to pull from
    /// * `precedence` - The binary operator table used for climbing
    pub fn new(mut tokens: Box<dyn TokenStream>, precedence: PrecedenceTable) -> Self {
        let current = tokens.next_token();

        Parser {
            tokens,
            current,
            precedence,
        }
    }

    /// Creates a parser reading directly from source text.
    pub fn from_source(source: String, file: Option<String>, precedence: PrecedenceTable) -> Self {
        Parser::new(Box::new(Lexer::new(source, file)), precedence)
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Advances to the next token and returns the previous token.
    pub fn advance(&mut self) -> Token {
        let next = self.tokens.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Expects a token of the specified kind, consuming it on success.
    ///
    /// On failure the current token is left in place and `error` builds the
    /// error from the offending token's text.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: impl FnOnce(String) -> ErrorImpl,
    ) -> Result<Token, Error> {
        if self.current.kind != expected_kind {
            Err(self.error_at_current(error))
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, |token| ErrorImpl::UnexpectedToken { token })
    }

    /// Builds an error located at the current token.
    pub fn error_at_current(&self, error: impl FnOnce(String) -> ErrorImpl) -> Error {
        Error::new(error(self.current.value.clone()), self.get_position())
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current.kind != TokenKind::EOF
    }

    /// Precedence of the current token as a binary operator, or -1.
    pub fn get_token_precedence(&self) -> i32 {
        self.precedence.get_token_precedence(&self.current)
    }

    /// Returns the position of the current token in the source file.
    pub fn get_position(&self) -> Position {
        self.current.span.start.clone()
    }

    /// Parses one top-level item starting at the current token.
    pub fn parse_declaration(&mut self) -> Result<Declaration, Error> {
        parse_declaration(self)
    }
}

/// Parses a whole source into its top-level declarations.
///
/// Stray `;` between items are skipped. Parsing stops at the first error;
/// use [`crate::driver::Driver`] for recovery across errors.
///
/// # Arguments
///
/// * `source` - The program text
/// * `file` - The name reported in positions
/// * `precedence` - The binary operator table
#[tracing::instrument(skip_all)]
pub fn parse(
    source: String,
    file: Option<String>,
    precedence: PrecedenceTable,
) -> Result<Vec<Declaration>, Error> {
    let mut parser = Parser::from_source(source, file, precedence);
    let mut declarations = vec![];

    while parser.has_tokens() {
        if parser.current_token().is_char(';') {
            parser.advance();
            continue;
        }

        declarations.push(parser.parse_declaration()?);
    }

    tracing::debug!(count = declarations.len(), "parsed source");
    Ok(declarations)
}
