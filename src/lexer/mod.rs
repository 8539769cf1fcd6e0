//! Lexical analysis module for the compiler.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Pull-based tokenization using anchored regex patterns
//! - Recognition of the `def` and `extern` keywords, identifiers and numbers
//! - Single characters for operators and punctuation
//! - `#` line comments and whitespace
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
