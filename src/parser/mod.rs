//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It is a recursive-descent parser that
//! uses precedence climbing for binary operators, and handles:
//!
//! - Function definitions (`def`) and external declarations (`extern`)
//! - Bare top-level expressions, wrapped into anonymous functions
//! - Expression parsing (binary ops, calls, variables, numbers, parentheses)
//! - Error reporting, leaving recovery to the caller
//!
//! Operator precedences come from a [`precedence::PrecedenceTable`] fixed
//! when the parser is created.

pub mod decl;
pub mod expr;
pub mod parser;
pub mod precedence;

#[cfg(test)]
mod tests;
