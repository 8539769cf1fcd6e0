//! Code generation module for the compiler.
//!
//! This module contains the LLVM-based code generator that lowers parsed
//! declarations into LLVM IR. It handles:
//!
//! - Prototypes and forward (`extern`) declarations
//! - Function bodies, with rollback when generation fails
//! - Expressions over the single `double` type
//! - Call resolution and arity checking

pub mod compiler;
pub mod decl;
pub mod expr;
