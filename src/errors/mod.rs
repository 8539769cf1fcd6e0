//! Error types and error handling for the compiler.
//!
//! This module defines the error types used by the parser and the code
//! generator. It includes:
//!
//! - Error structures with source position information
//! - Specific error variants for syntax and semantic failures
//! - Helpful error messages and suggestions

pub mod errors;
