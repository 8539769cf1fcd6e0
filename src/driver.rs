//! Top-level loop tying the parser to the code generator.
//!
//! The driver handles one top-level item at a time: it is parsed and then
//! lowered into the module before the next one is looked at. A syntax error
//! skips the offending token so parsing can resume; a generation error has
//! already been rolled back by the compiler.

use inkwell::{context::Context, values::AnyValue};

use crate::{
    ast::declarations::Declaration,
    compiler::compiler::Compiler,
    errors::errors::Error,
    parser::{parser::Parser, precedence::PrecedenceTable},
};

/// What a successfully handled top-level item produced.
///
/// Each variant carries the textual IR of the affected function.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// A `def` with a body
    Defined(String),
    /// An `extern` declaration
    Declared(String),
    /// A top-level expression wrapped in an anonymous function
    Evaluated(String),
}

impl Outcome {
    pub fn get_ir(&self) -> &str {
        match self {
            Outcome::Defined(ir) | Outcome::Declared(ir) | Outcome::Evaluated(ir) => ir,
        }
    }
}

pub struct Driver<'a> {
    parser: Parser,
    compiler: Compiler<'a>,
}

impl<'a> Driver<'a> {
    /// Creates a driver over `source`, emitting into a module named after
    /// `file` (or `<stdin>`).
    pub fn new(
        context: &'a Context,
        source: String,
        file: Option<String>,
        precedence: PrecedenceTable,
    ) -> Self {
        let module_name = file.clone().unwrap_or_else(|| String::from("<stdin>"));

        Driver {
            parser: Parser::from_source(source, file, precedence),
            compiler: Compiler::new(context, &module_name),
        }
    }

    pub fn get_compiler(&self) -> &Compiler<'a> {
        &self.compiler
    }

    /// Handles the next top-level item.
    ///
    /// Returns `None` once the input is exhausted.
    pub fn step(&mut self) -> Option<Result<Outcome, Error>> {
        while self.parser.current_token().is_char(';') {
            self.parser.advance();
        }

        if !self.parser.has_tokens() {
            return None;
        }

        let result = self
            .parser
            .parse_declaration()
            .and_then(|declaration| self.handle_declaration(&declaration));

        if let Err(error) = &result {
            // Syntax errors leave the offending token in place
            if error.is_syntax_error() {
                self.parser.advance();
            }
        }

        Some(result)
    }

    /// Handles every remaining item, in order.
    #[tracing::instrument(skip_all)]
    pub fn run(&mut self) -> Vec<Result<Outcome, Error>> {
        let mut results = vec![];

        while let Some(result) = self.step() {
            results.push(result);
        }

        tracing::debug!(
            items = results.len(),
            failed = results.iter().filter(|result| result.is_err()).count(),
            "finished input"
        );
        results
    }

    fn handle_declaration(&mut self, declaration: &Declaration) -> Result<Outcome, Error> {
        let function = self.compiler.compile(declaration)?;
        let ir = function.print_to_string().to_string();

        Ok(match declaration {
            Declaration::Extern(_) => Outcome::Declared(ir),
            Declaration::Function(function) if function.is_anonymous() => Outcome::Evaluated(ir),
            Declaration::Function(_) => Outcome::Defined(ir),
        })
    }
}
