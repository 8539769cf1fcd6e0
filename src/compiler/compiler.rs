//! Main compiler module.
//!
//! This module contains the core Compiler structure that lowers parsed
//! declarations into LLVM IR. It owns the LLVM module and builder, and the
//! symbol table of the function currently being generated.

use std::{collections::HashMap, fmt::Debug, path::Path};

use inkwell::{
    basic_block::BasicBlock,
    builder::Builder,
    context::Context,
    module::{Linkage, Module},
    types::BasicMetadataTypeEnum,
    values::{FloatValue, FunctionValue},
};

use crate::{
    ast::declarations::Declaration,
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::decl::gen_declaration;

/// The main compiler structure that holds the state of code generation.
///
/// This structure manages:
/// - The LLVM context, module, and builder
/// - The parameter symbol table of the function being generated
///
/// Functions generated so far live in the module itself, which is what
/// calls and forward declarations are resolved against.
///
/// # Type Parameters
///
/// * `'a` - Lifetime of the LLVM context
pub struct Compiler<'a> {
    /// Parameter names of the current function mapped to their values.
    /// Replaced wholesale at the start of every function body and emptied
    /// when it finishes.
    pub named_values: HashMap<String, FloatValue<'a>>,

    /// Reference to the LLVM context
    pub context: &'a Context,
    /// The LLVM module being built
    pub module: Module<'a>,
    /// The LLVM IR builder
    pub builder: Builder<'a>,
}

impl<'a> Compiler<'a> {
    /// Creates a new Compiler instance with an empty module.
    ///
    /// # Arguments
    ///
    /// * `context` - Reference to the LLVM context
    /// * `module_name` - Name of the LLVM module (usually the input file)
    pub fn new(context: &'a Context, module_name: &str) -> Self {
        Compiler {
            named_values: HashMap::new(),
            module: context.create_module(module_name),
            builder: context.create_builder(),
            context,
        }
    }

    /// Generates IR for one top-level declaration.
    ///
    /// On failure the module is left as it was before the call.
    pub fn compile(&mut self, declaration: &Declaration) -> Result<FunctionValue<'a>, Error> {
        gen_declaration(self, declaration)
    }

    /// Looks up a previously generated function by name.
    ///
    /// Anonymous functions are never found: each one is a fresh function.
    pub fn get_function(&self, name: &str) -> Option<FunctionValue<'a>> {
        if name.is_empty() {
            return None;
        }

        self.module.get_function(name)
    }

    /// Declares `double name(double, ...)` with `parameter_count` parameters.
    pub fn create_function_proto(&self, name: &str, parameter_count: usize) -> FunctionValue<'a> {
        let f64_type = self.context.f64_type();
        let parameter_types: Vec<BasicMetadataTypeEnum<'a>> =
            vec![f64_type.into(); parameter_count];
        let function_type = f64_type.fn_type(&parameter_types, false);

        self.module
            .add_function(name, function_type, Some(Linkage::External))
    }

    /// Creates the entry basic block for a function and positions the
    /// builder at its end so code generation can begin.
    pub fn create_function_block(&self, function: FunctionValue<'a>) -> BasicBlock<'a> {
        let entry = self.context.append_basic_block(function, "entry");
        self.builder.position_at_end(entry);
        entry
    }

    /// Makes `parameters` the only names in scope, bound to the parameters
    /// of `function` in order.
    pub fn reset_named_values(&mut self, parameters: &[String], function: FunctionValue<'a>) {
        self.named_values = parameters
            .iter()
            .cloned()
            .zip(
                function
                    .get_param_iter()
                    .map(|parameter| parameter.into_float_value()),
            )
            .collect();
    }

    /// Returns the textual IR of the whole module.
    pub fn print_to_string(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Saves the current LLVM module to a file.
    ///
    /// # Arguments
    ///
    /// * `output_file` - Path where the `.ll` file should be written
    pub fn save_module_to_file(&self, output_file: &Path) -> Result<(), Error> {
        self.module.print_to_file(output_file).map_err(|message| {
            Error::new(
                ErrorImpl::BackendError {
                    message: message.to_string(),
                },
                Position::null(),
            )
        })
    }
}

/// Wraps a failure reported by the LLVM builder.
pub fn backend_error(error: impl Debug, position: Position) -> Error {
    Error::new(
        ErrorImpl::BackendError {
            message: format!("{:?}", error),
        },
        position,
    )
}
