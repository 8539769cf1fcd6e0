use inkwell::values::FunctionValue;

use crate::{
    ast::declarations::{Declaration, Function, Prototype},
    errors::errors::{Error, ErrorImpl},
};

use super::{
    compiler::{backend_error, Compiler},
    expr::gen_expression,
};

#[tracing::instrument(skip_all, fields(name = declaration.get_name()))]
pub fn gen_declaration<'a>(
    compiler: &mut Compiler<'a>,
    declaration: &Declaration,
) -> Result<FunctionValue<'a>, Error> {
    match declaration {
        Declaration::Extern(prototype) => gen_prototype(compiler, prototype),
        Declaration::Function(function) => gen_function(compiler, function),
    }
}

/// Declares the function described by `prototype`.
///
/// An already existing function of the same name is returned unchanged,
/// provided it takes the same number of parameters.
pub fn gen_prototype<'a>(
    compiler: &Compiler<'a>,
    prototype: &Prototype,
) -> Result<FunctionValue<'a>, Error> {
    if let Some(existing) = compiler.get_function(&prototype.name) {
        let expected = existing.count_params() as usize;

        if expected != prototype.parameters.len() {
            return Err(Error::new(
                ErrorImpl::PrototypeMismatch {
                    function: prototype.name.clone(),
                    expected,
                    received: prototype.parameters.len(),
                },
                prototype.span.start.clone(),
            ));
        }

        return Ok(existing);
    }

    let function = compiler.create_function_proto(&prototype.name, prototype.parameters.len());
    name_parameters(function, &prototype.parameters);

    tracing::debug!(name = %prototype.name, "declared function");
    Ok(function)
}

/// Generates a full function definition.
///
/// If the body fails, everything this call added is removed again: a
/// function it created is deleted, and a function that was only declared
/// before goes back to being a declaration.
pub fn gen_function<'a>(
    compiler: &mut Compiler<'a>,
    function: &Function,
) -> Result<FunctionValue<'a>, Error> {
    let prototype = &function.prototype;
    let was_declared = compiler.get_function(&prototype.name).is_some();

    let function_value = gen_prototype(compiler, prototype)?;

    if function_value.count_basic_blocks() > 0 {
        return Err(Error::new(
            ErrorImpl::FunctionRedefinition {
                function: prototype.name.clone(),
            },
            prototype.span.start.clone(),
        ));
    }

    compiler.create_function_block(function_value);
    compiler.reset_named_values(&prototype.parameters, function_value);

    let result = gen_function_body(compiler, function, function_value);
    compiler.named_values.clear();

    match result {
        Ok(()) => {
            // A forward declaration may have used different parameter names
            name_parameters(function_value, &prototype.parameters);

            tracing::debug!(name = %prototype.name, "generated function");
            Ok(function_value)
        }
        Err(error) => {
            tracing::warn!(name = %prototype.name, %error, "rolling back function");
            roll_back(compiler, function_value, was_declared);
            Err(error)
        }
    }
}

fn gen_function_body<'a>(
    compiler: &Compiler<'a>,
    function: &Function,
    function_value: FunctionValue<'a>,
) -> Result<(), Error> {
    let body = gen_expression(compiler, &function.body)?;

    compiler
        .builder
        .build_return(Some(&body))
        .map_err(|e| backend_error(e, function.body.get_span().end.clone()))?;

    if !function_value.verify(false) {
        return Err(Error::new(
            ErrorImpl::InvalidFunction {
                function: function.prototype.name.clone(),
            },
            function.prototype.span.start.clone(),
        ));
    }

    Ok(())
}

fn name_parameters(function: FunctionValue<'_>, parameters: &[String]) {
    for (parameter, name) in function.get_param_iter().zip(parameters) {
        parameter.into_float_value().set_name(name);
    }
}

fn roll_back<'a>(compiler: &Compiler<'a>, function: FunctionValue<'a>, keep_declaration: bool) {
    compiler.builder.clear_insertion_position();

    if keep_declaration {
        for block in function.get_basic_blocks() {
            // SAFETY: the blocks were created by this generation and nothing
            // outside the function refers to them.
            if unsafe { block.delete() }.is_err() {
                tracing::warn!(
                    name = function.get_name().to_str().unwrap_or("<invalid>"),
                    "could not delete basic block during rollback"
                );
            }
        }
    } else {
        // SAFETY: the function was created by this generation; the only
        // possible uses are calls inside its own, now discarded, body.
        unsafe { function.delete() };
    }
}
