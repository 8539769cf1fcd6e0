use inkwell::{
    values::{BasicMetadataValueEnum, FloatValue},
    FloatPredicate,
};

use crate::{
    ast::expressions::{BinaryExpr, CallExpr, Expr},
    errors::errors::{Error, ErrorImpl},
};

use super::compiler::{backend_error, Compiler};

/// Generates LLVM IR for the given expression.
///
/// Every expression evaluates to a `double`. The first failing
/// subexpression aborts the whole expression.
pub fn gen_expression<'a>(
    compiler: &Compiler<'a>,
    expression: &Expr,
) -> Result<FloatValue<'a>, Error> {
    match expression {
        Expr::Number(number) => Ok(compiler.context.f64_type().const_float(number.value)),
        Expr::Variable(variable) => compiler
            .named_values
            .get(&variable.name)
            .copied()
            .ok_or_else(|| {
                Error::new(
                    ErrorImpl::UnknownVariable {
                        variable: variable.name.clone(),
                    },
                    variable.span.start.clone(),
                )
            }),
        Expr::Binary(binary) => gen_binary_expression(compiler, binary),
        Expr::Call(call) => gen_call_expression(compiler, call),
    }
}

fn gen_binary_expression<'a>(
    compiler: &Compiler<'a>,
    binary: &BinaryExpr,
) -> Result<FloatValue<'a>, Error> {
    let left = gen_expression(compiler, &binary.left)?;
    let right = gen_expression(compiler, &binary.right)?;

    let builder = &compiler.builder;
    let position = || binary.span.start.clone();

    let value = match binary.operator {
        '+' => builder.build_float_add(left, right, "addtmp"),
        '-' => builder.build_float_sub(left, right, "subtmp"),
        '*' => builder.build_float_mul(left, right, "multmp"),
        '<' => {
            let comparison = builder
                .build_float_compare(FloatPredicate::ULT, left, right, "cmptmp")
                .map_err(|e| backend_error(e, position()))?;

            // No boolean type in the language: widen i1 to 0.0 / 1.0
            builder.build_unsigned_int_to_float(comparison, compiler.context.f64_type(), "booltmp")
        }
        operator => {
            return Err(Error::new(
                ErrorImpl::InvalidBinaryOperator { operator },
                position(),
            ))
        }
    };

    value.map_err(|e| backend_error(e, position()))
}

fn gen_call_expression<'a>(
    compiler: &Compiler<'a>,
    call: &CallExpr,
) -> Result<FloatValue<'a>, Error> {
    let function = compiler.get_function(&call.callee).ok_or_else(|| {
        Error::new(
            ErrorImpl::UnknownFunction {
                function: call.callee.clone(),
            },
            call.span.start.clone(),
        )
    })?;

    let expected = function.count_params() as usize;
    if expected != call.arguments.len() {
        return Err(Error::new(
            ErrorImpl::IncorrectArgumentCount {
                function: call.callee.clone(),
                expected,
                received: call.arguments.len(),
            },
            call.span.start.clone(),
        ));
    }

    let arguments = call
        .arguments
        .iter()
        .map(|argument| gen_expression(compiler, argument).map(BasicMetadataValueEnum::from))
        .collect::<Result<Vec<BasicMetadataValueEnum<'a>>, Error>>()?;

    compiler
        .builder
        .build_call(function, &arguments, "calltmp")
        .map_err(|e| backend_error(e, call.span.start.clone()))?
        .try_as_basic_value()
        .left()
        .map(|value| value.into_float_value())
        .ok_or_else(|| {
            backend_error(
                format!("call to {} produced no value", call.callee),
                call.span.start.clone(),
            )
        })
}
