use std::fmt::Display;

use thiserror::Error;

use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_kind(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the error came from the parser, as opposed to code generation.
    ///
    /// The driver skips the offending token after a syntax error before
    /// parsing is retried.
    pub fn is_syntax_error(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::UnexpectedToken { .. }
                | ErrorImpl::ExpectedExpression { .. }
                | ErrorImpl::ExpectedCloseParen { .. }
                | ErrorImpl::ExpectedArgumentSeparator { .. }
                | ErrorImpl::ExpectedFunctionName { .. }
                | ErrorImpl::ExpectedPrototypeOpen { .. }
                | ErrorImpl::ExpectedPrototypeClose { .. }
                | ErrorImpl::DuplicateParameter { .. }
                | ErrorImpl::NumberParseError { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::ExpectedExpression { .. } => "ExpectedExpression",
            ErrorImpl::ExpectedCloseParen { .. } => "ExpectedCloseParen",
            ErrorImpl::ExpectedArgumentSeparator { .. } => "ExpectedArgumentSeparator",
            ErrorImpl::ExpectedFunctionName { .. } => "ExpectedFunctionName",
            ErrorImpl::ExpectedPrototypeOpen { .. } => "ExpectedPrototypeOpen",
            ErrorImpl::ExpectedPrototypeClose { .. } => "ExpectedPrototypeClose",
            ErrorImpl::DuplicateParameter { .. } => "DuplicateParameter",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::UnknownVariable { .. } => "UnknownVariable",
            ErrorImpl::UnknownFunction { .. } => "UnknownFunction",
            ErrorImpl::IncorrectArgumentCount { .. } => "IncorrectArgumentCount",
            ErrorImpl::FunctionRedefinition { .. } => "FunctionRedefinition",
            ErrorImpl::PrototypeMismatch { .. } => "PrototypeMismatch",
            ErrorImpl::InvalidBinaryOperator { .. } => "InvalidBinaryOperator",
            ErrorImpl::InvalidFunction { .. } => "InvalidFunction",
            ErrorImpl::BackendError { .. } => "BackendError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::ExpectedExpression { token } => ErrorTip::Suggestion(format!(
                "Unknown token `{}` when expecting an expression",
                token
            )),
            ErrorImpl::ExpectedCloseParen { token } => {
                ErrorTip::Suggestion(format!("Expected `)`, found `{}`", token))
            }
            ErrorImpl::ExpectedArgumentSeparator { token } => ErrorTip::Suggestion(format!(
                "Expected `,` or `)` in arguments, found `{}`",
                token
            )),
            ErrorImpl::ExpectedFunctionName { token } => ErrorTip::Suggestion(format!(
                "Expected function name in prototype, found `{}`",
                token
            )),
            ErrorImpl::ExpectedPrototypeOpen { token } => ErrorTip::Suggestion(format!(
                "Expected `(` in prototype, found `{}`",
                token
            )),
            ErrorImpl::ExpectedPrototypeClose { token } => ErrorTip::Suggestion(format!(
                "Expected `)` in prototype, found `{}`; parameters are bare names",
                token
            )),
            ErrorImpl::DuplicateParameter { parameter } => ErrorTip::Suggestion(format!(
                "Parameter `{}` appears more than once",
                parameter
            )),
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::UnknownVariable { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is not a parameter of this function",
                variable
            )),
            ErrorImpl::UnknownFunction { function } => ErrorTip::Suggestion(format!(
                "Function `{}` is not defined, did you forget an `extern`?",
                function
            )),
            ErrorImpl::IncorrectArgumentCount {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` expects {} arguments, received {}",
                function, expected, received
            )),
            ErrorImpl::FunctionRedefinition { function } => ErrorTip::Suggestion(format!(
                "Function `{}` already has a body",
                function
            )),
            ErrorImpl::PrototypeMismatch {
                function,
                expected,
                received,
            } => ErrorTip::Suggestion(format!(
                "`{}` was declared with {} parameters, redeclared with {}",
                function, expected, received
            )),
            ErrorImpl::InvalidBinaryOperator { .. } => ErrorTip::Suggestion(String::from(
                "Only `+`, `-`, `*` and `<` can be compiled",
            )),
            ErrorImpl::InvalidFunction { .. } => ErrorTip::None,
            ErrorImpl::BackendError { .. } => ErrorTip::None,
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.internal_error)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unknown token when expecting an expression: {token:?}")]
    ExpectedExpression { token: String },
    #[error("expected ')': {token:?}")]
    ExpectedCloseParen { token: String },
    #[error("expected ',' or ')' in arguments: {token:?}")]
    ExpectedArgumentSeparator { token: String },
    #[error("expected function name in prototype: {token:?}")]
    ExpectedFunctionName { token: String },
    #[error("expected '(' in prototype: {token:?}")]
    ExpectedPrototypeOpen { token: String },
    #[error("expected ')' in prototype: {token:?}")]
    ExpectedPrototypeClose { token: String },
    #[error("duplicate parameter {parameter:?} in prototype")]
    DuplicateParameter { parameter: String },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("unknown variable name {variable:?}")]
    UnknownVariable { variable: String },
    #[error("unknown function referenced {function:?}")]
    UnknownFunction { function: String },
    #[error("incorrect number of arguments passed to {function:?}: expected {expected}, received {received}")]
    IncorrectArgumentCount {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("function {function:?} cannot be redefined")]
    FunctionRedefinition { function: String },
    #[error("function {function:?} redeclared with {received} parameters, previously {expected}")]
    PrototypeMismatch {
        function: String,
        expected: usize,
        received: usize,
    },
    #[error("invalid binary operator {operator:?}")]
    InvalidBinaryOperator { operator: char },
    #[error("generated function {function:?} failed verification")]
    InvalidFunction { function: String },
    #[error("backend error: {message}")]
    BackendError { message: String },
}
