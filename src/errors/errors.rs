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

    pub fn get_internal_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Whether the caller may carry on after this error.
    ///
    /// Only unresolved names and expressions the generator cannot lower are
    /// recoverable; everything else stops the compilation run.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::VariableNotDeclared { .. } | ErrorImpl::UnsupportedExpression { .. }
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedTokenDetailed { .. } => "UnexpectedTokenDetailed",
            ErrorImpl::MismatchedInitializers { .. } => "MismatchedInitializers",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::VariableAlreadyDeclared { .. } => "VariableAlreadyDeclared",
            ErrorImpl::VariableNotDeclared { .. } => "VariableNotDeclared",
            ErrorImpl::AssignToConstant { .. } => "AssignToConstant",
            ErrorImpl::UnexpectedArguments { .. } => "UnexpectedArguments",
            ErrorImpl::MissingArguments { .. } => "MissingArguments",
            ErrorImpl::TypeMatchError { .. } => "TypeMatchError",
            ErrorImpl::FunctionNotDeclared { .. } => "FunctionNotDeclared",
            ErrorImpl::FunctionAlreadyDeclared { .. } => "FunctionAlreadyDeclared",
            ErrorImpl::UnknownType { .. } => "UnknownType",
            ErrorImpl::TypeAlreadyDeclared { .. } => "TypeAlreadyDeclared",
            ErrorImpl::UnknownProperty { .. } => "UnknownProperty",
            ErrorImpl::InvalidReceiver { .. } => "InvalidReceiver",
            ErrorImpl::MissingReturn { .. } => "MissingReturn",
            ErrorImpl::UnreachableStatement => "UnreachableStatement",
            ErrorImpl::UnsupportedNode { .. } => "UnsupportedNode",
            ErrorImpl::UnsupportedExpression { .. } => "UnsupportedExpression",
            ErrorImpl::InternalError { .. } => "InternalError",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`", token))
            }
            ErrorImpl::UnexpectedTokenDetailed { token, message } => {
                ErrorTip::Suggestion(format!("Unexpected token: `{}`, {}", token, message))
            }
            ErrorImpl::MismatchedInitializers { names, values } => ErrorTip::Suggestion(format!(
                "{} names declared but {} values given",
                names, values
            )),
            ErrorImpl::NumberParseError { token, type_ } => ErrorTip::Suggestion(format!(
                "Invalid number: `{}` is not a valid `{}`",
                token, type_
            )),
            ErrorImpl::VariableAlreadyDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` already declared", variable))
            }
            ErrorImpl::VariableNotDeclared { variable } => {
                ErrorTip::Suggestion(format!("Variable `{}` not declared", variable))
            }
            ErrorImpl::AssignToConstant { variable } => ErrorTip::Suggestion(format!(
                "Variable `{}` is const, declare it with `mut` to assign to it",
                variable
            )),
            ErrorImpl::UnexpectedArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::MissingArguments { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::TypeMatchError { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::FunctionNotDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` not declared", function))
            }
            ErrorImpl::FunctionAlreadyDeclared { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::UnknownType { type_ } => {
                ErrorTip::Suggestion(format!("Unknown type `{}` found", type_))
            }
            ErrorImpl::TypeAlreadyDeclared { type_ } => {
                ErrorTip::Suggestion(format!("Type `{}` already declared", type_))
            }
            ErrorImpl::UnknownProperty { type_, property } => ErrorTip::Suggestion(format!(
                "Type `{}` has no property `{}`",
                type_, property
            )),
            ErrorImpl::InvalidReceiver { type_ } => ErrorTip::Suggestion(format!(
                "Receiver type `{}` must be a named type or a pointer to one",
                type_
            )),
            ErrorImpl::MissingReturn { function } => ErrorTip::Suggestion(format!(
                "Missing return statement in function `{}`",
                function
            )),
            ErrorImpl::UnreachableStatement => ErrorTip::Suggestion(String::from(
                "Statement follows a return and can never run",
            )),
            ErrorImpl::UnsupportedNode { node } => {
                ErrorTip::Suggestion(format!("Could not generate code for node `{}`", node))
            }
            ErrorImpl::UnsupportedExpression { expression } => ErrorTip::Suggestion(format!(
                "Could not lower expression of type `{}`",
                expression
            )),
            ErrorImpl::InternalError { message } => ErrorTip::Suggestion(format!(
                "Internal compiler error: {}",
                message
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}:{}:{}",
            self.internal_error, self.position.file, self.position.row, self.position.col
        )
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
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken { token: String },
    #[error("unexpected token ({message}): {token:?}")]
    UnexpectedTokenDetailed { token: String, message: String },
    #[error("{names} names declared but {values} values given")]
    MismatchedInitializers { names: usize, values: usize },
    #[error("could not convert {token:?} to {type_}")]
    NumberParseError { token: String, type_: String },
    #[error("variable {variable:?} already declared")]
    VariableAlreadyDeclared { variable: String },
    #[error("could not find variable {variable:?}")]
    VariableNotDeclared { variable: String },
    #[error("cannot assign to constant {variable:?}")]
    AssignToConstant { variable: String },
    #[error("unexpected arguments: expected {expected:?}, received {received:?}")]
    UnexpectedArguments { expected: usize, received: usize },
    #[error("missing arguments: expected {expected:?}, received {received:?}")]
    MissingArguments { expected: usize, received: usize },
    #[error("types do not match: expected {expected}, received {received}")]
    TypeMatchError { expected: String, received: String },
    #[error("function {function:?} not declared")]
    FunctionNotDeclared { function: String },
    #[error("function {function:?} already declared")]
    FunctionAlreadyDeclared { function: String },
    #[error("unknown type {type_} found")]
    UnknownType { type_: String },
    #[error("type {type_} already declared")]
    TypeAlreadyDeclared { type_: String },
    #[error("type {type_} has no property {property:?}")]
    UnknownProperty { type_: String, property: String },
    #[error("invalid receiver type {type_}")]
    InvalidReceiver { type_: String },
    #[error("missing return statement in function {function:?}")]
    MissingReturn { function: String },
    #[error("unreachable statement after block terminator")]
    UnreachableStatement,
    #[error("could not codegen node of type {node}")]
    UnsupportedNode { node: String },
    #[error("could not lower expression of type {expression}")]
    UnsupportedExpression { expression: String },
    #[error("internal compiler error: {message}")]
    InternalError { message: String },
}
