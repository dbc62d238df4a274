//! Gateway errors
//!
//! Three layers fail differently:
//!
//! - a document that does not parse or does not fit the schema is
//!   rejected whole (`GatewayError`), with no data
//! - a field whose resolver fails (`ResolutionError`) is nulled, and the
//!   error is reported at that field's path while siblings still resolve
//! - composing fragments that collide (`SchemaError`) is a startup failure

use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::ServiceError;

/// Syntax error with its position in the document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {line}:{column}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ParseError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}

/// Failure that rejects the whole document
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GatewayError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("Cannot query field \"{field}\" on type \"{type_name}\"")]
    UnknownField { type_name: String, field: String },

    #[error("Field \"{field}\" of type \"{type_name}\" must have a selection of subfields")]
    MissingSelection { type_name: String, field: String },

    #[error("Field \"{field}\" must not have a selection since type \"{type_name}\" has no subfields")]
    UnexpectedSelection { type_name: String, field: String },

    #[error("Unknown argument \"{argument}\" on field \"{field}\"")]
    UnknownArgument { field: String, argument: String },

    #[error("Variable \"${0}\" is not defined")]
    UndefinedVariable(String),

    #[error("Operation type \"{0}\" is not supported by this schema")]
    UnsupportedOperation(&'static str),
}

/// Failure of a single field
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Invalid argument \"{name}\": {message}")]
    InvalidArgument { name: String, message: String },
}

impl ResolutionError {
    pub fn invalid_argument(name: impl Into<String>, message: impl ToString) -> Self {
        ResolutionError::InvalidArgument {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

/// Composition failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Field \"{field}\" is defined twice on type \"{type_name}\"")]
    DuplicateField { type_name: String, field: String },

    #[error("Field \"{field}\" references undefined type \"{target}\"")]
    UndefinedType { field: String, target: String },
}

/// Error entry of a response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
}

impl GraphError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
        }
    }

    pub fn at(message: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }
}

impl From<GatewayError> for GraphError {
    fn from(err: GatewayError) -> Self {
        GraphError::new(err.to_string())
    }
}
