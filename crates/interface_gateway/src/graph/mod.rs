//! Query graph machinery
//!
//! Parses documents, composes fragments into a schema and executes
//! documents against it. Which types exist and how their fields resolve
//! is supplied by the `fragments` module.

pub mod document;
pub mod parser;
pub mod schema;
pub mod batch;
pub mod executor;

pub use batch::{BatchResolver, Loaded};
pub use document::{Document, OperationKind};
pub use executor::{execute, Execution};
pub use parser::parse;
pub use schema::{Arguments, Fragment, RootResolver, Schema, TypeDef};
