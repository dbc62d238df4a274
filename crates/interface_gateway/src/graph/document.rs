//! Parsed query documents

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

/// Kind of operation a document runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    pub fn root_type(self) -> &'static str {
        match self {
            OperationKind::Query => "Query",
            OperationKind::Mutation => "Mutation",
        }
    }
}

/// A single operation with its selection
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub kind: OperationKind,
    pub name: Option<String>,
    pub variables: Vec<VariableDefinition>,
    pub selection: Vec<Field>,
}

/// `$name: Type = default` in an operation header
///
/// The declared type is not checked; arguments are checked when the
/// resolver decodes them.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDefinition {
    pub name: String,
    pub default: Option<InputValue>,
}

/// One selected field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub alias: Option<String>,
    pub name: String,
    pub arguments: Vec<(String, InputValue)>,
    pub selection: Vec<Field>,
}

impl Field {
    /// Key the field's value is written under in the response
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Argument literal as written in the document
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Bare names such as enum values
    Enum(String),
    List(Vec<InputValue>),
    Object(Vec<(String, InputValue)>),
    Variable(String),
}

impl InputValue {
    /// Substitutes variables and converts to JSON
    ///
    /// Returns the name of the first variable that has no value.
    pub fn resolve(&self, variables: &HashMap<String, Value>) -> Result<Value, String> {
        Ok(match self {
            InputValue::Null => Value::Null,
            InputValue::Bool(b) => Value::Bool(*b),
            InputValue::Int(i) => Value::Number((*i).into()),
            InputValue::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
            InputValue::String(s) | InputValue::Enum(s) => Value::String(s.clone()),
            InputValue::List(items) => Value::Array(
                items
                    .iter()
                    .map(|item| item.resolve(variables))
                    .collect::<Result<_, _>>()?,
            ),
            InputValue::Object(fields) => {
                let mut map = Map::new();
                for (name, value) in fields {
                    map.insert(name.clone(), value.resolve(variables)?);
                }
                Value::Object(map)
            }
            InputValue::Variable(name) => variables.get(name).cloned().ok_or_else(|| name.clone())?,
        })
    }
}
