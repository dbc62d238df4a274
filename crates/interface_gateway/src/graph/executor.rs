//! Document execution
//!
//! Execution is level-wise rather than record-wise. All records of one
//! type at one depth form a level; every field of the selection is
//! resolved for the whole level at once, and the children of all parents
//! are flattened into the next level before recursing. A batched field is
//! therefore one call per level regardless of how many parents the level
//! holds.
//!
//! Sibling fields of a query run concurrently. Mutation root fields run in
//! document order, one after another.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::{join_all, BoxFuture, FutureExt};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{GatewayError, GraphError};
use crate::graph::batch::resolve_batch;
use crate::graph::document::{Document, Field, OperationKind};
use crate::graph::schema::{Arguments, FieldKind, RootResolver, Schema};
use crate::node::{Object, Resolved};

const TYPENAME: &str = "__typename";

/// Values of one field for every parent of a level, in parent order
struct Column {
    values: Vec<Value>,
    errors: Vec<GraphError>,
}

/// One JSON object per parent of a level
struct Level {
    rows: Vec<Map<String, Value>>,
    errors: Vec<GraphError>,
}

/// Root field ready to run
struct Prepared<'d> {
    field: &'d Field,
    resolver: Arc<dyn RootResolver>,
    arguments: Arguments,
}

/// Outcome of a document that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    pub data: Map<String, Value>,
    pub errors: Vec<GraphError>,
}

/// Validates `document` against `schema` and runs it
///
/// Validation failures reject the whole document. Failures while resolving
/// are reported per field in `Execution::errors`.
pub async fn execute(
    schema: &Schema,
    document: &Document,
    variables: Map<String, Value>,
) -> Result<Execution, GatewayError> {
    let variables = bind_variables(document, variables);
    let roots = prepare(schema, document, &variables)?;

    debug!(kind = ?document.kind, fields = roots.len(), "executing document");

    let results = match document.kind {
        OperationKind::Query => {
            join_all(roots.iter().map(|root| execute_root(schema, root))).await
        }
        OperationKind::Mutation => {
            let mut results = Vec::with_capacity(roots.len());
            for root in &roots {
                results.push(execute_root(schema, root).await);
            }
            results
        }
    };

    let mut execution = Execution {
        data: Map::new(),
        errors: Vec::new(),
    };
    for (root, (value, errors)) in roots.iter().zip(results) {
        execution.data.insert(root.field.response_key().to_string(), value);
        execution.errors.extend(errors);
    }
    Ok(execution)
}

fn bind_variables(document: &Document, provided: Map<String, Value>) -> HashMap<String, Value> {
    let mut variables: HashMap<String, Value> = provided.into_iter().collect();
    for definition in &document.variables {
        if let Some(default) = &definition.default {
            if !variables.contains_key(&definition.name) {
                if let Ok(value) = default.resolve(&HashMap::new()) {
                    variables.insert(definition.name.clone(), value);
                }
            }
        }
    }
    variables
}

fn prepare<'d>(
    schema: &Schema,
    document: &'d Document,
    variables: &HashMap<String, Value>,
) -> Result<Vec<Prepared<'d>>, GatewayError> {
    let root_type = document.kind.root_type();
    if !schema.supports(document.kind) {
        return Err(GatewayError::UnsupportedOperation(root_type));
    }

    let mut prepared = Vec::with_capacity(document.selection.len());
    for field in &document.selection {
        if field.name == TYPENAME {
            return Err(GatewayError::UnknownField {
                type_name: root_type.to_string(),
                field: field.name.clone(),
            });
        }
        let resolver = schema
            .root(document.kind, &field.name)
            .ok_or_else(|| GatewayError::UnknownField {
                type_name: root_type.to_string(),
                field: field.name.clone(),
            })?;

        let mut arguments = Map::new();
        for (name, value) in &field.arguments {
            if !resolver.arguments().iter().any(|accepted| *accepted == name.as_str()) {
                return Err(GatewayError::UnknownArgument {
                    field: field.name.clone(),
                    argument: name.clone(),
                });
            }
            let value = value.resolve(variables).map_err(GatewayError::UndefinedVariable)?;
            arguments.insert(name.clone(), value);
        }

        let output_type = resolver.output_type();
        if field.selection.is_empty() {
            return Err(GatewayError::MissingSelection {
                type_name: output_type.to_string(),
                field: field.name.clone(),
            });
        }
        validate_selection(schema, output_type, &field.selection)?;

        prepared.push(Prepared {
            field,
            resolver: resolver.clone(),
            arguments: Arguments::new(arguments),
        });
    }
    Ok(prepared)
}

fn validate_selection(schema: &Schema, type_name: &str, selection: &[Field]) -> Result<(), GatewayError> {
    for field in selection {
        if let Some((argument, _)) = field.arguments.first() {
            return Err(GatewayError::UnknownArgument {
                field: field.name.clone(),
                argument: argument.clone(),
            });
        }
        let child_type = match (field.name.as_str(), schema.field(type_name, &field.name)) {
            (TYPENAME, _) | (_, Some(FieldKind::Scalar(_))) => None,
            (_, Some(FieldKind::Batched(resolver))) => Some(resolver.child_type()),
            (_, None) => {
                return Err(GatewayError::UnknownField {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                })
            }
        };

        match child_type {
            None if !field.selection.is_empty() => {
                return Err(GatewayError::UnexpectedSelection {
                    type_name: type_name.to_string(),
                    field: field.name.clone(),
                })
            }
            Some(child) if field.selection.is_empty() => {
                return Err(GatewayError::MissingSelection {
                    type_name: child.to_string(),
                    field: field.name.clone(),
                })
            }
            Some(child) => validate_selection(schema, child, &field.selection)?,
            None => {}
        }
    }
    Ok(())
}

async fn execute_root(schema: &Schema, root: &Prepared<'_>) -> (Value, Vec<GraphError>) {
    let path = vec![root.field.response_key().to_string()];

    match root.resolver.resolve(root.arguments.clone()).await {
        Ok(resolved) => {
            let column = complete(
                schema,
                root.resolver.output_type(),
                vec![resolved],
                &root.field.selection,
                path,
            )
            .await;
            let value = column.values.into_iter().next().unwrap_or(Value::Null);
            (value, column.errors)
        }
        Err(err) => {
            warn!(field = %root.field.name, error = %err, "root field failed");
            (Value::Null, vec![GraphError::at(err.to_string(), path)])
        }
    }
}

/// Shape of one parent's result, used to split a flattened level back up
enum Shape {
    Null,
    One,
    Many(usize),
}

/// Runs the selection over every child and regroups the rows per parent
async fn complete(
    schema: &Schema,
    child_type: &str,
    resolved: Vec<Resolved>,
    selection: &[Field],
    path: Vec<String>,
) -> Column {
    let mut shapes = Vec::with_capacity(resolved.len());
    let mut children = Vec::new();
    for result in resolved {
        match result {
            Resolved::Null => shapes.push(Shape::Null),
            Resolved::One(child) => {
                shapes.push(Shape::One);
                children.push(child);
            }
            Resolved::Many(many) => {
                shapes.push(Shape::Many(many.len()));
                children.extend(many);
            }
        }
    }

    let level = execute_level(schema, child_type, children, selection, path).await;

    let mut rows = level.rows.into_iter();
    let values = shapes
        .into_iter()
        .map(|shape| match shape {
            Shape::Null => Value::Null,
            Shape::One => rows.next().map(Value::Object).unwrap_or(Value::Null),
            Shape::Many(count) => Value::Array(rows.by_ref().take(count).map(Value::Object).collect()),
        })
        .collect();

    Column {
        values,
        errors: level.errors,
    }
}

fn execute_level<'a>(
    schema: &'a Schema,
    type_name: &'a str,
    parents: Vec<Object>,
    selection: &'a [Field],
    path: Vec<String>,
) -> BoxFuture<'a, Level> {
    async move {
        if parents.is_empty() {
            return Level {
                rows: Vec::new(),
                errors: Vec::new(),
            };
        }

        let columns = join_all(selection.iter().map(|field| {
            let mut field_path = path.clone();
            field_path.push(field.response_key().to_string());
            execute_field(schema, type_name, &parents, field, field_path)
        }))
        .await;

        let mut rows = vec![Map::new(); parents.len()];
        let mut errors = Vec::new();
        for (field, column) in selection.iter().zip(columns) {
            for (row, value) in rows.iter_mut().zip(column.values) {
                row.insert(field.response_key().to_string(), value);
            }
            errors.extend(column.errors);
        }
        Level { rows, errors }
    }
    .boxed()
}

async fn execute_field(
    schema: &Schema,
    type_name: &str,
    parents: &[Object],
    field: &Field,
    path: Vec<String>,
) -> Column {
    let leaf = |values: Vec<Value>| Column {
        values,
        errors: Vec::new(),
    };

    if field.name == TYPENAME {
        return leaf(
            parents
                .iter()
                .map(|parent| Value::String(parent.type_name().to_string()))
                .collect(),
        );
    }

    match schema.field(type_name, &field.name) {
        Some(FieldKind::Scalar(read)) => leaf(parents.iter().map(|parent| read(parent)).collect()),
        Some(FieldKind::Batched(resolver)) => match resolve_batch(resolver.as_ref(), parents).await {
            Ok(resolved) => complete(schema, resolver.child_type(), resolved, &field.selection, path).await,
            Err(err) => {
                warn!(
                    type_name,
                    field = %field.name,
                    parents = parents.len(),
                    error = %err,
                    "batched field failed"
                );
                Column {
                    values: vec![Value::Null; parents.len()],
                    errors: vec![GraphError::at(err.to_string(), path)],
                }
            }
        },
        None => leaf(vec![Value::Null; parents.len()]),
    }
}
