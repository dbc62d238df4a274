//! Schema fragments and their composition
//!
//! A fragment is plain data: the object types it defines, with a reader or
//! resolver per field, and the root fields it adds to `Query` and
//! `Mutation`. Composition is a union. Two fragments may both describe a
//! type, which is how relational edges are attached to types another
//! fragment owns, but no field may be defined twice.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ResolutionError, SchemaError};
use crate::graph::batch::BatchResolver;
use crate::graph::document::OperationKind;
use crate::node::{Object, Resolved};

/// Reads a leaf value straight off the parent record
pub type ScalarReader = fn(&Object) -> Value;

/// How a field of an object type is produced
#[derive(Clone)]
pub enum FieldKind {
    Scalar(ScalarReader),
    /// Resolved for a whole level at once through one batched call
    Batched(Arc<dyn BatchResolver>),
}

/// Decoded arguments of a root field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Map<String, Value>,
}

impl Arguments {
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// `None` when the argument is absent or `null`
    pub fn optional<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>, ResolutionError> {
        match self.values.get(name) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => serde_json::from_value(value.clone())
                .map(Some)
                .map_err(|e| ResolutionError::invalid_argument(name, e)),
        }
    }

    pub fn required<T: DeserializeOwned>(&self, name: &str) -> Result<T, ResolutionError> {
        self.optional(name)?
            .ok_or_else(|| ResolutionError::invalid_argument(name, "is required"))
    }
}

/// Entry point of a query or mutation
#[async_trait]
pub trait RootResolver: Send + Sync + 'static {
    /// Object type of the records this field returns
    fn output_type(&self) -> &'static str;

    /// Argument names this field accepts
    fn arguments(&self) -> &'static [&'static str];

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError>;
}

/// Object type contributed by a fragment
pub struct TypeDef {
    pub name: &'static str,
    pub fields: Vec<(&'static str, FieldKind)>,
}

impl TypeDef {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn scalar(mut self, field: &'static str, reader: ScalarReader) -> Self {
        self.fields.push((field, FieldKind::Scalar(reader)));
        self
    }

    pub fn batched(mut self, field: &'static str, resolver: impl BatchResolver) -> Self {
        self.fields.push((field, FieldKind::Batched(Arc::new(resolver))));
        self
    }
}

/// One service's slice of the graph
#[derive(Default)]
pub struct Fragment {
    pub types: Vec<TypeDef>,
    pub queries: Vec<(&'static str, Arc<dyn RootResolver>)>,
    pub mutations: Vec<(&'static str, Arc<dyn RootResolver>)>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, type_def: TypeDef) -> Self {
        self.types.push(type_def);
        self
    }

    pub fn query(mut self, name: &'static str, resolver: impl RootResolver) -> Self {
        self.queries.push((name, Arc::new(resolver)));
        self
    }

    pub fn mutation(mut self, name: &'static str, resolver: impl RootResolver) -> Self {
        self.mutations.push((name, Arc::new(resolver)));
        self
    }
}

type FieldMap = HashMap<&'static str, FieldKind>;
type RootMap = HashMap<&'static str, Arc<dyn RootResolver>>;

/// The composed graph
#[derive(Default)]
pub struct Schema {
    types: HashMap<&'static str, FieldMap>,
    query: RootMap,
    mutation: RootMap,
}

impl Schema {
    /// Unions `fragments` and checks every referenced type is defined
    pub fn compose(fragments: impl IntoIterator<Item = Fragment>) -> Result<Self, SchemaError> {
        let mut schema = Schema::default();

        for fragment in fragments {
            for type_def in fragment.types {
                let fields = schema.types.entry(type_def.name).or_default();
                for (name, kind) in type_def.fields {
                    if fields.insert(name, kind).is_some() {
                        return Err(SchemaError::DuplicateField {
                            type_name: type_def.name.to_string(),
                            field: name.to_string(),
                        });
                    }
                }
            }
            merge_roots(&mut schema.query, "Query", fragment.queries)?;
            merge_roots(&mut schema.mutation, "Mutation", fragment.mutations)?;
        }

        schema.check_references()?;
        Ok(schema)
    }

    fn check_references(&self) -> Result<(), SchemaError> {
        let roots = self
            .query
            .iter()
            .chain(self.mutation.iter())
            .map(|(name, resolver)| (name.to_string(), resolver.output_type()));
        let edges = self.types.iter().flat_map(|(type_name, fields)| {
            fields.iter().filter_map(move |(name, kind)| match kind {
                FieldKind::Batched(resolver) => Some((format!("{type_name}.{name}"), resolver.child_type())),
                FieldKind::Scalar(_) => None,
            })
        });

        for (field, target) in roots.chain(edges) {
            if !self.types.contains_key(target) {
                return Err(SchemaError::UndefinedType {
                    field,
                    target: target.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn field(&self, type_name: &str, field: &str) -> Option<&FieldKind> {
        self.types.get(type_name)?.get(field)
    }

    pub fn root(&self, kind: OperationKind, field: &str) -> Option<&Arc<dyn RootResolver>> {
        self.roots(kind).get(field)
    }

    pub fn supports(&self, kind: OperationKind) -> bool {
        !self.roots(kind).is_empty()
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.contains_key(type_name)
    }

    fn roots(&self, kind: OperationKind) -> &RootMap {
        match kind {
            OperationKind::Query => &self.query,
            OperationKind::Mutation => &self.mutation,
        }
    }
}

fn merge_roots(
    into: &mut RootMap,
    root_type: &str,
    fields: Vec<(&'static str, Arc<dyn RootResolver>)>,
) -> Result<(), SchemaError> {
    for (name, resolver) in fields {
        if into.insert(name, resolver).is_some() {
            return Err(SchemaError::DuplicateField {
                type_name: root_type.to_string(),
                field: name.to_string(),
            });
        }
    }
    Ok(())
}
