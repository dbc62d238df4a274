//! The composed gateway

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use domain_account::AccountApi;
use domain_catalog::CatalogApi;
use domain_order::OrderApi;

use crate::error::{GraphError, SchemaError};
use crate::fragments::{account_fragment, catalog_fragment, edge_fragment, order_fragment};
use crate::graph::{self, Schema};

/// The service contracts the gateway resolves against
#[derive(Clone)]
pub struct Services {
    pub account: Arc<dyn AccountApi>,
    pub catalog: Arc<dyn CatalogApi>,
    pub order: Arc<dyn OrderApi>,
}

/// Body of `POST /query`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphRequest {
    pub query: String,
    #[serde(default)]
    pub variables: Option<Map<String, Value>>,
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl GraphRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn variables(mut self, variables: Value) -> Self {
        self.variables = variables.as_object().cloned();
        self
    }
}

/// Response body: `data` is absent when the document was rejected whole
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphError>,
}

impl GraphResponse {
    pub fn rejected(error: impl Into<GraphError>) -> Self {
        Self {
            data: None,
            errors: vec![error.into()],
        }
    }
}

/// Composed schema plus the entry point that runs documents against it
pub struct Gateway {
    schema: Schema,
}

impl Gateway {
    /// Composes the service fragments and the cross-service edges
    pub fn new(services: Services) -> Result<Self, SchemaError> {
        let schema = Schema::compose([
            account_fragment(services.account),
            catalog_fragment(services.catalog.clone()),
            order_fragment(services.order.clone()),
            edge_fragment(services.order, services.catalog),
        ])?;
        info!("Schema composed");
        Ok(Self { schema })
    }

    #[instrument(skip_all, fields(operation = request.operation_name.as_deref().unwrap_or("")))]
    pub async fn execute(&self, request: GraphRequest) -> GraphResponse {
        let document = match graph::parse(&request.query) {
            Ok(document) => document,
            Err(err) => return GraphResponse::rejected(crate::error::GatewayError::from(err)),
        };

        match graph::execute(&self.schema, &document, request.variables.unwrap_or_default()).await {
            Ok(execution) => GraphResponse {
                data: Some(Value::Object(execution.data)),
                errors: execution.errors,
            },
            Err(err) => GraphResponse::rejected(err),
        }
    }
}
