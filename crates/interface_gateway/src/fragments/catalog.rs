//! Catalog fragment

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use domain_catalog::{CatalogApi, NewProduct};

use super::PaginationInput;
use crate::error::ResolutionError;
use crate::graph::{Arguments, Fragment, RootResolver, TypeDef};
use crate::node::{value_or_null, Object, Resolved};

pub fn catalog_fragment(catalog: Arc<dyn CatalogApi>) -> Fragment {
    Fragment::new()
        .with_type(
            TypeDef::new("Product")
                .scalar("id", |node| value_or_null(node.as_product().map(|p| p.id.clone())))
                .scalar("name", |node| value_or_null(node.as_product().map(|p| p.name.clone())))
                .scalar("description", |node| {
                    value_or_null(node.as_product().map(|p| p.description.clone()))
                })
                .scalar("price", |node| value_or_null(node.as_product().map(|p| p.price))),
        )
        .query(
            "products",
            ProductsQuery {
                catalog: catalog.clone(),
            },
        )
        .mutation("createProduct", CreateProduct { catalog })
}

/// `products(pagination, query, id, ids)`
///
/// `id` wins over `ids`, which wins over `query`; with none of them the
/// catalog is listed.
struct ProductsQuery {
    catalog: Arc<dyn CatalogApi>,
}

#[async_trait]
impl RootResolver for ProductsQuery {
    fn output_type(&self) -> &'static str {
        "Product"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["pagination", "query", "id", "ids"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        if let Some(id) = arguments.optional::<String>("id")? {
            let product = self.catalog.get_product(&id).await?;
            return Ok(Resolved::Many(vec![Object::Product(product)]));
        }

        let page = arguments
            .optional::<PaginationInput>("pagination")?
            .unwrap_or_default()
            .page();

        let products = match arguments.optional::<Vec<String>>("ids")? {
            Some(ids) if !ids.is_empty() => self.catalog.list_products_with_ids(&ids).await?,
            _ => match arguments.optional::<String>("query")? {
                Some(query) if !query.trim().is_empty() => {
                    self.catalog.search_products(&query, page).await?
                }
                _ => self.catalog.list_products(page).await?,
            },
        };
        Ok(Resolved::Many(products.into_iter().map(Object::Product).collect()))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ProductInput {
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
}

/// `createProduct(product: {name, description, price})`
struct CreateProduct {
    catalog: Arc<dyn CatalogApi>,
}

#[async_trait]
impl RootResolver for CreateProduct {
    fn output_type(&self) -> &'static str {
        "Product"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["product"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        let input: ProductInput = arguments.required("product")?;
        let product = self
            .catalog
            .post_product(NewProduct::new(input.name, input.description, input.price))
            .await?;
        Ok(Resolved::One(Object::Product(product)))
    }
}
