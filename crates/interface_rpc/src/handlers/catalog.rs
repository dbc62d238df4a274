//! Catalog handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use core_kernel::Page;
use domain_catalog::{CatalogApi, NewProduct, Product};

use crate::dto::catalog::*;
use crate::dto::{IdRequest, IdsRequest, PageRequest};
use crate::error::RpcError;

type Catalog = State<Arc<dyn CatalogApi>>;

/// Upserts a product at its own key
pub async fn put_product(
    State(api): Catalog,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<PutProductResponse>, RpcError> {
    let Json(product) = payload?;
    let id = product.id.clone();
    api.put_product(product).await?;
    Ok(Json(PutProductResponse { id }))
}

/// Creates a product under a generated ID
pub async fn post_product(
    State(api): Catalog,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<Json<ProductResponse>, RpcError> {
    let Json(request) = payload?;
    let product = api.post_product(request).await?;
    Ok(Json(ProductResponse { product }))
}

/// Gets a product by ID
pub async fn get_product(
    State(api): Catalog,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, RpcError> {
    let Json(request) = payload?;
    let product = api.get_product(&request.id).await?;
    Ok(Json(ProductResponse { product }))
}

pub async fn list_products(
    State(api): Catalog,
    payload: Result<Json<PageRequest>, JsonRejection>,
) -> Result<Json<ProductsResponse>, RpcError> {
    let Json(request) = payload?;
    let products = api.list_products(request.into()).await?;
    Ok(Json(ProductsResponse { products }))
}

/// Batched lookup; missing IDs are simply absent from the response
pub async fn list_products_with_ids(
    State(api): Catalog,
    payload: Result<Json<IdsRequest>, JsonRejection>,
) -> Result<Json<ProductsResponse>, RpcError> {
    let Json(request) = payload?;
    let products = api.list_products_with_ids(&request.ids).await?;
    Ok(Json(ProductsResponse { products }))
}

pub async fn search_products(
    State(api): Catalog,
    payload: Result<Json<SearchProductsRequest>, JsonRejection>,
) -> Result<Json<ProductsResponse>, RpcError> {
    let Json(request) = payload?;
    let page = Page::new(request.skip, request.take);
    let products = api.search_products(&request.query, page).await?;
    Ok(Json(ProductsResponse { products }))
}
