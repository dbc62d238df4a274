//! Tests for the service routers and the clients that call them

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::{Page, ServiceError};
use domain_account::{AccountApi, AccountService, InMemoryAccountRepository, NewAccount};
use domain_catalog::{CatalogApi, CatalogService, InMemoryProductRepository, NewProduct, Product};
use domain_order::{
    CatalogPricing, InMemoryOrderRepository, NewOrder, OrderApi, OrderService, OrderedProduct,
};
use interface_rpc::{
    account_router, catalog_router, order_router, paths, AccountClient, CatalogClient,
    ClientConfig, OrderClient,
};

async fn catalog() -> Arc<dyn CatalogApi> {
    let repository = InMemoryProductRepository::with_products(vec![
        Product::new("p1", "Widget", "desc", 9.99),
        Product::new("p2", "Gadget", "desc", 19.99),
    ])
    .await;
    Arc::new(CatalogService::new(Arc::new(repository)))
}

async fn call(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Serves `app` on an ephemeral port and returns its address
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr.to_string()
}

// ============================================================================
// Routers
// ============================================================================

mod routers {
    use super::*;

    #[tokio::test]
    async fn test_health() {
        let app = catalog_router(catalog().await);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_product() {
        let (status, body) =
            call(catalog_router(catalog().await), paths::catalog::GET_PRODUCT, json!({"id": "p1"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["product"]["name"], "Widget");
        assert_eq!(body["product"]["id"], "p1");
    }

    #[tokio::test]
    async fn test_missing_product_is_404_with_kind() {
        let (status, body) =
            call(catalog_router(catalog().await), paths::catalog::GET_PRODUCT, json!({"id": "p3"})).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
        assert_eq!(body["id"], "p3");
    }

    #[tokio::test]
    async fn test_batch_lookup_omits_missing() {
        let (status, body) = call(
            catalog_router(catalog().await),
            paths::catalog::LIST_PRODUCTS_WITH_IDS,
            json!({"ids": ["p1", "p3", "p2"]}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_list_defaults_page() {
        let (status, body) =
            call(catalog_router(catalog().await), paths::catalog::LIST_PRODUCTS, json!({})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_put_product_acknowledges_key() {
        let api = catalog().await;

        let (status, body) = call(
            catalog_router(api.clone()),
            paths::catalog::PUT_PRODUCT,
            json!({"id": "p1", "name": "Widget v2", "description": "desc", "price": 11.0}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "p1"}));
        assert_eq!(api.get_product("p1").await.unwrap().name, "Widget v2");
    }

    #[tokio::test]
    async fn test_invalid_product_is_422() {
        let (status, body) = call(
            catalog_router(catalog().await),
            paths::catalog::POST_PRODUCT,
            json!({"name": "Widget", "description": "", "price": -1.0}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_malformed_body_is_400_json() {
        let (status, body) = call(
            catalog_router(catalog().await),
            paths::catalog::GET_PRODUCT,
            json!({"key": "p1"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "bad_request");
    }

    #[tokio::test]
    async fn test_account_round_trip() {
        let api: Arc<dyn AccountApi> =
            Arc::new(AccountService::new(Arc::new(InMemoryAccountRepository::new())));

        let (status, created) = call(
            account_router(api.clone()),
            paths::account::POST_ACCOUNT,
            json!({"name": "Ada"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let id = created["account"]["id"].as_str().unwrap().to_string();
        let (status, fetched) =
            call(account_router(api), paths::account::GET_ACCOUNT, json!({"id": id})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["account"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_closed_repository_is_503() {
        let repository = Arc::new(InMemoryOrderRepository::new());
        let api: Arc<dyn OrderApi> = Arc::new(OrderService::new(
            repository.clone(),
            Arc::new(CatalogPricing::new(catalog().await)),
        ));
        domain_order::OrderRepository::close(repository.as_ref()).await.unwrap();

        let (status, body) = call(
            order_router(api),
            paths::order::GET_ORDERS_FOR_ACCOUNT,
            json!({"account_id": "a1"}),
        )
        .await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "closed");
    }
}

// ============================================================================
// Clients over a real socket
// ============================================================================

mod clients {
    use super::*;

    #[tokio::test]
    async fn test_catalog_client_implements_contract() {
        let addr = spawn(catalog_router(catalog().await)).await;
        let client = CatalogClient::new(&ClientConfig::new(addr)).unwrap();

        let product = client.get_product("p1").await.unwrap();
        assert_eq!(product.price, 9.99);

        let batch = client
            .list_products_with_ids(&["p1".into(), "p3".into(), "p2".into()])
            .await
            .unwrap();
        assert_eq!(batch.len(), 2);

        let hits = client.search_products("gadget", Page::new(0, 10)).await.unwrap();
        assert_eq!(hits[0].id, "p2");
    }

    #[tokio::test]
    async fn test_put_product_is_idempotent_over_the_wire() {
        let addr = spawn(catalog_router(catalog().await)).await;
        let client = CatalogClient::new(&ClientConfig::new(addr)).unwrap();
        let lamp = Product::new("sku-42", "Lamp", "desk lamp", 24.0);

        client.put_product(lamp.clone()).await.unwrap();
        client.put_product(lamp.clone()).await.unwrap();

        assert_eq!(client.get_product("sku-42").await.unwrap(), lamp);
        assert_eq!(client.list_products(Page::new(0, 10)).await.unwrap().len(), 3);

        let repriced = Product::new("sku-42", "Lamp", "desk lamp", 30.0);
        client.put_product(repriced.clone()).await.unwrap();
        assert_eq!(client.get_product("sku-42").await.unwrap(), repriced);
        assert_eq!(client.list_products(Page::new(0, 10)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_not_found_survives_the_wire() {
        let addr = spawn(catalog_router(catalog().await)).await;
        let client = CatalogClient::new(&ClientConfig::new(addr)).unwrap();

        let err = client.get_product("p3").await.unwrap_err();

        assert_eq!(err, ServiceError::not_found("Product", "p3"));
    }

    #[tokio::test]
    async fn test_validation_survives_the_wire() {
        let addr = spawn(catalog_router(catalog().await)).await;
        let client = CatalogClient::new(&ClientConfig::new(addr)).unwrap();

        let err = client
            .post_product(NewProduct::new("", "", 1.0))
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_peer_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        drop(listener);

        let client = AccountClient::new(&ClientConfig::new(addr)).unwrap();
        let err = client.get_account("a1").await.unwrap_err();

        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_order_priced_through_remote_catalog() {
        let catalog_addr = spawn(catalog_router(catalog().await)).await;
        let remote_catalog = CatalogClient::new(&ClientConfig::new(catalog_addr)).unwrap();
        let orders: Arc<dyn OrderApi> = Arc::new(OrderService::new(
            Arc::new(InMemoryOrderRepository::new()),
            Arc::new(CatalogPricing::new(Arc::new(remote_catalog))),
        ));
        let order_addr = spawn(order_router(orders)).await;
        let client = OrderClient::new(&ClientConfig::new(order_addr)).unwrap();

        let order = client
            .post_order(NewOrder::new(
                "a1",
                vec![OrderedProduct::new("p1", 2), OrderedProduct::new("p2", 1)],
            ))
            .await
            .unwrap();

        assert!((order.total_price - 39.97).abs() < 1e-9);
        let listed = client.get_orders_for_accounts(&["a1".into(), "a2".into()]).await.unwrap();
        assert_eq!(listed, vec![order.clone()]);

        assert_eq!(client.get_order(&order.id).await.unwrap(), order);
        assert_eq!(
            client.get_order("o-missing").await.unwrap_err(),
            ServiceError::not_found("Order", "o-missing")
        );
    }

    #[tokio::test]
    async fn test_account_client_lists() {
        let api: Arc<dyn AccountApi> =
            Arc::new(AccountService::new(Arc::new(InMemoryAccountRepository::new())));
        let addr = spawn(account_router(api)).await;
        let client = AccountClient::new(&ClientConfig::new(addr)).unwrap();

        client.post_account(NewAccount::new("Ada")).await.unwrap();
        client.post_account(NewAccount::new("Grace")).await.unwrap();

        assert_eq!(client.list_accounts(Page::new(0, 10)).await.unwrap().len(), 2);
        assert_eq!(client.list_accounts(Page::new(1, 10)).await.unwrap().len(), 1);
    }
}
