//! End-to-end tests for the gateway against in-process services

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use async_trait::async_trait;
use core_kernel::{Page, ServiceError, ServiceResult};
use domain_account::{Account, AccountApi, NewAccount};
use domain_order::OrderRepository;
use interface_gateway::{create_router, Gateway, GraphRequest, GraphResponse, Services};
use test_utils::{
    fake_catalog, AccountFixtures, CountingAccounts, CountingCatalog, CountingOrders,
    InMemoryServices, OrderFixtures, ProductFixtures,
};

struct Harness {
    gateway: Gateway,
    services: InMemoryServices,
    accounts: Arc<CountingAccounts>,
    catalog: Arc<CountingCatalog>,
    orders: Arc<CountingOrders>,
}

impl Harness {
    fn new(services: InMemoryServices) -> Self {
        let accounts = CountingAccounts::new(services.account.clone());
        let catalog = CountingCatalog::new(services.catalog.clone());
        let orders = CountingOrders::new(services.order.clone());
        let gateway = Gateway::new(Services {
            account: accounts.clone(),
            catalog: catalog.clone(),
            order: orders.clone(),
        })
        .unwrap();

        Self {
            gateway,
            services,
            accounts,
            catalog,
            orders,
        }
    }

    async fn run(&self, query: &str) -> GraphResponse {
        self.gateway.execute(GraphRequest::new(query)).await
    }

    async fn run_with(&self, query: &str, variables: Value) -> GraphResponse {
        self.gateway
            .execute(GraphRequest::new(query).variables(variables))
            .await
    }
}

fn data(response: &GraphResponse) -> &Value {
    response.data.as_ref().expect("response has data")
}

/// `count` accounts, each with one order for p1 and p2
async fn populated(count: usize) -> Harness {
    let accounts = AccountFixtures::numbered(count);
    let orders = accounts
        .iter()
        .map(|account| OrderFixtures::order(&format!("o-{}", account.id), &account.id, &["p1", "p2"]))
        .collect();
    Harness::new(InMemoryServices::seeded(accounts, ProductFixtures::pair(), orders).await)
}

const NESTED: &str = r#"{
    accounts(pagination: {skip: 0, take: 100}) {
        id
        orders { id products { id name quantity } }
    }
}"#;

// ============================================================================
// Batched resolution
// ============================================================================

mod batching {
    use super::*;

    async fn assert_one_call_per_level(count: usize) {
        let harness = populated(count).await;

        let response = harness.run(NESTED).await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let accounts = data(&response)["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), count);
        for account in accounts {
            let orders = account["orders"].as_array().unwrap();
            assert_eq!(orders.len(), 1);
            assert_eq!(orders[0]["products"].as_array().unwrap().len(), 2);
        }

        assert_eq!(harness.accounts.log.total(), 1);
        assert_eq!(harness.orders.log.count("get_orders_for_accounts"), 1);
        assert_eq!(harness.orders.log.count("get_orders_for_account"), 0);
        assert_eq!(harness.catalog.log.count("list_products_with_ids"), 1);
        assert_eq!(harness.catalog.log.total(), 1);
    }

    #[tokio::test]
    async fn test_one_account() {
        assert_one_call_per_level(1).await;
    }

    #[tokio::test]
    async fn test_ten_accounts() {
        assert_one_call_per_level(10).await;
    }

    #[tokio::test]
    async fn test_hundred_accounts() {
        assert_one_call_per_level(100).await;
    }

    #[tokio::test]
    async fn test_keys_are_deduplicated() {
        let harness = populated(10).await;

        harness.run(NESTED).await;

        let product_batches = harness.catalog.log.batches();
        assert_eq!(product_batches.len(), 1);
        let mut keys = product_batches[0].clone();
        keys.sort();
        assert_eq!(keys, vec!["p1", "p2"]);

        let account_batch = &harness.orders.log.batches()[0];
        assert_eq!(account_batch.len(), 10);
    }

    #[tokio::test]
    async fn test_account_with_five_orders_of_three_products() {
        let products = ProductFixtures::numbered(15);
        let orders = (0..5)
            .map(|n| {
                let ids: Vec<String> = (1..=3).map(|k| format!("p{}", n * 3 + k)).collect();
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                OrderFixtures::order(&format!("o{n}"), "a1", &ids)
            })
            .collect();
        let harness = Harness::new(
            InMemoryServices::seeded(vec![AccountFixtures::ada()], products, orders).await,
        );

        let response = harness
            .run(r#"{ accounts(id: "a1") { name orders { id products { name price quantity } } } }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let account = &data(&response)["accounts"][0];
        assert_eq!(account["name"], "Ada");
        let orders = account["orders"].as_array().unwrap();
        assert_eq!(orders.len(), 5);
        assert!(orders
            .iter()
            .all(|order| order["products"].as_array().unwrap().len() == 3));

        assert_eq!(harness.accounts.log.count("get_account"), 1);
        assert_eq!(harness.orders.log.total(), 1);
        assert_eq!(harness.catalog.log.total(), 1);
        assert_eq!(harness.catalog.log.batches()[0].len(), 15);
    }

    #[tokio::test]
    async fn test_account_without_orders_makes_no_catalog_call() {
        let harness = Harness::new(
            InMemoryServices::seeded(vec![AccountFixtures::ada()], ProductFixtures::pair(), Vec::new()).await,
        );

        let response = harness.run(NESTED).await;

        assert_eq!(data(&response)["accounts"][0]["orders"], json!([]));
        assert_eq!(harness.catalog.log.total(), 0);
    }

    #[tokio::test]
    async fn test_dangling_product_is_omitted_not_an_error() {
        let harness = Harness::new(
            InMemoryServices::seeded(
                vec![AccountFixtures::ada()],
                ProductFixtures::pair(),
                vec![OrderFixtures::order("o1", "a1", &["p1", "retired"])],
            )
            .await,
        );

        let response = harness.run(NESTED).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            data(&response)["accounts"][0]["orders"][0]["products"],
            json!([{"id": "p1", "name": "Widget", "quantity": 1}])
        );
    }
}

// ============================================================================
// Partial failure
// ============================================================================

mod partial_failure {
    use super::*;

    #[tokio::test]
    async fn test_failed_edge_nulls_field_and_keeps_siblings() {
        let harness = populated(3).await;
        harness.services.orders.close().await.unwrap();

        let response = harness.run("{ accounts { id name orders { id } } }").await;

        let accounts = data(&response)["accounts"].as_array().unwrap();
        assert_eq!(accounts.len(), 3);
        assert!(accounts.iter().all(|a| a["orders"].is_null()));
        assert!(accounts.iter().all(|a| a["name"].is_string()));

        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, vec!["accounts", "orders"]);
    }

    #[tokio::test]
    async fn test_failed_root_field_keeps_sibling_root() {
        let harness = populated(2).await;

        let response = harness
            .run(r#"{ missing: products(id: "p9") { id } all: accounts { id } }"#)
            .await;

        assert!(data(&response)["missing"].is_null());
        assert_eq!(data(&response)["all"].as_array().unwrap().len(), 2);
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, vec!["missing"]);
    }

    #[tokio::test]
    async fn test_bad_argument_fails_only_its_field() {
        let harness = populated(1).await;

        let response = harness
            .run("{ accounts(pagination: {skip: -1}) { id } products { id } }")
            .await;

        assert!(data(&response)["accounts"].is_null());
        assert_eq!(data(&response)["products"].as_array().unwrap().len(), 2);
        assert!(response.errors[0].message.contains("pagination"));
    }
}

// ============================================================================
// Root fields and mutations
// ============================================================================

mod operations {
    use super::*;

    #[tokio::test]
    async fn test_products_by_ids_query_and_list() {
        let harness = populated(1).await;

        let response = harness
            .run(
                r#"{
                    byIds: products(ids: ["p1", "p3", "p2"]) { id }
                    found: products(query: "gadget") { id price }
                    page: products(pagination: {skip: 1, take: 1}) { __typename }
                }"#,
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let data = data(&response);
        assert_eq!(data["byIds"].as_array().unwrap().len(), 2);
        assert_eq!(data["found"], json!([{"id": "p2", "price": 19.99}]));
        assert_eq!(data["page"], json!([{"__typename": "Product"}]));
    }

    #[tokio::test]
    async fn test_generated_catalog_pages_and_search() {
        let catalog = fake_catalog(30);
        let target = catalog[17].clone();
        let harness = Harness::new(InMemoryServices::seeded(Vec::new(), catalog, Vec::new()).await);

        let response = harness
            .run_with(
                r#"query Browse($q: String) {
                    page: products(pagination: {skip: 10, take: 10}) { id }
                    hits: products(query: $q, pagination: {take: 30}) { id }
                }"#,
                json!({"q": target.name}),
            )
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        assert_eq!(data(&response)["page"].as_array().unwrap().len(), 10);
        let hits: Vec<&str> = data(&response)["hits"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|hit| hit["id"].as_str())
            .collect();
        assert!(hits.contains(&target.id.as_str()));
    }

    #[tokio::test]
    async fn test_mutations_then_nested_order() {
        let harness = Harness::new(InMemoryServices::seeded(Vec::new(), ProductFixtures::pair(), Vec::new()).await);

        let created = harness
            .run(r#"mutation { createAccount(account: {name: "Ada"}) { id name } createProduct(product: {name: "Gizmo", description: "new", price: 5.0}) { id } }"#)
            .await;
        assert!(created.errors.is_empty(), "{:?}", created.errors);
        let account_id = data(&created)["createAccount"]["id"].as_str().unwrap().to_string();
        let product_id = data(&created)["createProduct"]["id"].as_str().unwrap().to_string();

        let ordered = harness
            .run_with(
                r#"mutation Place($order: OrderInput!) {
                    createOrder(order: $order) { totalPrice products { id quantity } }
                }"#,
                json!({"order": {
                    "accountId": account_id,
                    "products": [{"id": product_id, "quantity": 2}, {"id": "p1", "quantity": 1}]
                }}),
            )
            .await;

        assert!(ordered.errors.is_empty(), "{:?}", ordered.errors);
        let order = &data(&ordered)["createOrder"];
        assert!((order["totalPrice"].as_f64().unwrap() - 19.99).abs() < 1e-9);
        assert_eq!(order["products"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_order_root_resolves_nested_products() {
        let harness = populated(1).await;

        let response = harness
            .run(r#"{ order(id: "o-a1") { id products { id name quantity } } }"#)
            .await;

        assert!(response.errors.is_empty(), "{:?}", response.errors);
        let order = &data(&response)["order"];
        assert_eq!(order["id"], "o-a1");
        assert_eq!(
            order["products"],
            json!([
                {"id": "p1", "name": "Widget", "quantity": 1},
                {"id": "p2", "name": "Gadget", "quantity": 1}
            ])
        );
        assert_eq!(harness.orders.log.count("get_order"), 1);
        assert_eq!(harness.catalog.log.count("list_products_with_ids"), 1);
    }

    #[tokio::test]
    async fn test_missing_order_is_a_field_error() {
        let harness = populated(1).await;

        let response = harness
            .run(r#"{ order(id: "o-none") { id } accounts { id } }"#)
            .await;

        assert!(data(&response)["order"].is_null());
        assert_eq!(data(&response)["accounts"], json!([{"id": "a1"}]));
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].path, vec!["order"]);
    }

    #[tokio::test]
    async fn test_order_for_unknown_product_fails() {
        let harness = populated(1).await;

        let response = harness
            .run(r#"mutation { createOrder(order: {accountId: "a1", products: [{id: "p9", quantity: 1}]}) { id } }"#)
            .await;

        assert!(data(&response)["createOrder"].is_null());
        assert_eq!(response.errors[0].path, vec!["createOrder"]);
    }
}

// ============================================================================
// Rejected documents
// ============================================================================

mod rejected {
    use super::*;

    #[tokio::test]
    async fn test_unknown_field_has_no_data() {
        let harness = populated(1).await;

        let response = harness.run("{ accounts { id email } }").await;

        assert!(response.data.is_none());
        assert_eq!(response.errors[0].message, "Cannot query field \"email\" on type \"Account\"");
        assert_eq!(harness.accounts.log.total(), 0);
    }

    #[tokio::test]
    async fn test_object_field_requires_selection() {
        let harness = populated(1).await;
        assert!(harness.run("{ accounts { orders } }").await.data.is_none());
        assert!(harness.run("{ accounts { name { id } } }").await.data.is_none());
    }

    #[tokio::test]
    async fn test_undefined_variable() {
        let harness = populated(1).await;

        let response = harness.run("query { accounts(id: $id) { id } }").await;

        assert!(response.data.is_none());
        assert!(response.errors[0].message.contains("$id"));
    }

    #[tokio::test]
    async fn test_syntax_error() {
        let harness = populated(1).await;

        let response = harness.run("{ accounts { id }").await;

        assert!(response.data.is_none());
        assert!(response.errors[0].message.starts_with("Syntax error"));
    }

    #[tokio::test]
    async fn test_unknown_argument() {
        let harness = populated(1).await;
        assert!(harness.run(r#"{ accounts(name: "Ada") { id } }"#).await.data.is_none());
    }
}

// ============================================================================
// HTTP surface
// ============================================================================

mod http {
    use super::*;

    async fn post(harness: Harness, body: Value) -> (StatusCode, Value) {
        let app = create_router(Arc::new(harness.gateway), Duration::from_secs(5));
        let request = Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_query_endpoint() {
        let (status, body) = post(
            populated(1).await,
            json!({"query": "query One($id: String) { accounts(id: $id) { name } }", "variables": {"id": "a1"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": {"accounts": [{"name": "Account 1"}]}}));
    }

    #[tokio::test]
    async fn test_malformed_body_reported_as_error() {
        let (status, body) = post(populated(1).await, json!({"variables": {}})).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.get("data").is_none());
        assert!(body["errors"][0]["message"].is_string());
    }

    /// Account contract that never answers within a test's patience
    struct StalledAccounts;

    #[async_trait]
    impl AccountApi for StalledAccounts {
        async fn post_account(&self, _account: NewAccount) -> ServiceResult<Account> {
            stall().await
        }

        async fn get_account(&self, _id: &str) -> ServiceResult<Account> {
            stall().await
        }

        async fn list_accounts(&self, _page: Page) -> ServiceResult<Vec<Account>> {
            stall().await
        }
    }

    async fn stall<T>() -> ServiceResult<T> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Err(ServiceError::unavailable("account", "stalled"))
    }

    #[tokio::test]
    async fn test_slow_request_times_out_with_408() {
        let services = InMemoryServices::empty().await;
        let gateway = Gateway::new(Services {
            account: Arc::new(StalledAccounts),
            catalog: services.catalog.clone(),
            order: services.order.clone(),
        })
        .unwrap();
        let app = create_router(Arc::new(gateway), Duration::from_millis(50));
        let request = Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(json!({"query": "{ accounts { id } }"}).to_string()))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_health() {
        let harness = populated(1).await;
        let app = create_router(Arc::new(harness.gateway), Duration::from_secs(5));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
