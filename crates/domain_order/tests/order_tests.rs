//! Tests for order placement and lookup

use std::sync::Arc;

use core_kernel::ServiceError;
use domain_catalog::{CatalogService, InMemoryProductRepository, Product};
use domain_order::{
    CatalogPricing, InMemoryOrderRepository, NewOrder, OrderApi, OrderRepository, OrderService,
    OrderedProduct,
};

async fn service() -> (Arc<InMemoryOrderRepository>, OrderService) {
    let products = InMemoryProductRepository::with_products(vec![
        Product::new("p1", "Widget", "desc", 2.5),
        Product::new("p2", "Gadget", "desc", 10.0),
    ])
    .await;
    let catalog = Arc::new(CatalogService::new(Arc::new(products)));
    let repository = Arc::new(InMemoryOrderRepository::new());
    let service = OrderService::new(repository.clone(), Arc::new(CatalogPricing::new(catalog)));
    (repository, service)
}

#[tokio::test]
async fn test_post_order_computes_total() {
    let (repository, service) = service().await;

    let order = service
        .post_order(NewOrder::new(
            "a1",
            vec![OrderedProduct::new("p1", 4), OrderedProduct::new("p2", 1)],
        ))
        .await
        .unwrap();

    assert_eq!(order.total_price, 20.0);
    assert_eq!(order.account_id, "a1");
    assert_eq!(repository.get_orders_for_account("a1").await.unwrap(), vec![order]);
}

#[tokio::test]
async fn test_post_order_rejects_unknown_product() {
    let (repository, service) = service().await;

    let err = service
        .post_order(NewOrder::new("a1", vec![OrderedProduct::new("p9", 1)]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
    assert!(repository.get_orders_for_account("a1").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_post_order_rejects_empty_order() {
    let (_, service) = service().await;

    let err = service
        .post_order(NewOrder::new("a1", vec![OrderedProduct::new("p1", 0)]))
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::Validation { .. }));
}

#[tokio::test]
async fn test_orders_for_many_accounts_in_one_call() {
    let (_, service) = service().await;
    for account in ["a1", "a2", "a1", "a3"] {
        service
            .post_order(NewOrder::new(account, vec![OrderedProduct::new("p1", 1)]))
            .await
            .unwrap();
    }

    let orders = service
        .get_orders_for_accounts(&["a1".to_string(), "a3".to_string(), "a9".to_string()])
        .await
        .unwrap();

    assert_eq!(orders.len(), 3);
    assert!(orders.iter().all(|o| o.account_id == "a1" || o.account_id == "a3"));
}

#[tokio::test]
async fn test_account_without_orders_is_empty() {
    let (_, service) = service().await;

    assert!(service.get_orders_for_account("nobody").await.unwrap().is_empty());
    assert!(service.get_orders_for_accounts(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_get_order_by_id() {
    let (_, service) = service().await;
    let placed = service
        .post_order(NewOrder::new("a1", vec![OrderedProduct::new("p2", 2)]))
        .await
        .unwrap();

    let found = service.get_order(&placed.id).await.unwrap();

    assert_eq!(found, placed);
    assert_eq!(found.products, vec![OrderedProduct::new("p2", 2)]);
}

#[tokio::test]
async fn test_get_missing_order_is_not_found() {
    let (_, service) = service().await;

    let err = service.get_order("o-missing").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err,
        ServiceError::NotFound {
            entity: "Order".into(),
            id: "o-missing".into()
        }
    );
}
