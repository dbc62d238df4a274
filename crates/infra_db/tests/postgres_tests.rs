//! Adapter tests against a real PostgreSQL server
//!
//! Each test starts its own container. Run them with
//! `cargo test -p infra_db -- --ignored` on a machine with Docker.

use chrono::{DateTime, Duration, TimeZone, Utc};

use core_kernel::{Page, ServiceError};
use domain_account::{Account, AccountRepository};
use domain_order::{Order, OrderRepository, OrderedProduct};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresAccountAdapter, PostgresOrderAdapter};
use test_utils::TestDatabase;

async fn migrated() -> TestDatabase {
    let database = TestDatabase::start().await.expect("postgres container starts");
    run_migrations(database.pool()).await.expect("migrations apply");
    database
}

fn at(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap() + Duration::minutes(minute)
}

fn order(id: &str, account_id: &str, minute: i64, lines: &[(&str, u32)]) -> Order {
    Order {
        id: id.to_string(),
        created_at: at(minute),
        account_id: account_id.to_string(),
        total_price: lines.iter().map(|(_, quantity)| f64::from(*quantity) * 2.5).sum(),
        products: lines
            .iter()
            .map(|(product_id, quantity)| OrderedProduct::new(*product_id, *quantity))
            .collect(),
    }
}

mod orders {
    use super::*;

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_batch_read_spans_several_accounts() {
        let database = migrated().await;
        let repository = PostgresOrderAdapter::new(database.pool().clone());
        let first = order("o1", "a1", 0, &[("p1", 1), ("p2", 3)]);
        let second = order("o2", "a2", 1, &[("p3", 2)]);
        let third = order("o3", "a1", 2, &[("p2", 1)]);
        let elsewhere = order("o4", "a3", 3, &[("p1", 4)]);
        for order in [&first, &second, &third, &elsewhere] {
            repository.put_order(order).await.unwrap();
        }

        let orders = repository
            .get_orders_for_accounts(&["a1".to_string(), "a2".to_string(), "a9".to_string()])
            .await
            .unwrap();

        assert_eq!(orders, vec![first, second, third]);
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_account_without_orders_reads_empty() {
        let database = migrated().await;
        let repository = PostgresOrderAdapter::new(database.pool().clone());
        repository.put_order(&order("o1", "a1", 0, &[("p1", 1)])).await.unwrap();

        assert!(repository.get_orders_for_account("a2").await.unwrap().is_empty());
        assert!(repository
            .get_orders_for_accounts(&["a2".to_string(), "a3".to_string()])
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_upsert_replaces_lines() {
        let database = migrated().await;
        let repository = PostgresOrderAdapter::new(database.pool().clone());
        repository
            .put_order(&order("o1", "a1", 0, &[("p1", 1), ("p2", 3)]))
            .await
            .unwrap();

        let replacement = order("o1", "a1", 5, &[("p4", 5)]);
        repository.put_order(&replacement).await.unwrap();

        assert_eq!(repository.get_order_by_id("o1").await.unwrap(), replacement);
        assert_eq!(repository.get_orders_for_account("a1").await.unwrap(), vec![replacement]);
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_order_without_lines_survives_the_join() {
        let database = migrated().await;
        let repository = PostgresOrderAdapter::new(database.pool().clone());
        let empty = order("o1", "a1", 0, &[]);
        repository.put_order(&empty).await.unwrap();

        assert_eq!(repository.get_order_by_id("o1").await.unwrap(), empty);
        assert_eq!(repository.get_orders_for_account("a1").await.unwrap(), vec![empty]);
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_missing_order_is_not_found() {
        let database = migrated().await;
        let repository = PostgresOrderAdapter::new(database.pool().clone());

        assert_eq!(
            repository.get_order_by_id("o9").await.unwrap_err(),
            ServiceError::not_found("Order", "o9")
        );
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_closed_pool_fails_cleanly() {
        let database = migrated().await;
        let pool = create_pool(DatabaseConfig::new(database.url())).await.unwrap();
        let repository = PostgresOrderAdapter::new(pool);

        repository.close().await.unwrap();

        assert_eq!(
            repository.get_orders_for_account("a1").await.unwrap_err(),
            ServiceError::Closed
        );
    }
}

mod accounts {
    use super::*;

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_put_get_and_rename() {
        let database = migrated().await;
        let repository = PostgresAccountAdapter::new(database.pool().clone());

        repository.put_account(&Account::new("a1", "Ada")).await.unwrap();
        repository.put_account(&Account::new("a1", "Ada L.")).await.unwrap();

        assert_eq!(repository.get_account_by_id("a1").await.unwrap(), Account::new("a1", "Ada L."));
        assert!(repository.get_account_by_id("a2").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    #[ignore = "starts a PostgreSQL container"]
    async fn test_list_is_ordered_and_windowed() {
        let database = migrated().await;
        let repository = PostgresAccountAdapter::new(database.pool().clone());
        for (id, name) in [("a3", "Cy"), ("a1", "Ada"), ("a2", "Bo")] {
            repository.put_account(&Account::new(id, name)).await.unwrap();
        }

        let window = repository.list_accounts(Page::new(1, 5)).await.unwrap();

        assert_eq!(window, vec![Account::new("a2", "Bo"), Account::new("a3", "Cy")]);
        assert!(repository.list_accounts(Page::new(0, 0)).await.unwrap().is_empty());
    }
}
