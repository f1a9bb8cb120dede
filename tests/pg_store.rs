//! Runs against a real PostgreSQL database when `TEST_DATABASE_URL` is set
//! and is skipped otherwise. The `items` table is truncated first.

use item_store::db::{ItemStore, PgItemStore, PoolSettings, StoreError};
use item_store::models::ItemCreate;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashSet;

fn new_item(name: &str, description: Option<&str>, price: f64) -> ItemCreate {
    ItemCreate {
        name: name.to_string(),
        description: description.map(str::to_string),
        price,
        tax: 1.5,
    }
}

#[tokio::test]
async fn postgres_store_round_trip() {
    let Ok(url) = std::env::var("TEST_DATABASE_URL") else {
        eprintln!("TEST_DATABASE_URL not set, skipping");
        return;
    };

    let store = PgItemStore::connect(&url, &PoolSettings::default())
        .await
        .unwrap();
    store.ensure_schema().await.unwrap();
    // Running twice must be harmless
    store.ensure_schema().await.unwrap();

    let pool = PgPoolOptions::new().max_connections(1).connect(&url).await.unwrap();
    sqlx::query("TRUNCATE items RESTART IDENTITY")
        .execute(&pool)
        .await
        .unwrap();

    assert!(store.list_all().await.unwrap().is_empty());
    assert_eq!(store.sum_prices().await.unwrap(), 0.0);

    let foo = store.create(new_item("Foo", None, 50.2)).await.unwrap();
    let bar = store
        .create(new_item("Bar", Some("The bartenders"), 62.0))
        .await
        .unwrap();

    assert_ne!(foo.id, bar.id);
    assert_eq!(foo.name, "Foo");
    assert_eq!(foo.description, None);
    assert_eq!(bar.description.as_deref(), Some("The bartenders"));

    assert_eq!(store.get_by_id(bar.id).await.unwrap(), bar);
    assert!(matches!(
        store.get_by_id(bar.id + 1000).await,
        Err(StoreError::NotFound(_))
    ));

    let listed = store.list_all().await.unwrap();
    assert_eq!(listed, vec![foo.clone(), bar.clone()]);
    let ids: HashSet<i64> = listed.iter().map(|item| item.id).collect();
    assert_eq!(ids.len(), 2);

    let total = store.sum_prices().await.unwrap();
    assert!((total - 112.2).abs() < 1e-9);

    store.close().await;
    pool.close().await;
}
