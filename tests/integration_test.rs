use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cart_store::config::CartConfig;
use cart_store::lifecycle::CartSystem;
use cart_store::model::{Cart, ProductId, UpdateProductAmount};
use cart_store::notify::{ChannelNotifier, Notification};
use cart_store::storage::{CartStorage, FileStorage};
use serde_json::json;
use url::Url;

const STOCK: u32 = 3;

async fn spawn_catalog() -> SocketAddr {
    let app = Router::new()
        .route(
            "/stock/:id",
            get(|Path(id): Path<u32>| async move { Json(json!({ "id": id, "amount": STOCK })) }),
        )
        .route(
            "/products/:id",
            get(|Path(id): Path<u32>| async move {
                if id > 10 {
                    return StatusCode::NOT_FOUND.into_response();
                }
                Json(json!({
                    "id": id,
                    "title": format!("Tênis {id}"),
                    "price": 100.0 + f64::from(id),
                    "image": format!("https://cdn.test/tenis{id}.jpg"),
                }))
                .into_response()
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn config(addr: SocketAddr, dir: &std::path::Path) -> CartConfig {
    CartConfig {
        api_url: Url::parse(&format!("http://{addr}")).unwrap(),
        storage_dir: dir.to_path_buf(),
        ..CartConfig::default()
    }
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let addr = spawn_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(addr, dir.path());

    // First session
    let (notifier, mut notifications) = ChannelNotifier::new();
    let system = CartSystem::from_config(&config, Arc::new(notifier)).unwrap();
    let client = system.cart_client.clone();

    client.add_product(ProductId(2)).await.unwrap();
    client.add_product(ProductId(1)).await.unwrap();
    client.add_product(ProductId(2)).await.unwrap();
    client
        .update_product_amount(UpdateProductAmount {
            product_id: ProductId(1),
            amount: 3,
        })
        .await
        .unwrap();
    let before = client.cart().await.unwrap();
    drop(client);
    system.shutdown().await.unwrap();

    assert!(notifications.try_recv().is_err());
    assert_eq!(before.len(), 2);
    assert_eq!(before.items()[0].id, ProductId(2));
    assert_eq!(before.items()[0].amount, 2);
    assert_eq!(before.items()[1].amount, 3);
    assert_eq!(before.item_count(), 5);

    // The slot holds the snapshot under the configured key
    let storage = FileStorage::new(dir.path());
    let snapshot = storage.load(&config.storage_key).await.unwrap().unwrap();
    assert_eq!(Cart::from_snapshot(&snapshot).unwrap(), before);

    // Fresh session reproduces the same cart
    let (notifier, _notifications) = ChannelNotifier::new();
    let system = CartSystem::from_config(&config, Arc::new(notifier)).unwrap();
    let after = system.cart_client.cart().await.unwrap();
    assert_eq!(after, before);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_http_failures_reach_notifier() {
    let addr = spawn_catalog().await;
    let dir = tempfile::tempdir().unwrap();
    let config = config(addr, dir.path());

    let (notifier, mut notifications) = ChannelNotifier::new();
    let system = CartSystem::from_config(&config, Arc::new(notifier)).unwrap();
    let client = system.cart_client.clone();

    // Product endpoint 404s for ids above 10
    client.add_product(ProductId(11)).await.unwrap();
    assert_eq!(notifications.recv().await, Some(Notification::AddProductFailed));

    for _ in 0..=STOCK {
        client.add_product(ProductId(5)).await.unwrap();
    }
    assert_eq!(notifications.recv().await, Some(Notification::OutOfStock));

    let cart = client.cart().await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.get(ProductId(5)).unwrap().amount, STOCK);
    assert_eq!(cart.total(), 105.0 * f64::from(STOCK));

    drop(client);
    system.shutdown().await.unwrap();
}
