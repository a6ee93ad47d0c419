use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use cart_store::catalog::{Catalog, CatalogError, HttpCatalog};
use cart_store::model::{ProductId, Stock};
use serde_json::json;
use url::Url;

async fn stock(Path(id): Path<u32>) -> impl IntoResponse {
    match id {
        1 => (StatusCode::OK, Json(json!({ "id": 1, "amount": 5 }))).into_response(),
        2 => (StatusCode::OK, Json(json!({ "id": 2, "amount": 0 }))).into_response(),
        13 => (StatusCode::OK, Json(json!({ "id": 13 }))).into_response(),
        14 => (StatusCode::OK, Json(json!({ "id": 14, "amount": -1 }))).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn product(Path(id): Path<u32>) -> impl IntoResponse {
    match id {
        1 => Json(json!({
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://rocketseat-cdn.s3-sa-east-1.amazonaws.com/modulo-redux/tenis1.jpg",
            "description": "ignored"
        }))
        .into_response(),
        13 => (StatusCode::OK, "not json").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn spawn_server(prefix: &str) -> SocketAddr {
    let routes = Router::new()
        .route("/stock/:id", get(stock))
        .route("/products/:id", get(product));
    let app = if prefix.is_empty() {
        routes
    } else {
        Router::new().nest(prefix, routes)
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn catalog() -> HttpCatalog {
    let addr = spawn_server("").await;
    HttpCatalog::new(Url::parse(&format!("http://{addr}")).unwrap()).unwrap()
}

#[tokio::test]
async fn test_stock_reads_amount() {
    let catalog = catalog().await;

    let stock = catalog.stock(ProductId(1)).await.unwrap();
    assert_eq!(stock, Stock { id: ProductId(1), amount: 5 });

    let empty = catalog.stock(ProductId(2)).await.unwrap();
    assert_eq!(empty.amount, 0);
}

#[tokio::test]
async fn test_product_ignores_extra_fields() {
    let catalog = catalog().await;

    let product = catalog.product(ProductId(1)).await.unwrap();
    assert_eq!(product.id, ProductId(1));
    assert_eq!(product.title, "Tênis de Caminhada Leve Confortável");
    assert_eq!(product.price, 179.9);
    assert!(product.image.ends_with("tenis1.jpg"));
}

#[tokio::test]
async fn test_missing_resources_are_api_errors() {
    let catalog = catalog().await;

    match catalog.stock(ProductId(99)).await {
        Err(CatalogError::Api { status, url }) => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/stock/99"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(matches!(
        catalog.product(ProductId(99)).await,
        Err(CatalogError::Api { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_malformed_bodies_are_parse_errors() {
    let catalog = catalog().await;

    // Missing amount
    assert!(matches!(
        catalog.stock(ProductId(13)).await,
        Err(CatalogError::Parse(_))
    ));
    // Negative amount
    assert!(matches!(
        catalog.stock(ProductId(14)).await,
        Err(CatalogError::Parse(_))
    ));
    assert!(matches!(
        catalog.product(ProductId(13)).await,
        Err(CatalogError::Parse(_))
    ));
}

#[tokio::test]
async fn test_base_url_path_prefix() {
    let addr = spawn_server("/api").await;
    let catalog = HttpCatalog::new(Url::parse(&format!("http://{addr}/api")).unwrap()).unwrap();

    assert_eq!(catalog.stock(ProductId(1)).await.unwrap().amount, 5);
}

#[tokio::test]
async fn test_unreachable_server_is_http_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let catalog = HttpCatalog::new(Url::parse(&format!("http://{addr}")).unwrap()).unwrap();
    assert!(matches!(
        catalog.stock(ProductId(1)).await,
        Err(CatalogError::Http(_))
    ));
}
