use std::path::Path;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::util::ServiceExt;

use shop_voice_relay::{AppState, Catalog, RelayConfig, SessionBroker, create_router};

fn app_with_catalog(path: &Path) -> axum::Router {
    let config = RelayConfig {
        catalog_path: path.to_path_buf(),
        ..RelayConfig::default()
    };
    let state = AppState::from_parts(config, SessionBroker::unconfigured(), Catalog::new(path));
    create_router(state)
}

fn write_catalog(dir: &TempDir, products: &Value) -> std::path::PathBuf {
    let path = dir.path().join("products.json");
    std::fs::write(&path, serde_json::to_vec(products).unwrap()).unwrap();
    path
}

fn sample_catalog() -> Value {
    json!([
        { "id": 1, "title": "Canvas Sneaker", "brand": "Acme", "category": "Shoes", "color": "Red", "price": 45, "rating": 4.2 },
        { "id": 2, "title": "Court Classic", "brand": "Acme", "category": "shoes", "color": "dark red", "price": 50, "rating": 4.6 },
        { "id": 3, "title": "Trail Runner", "brand": "Peak", "category": "shoes", "color": "red", "price": 50.01, "rating": 4.8 },
        { "id": 4, "title": "Oxford", "brand": "Bell", "category": "shoes", "color": "brown", "price": 30, "rating": 4.1 },
        { "id": 5, "title": "Snow Boot", "brand": "Peak", "category": "snowshoes", "color": "red", "price": 20, "rating": 3.9 },
        { "id": 6, "title": "Linen Shirt", "brand": "Bell", "category": "shirts", "color": "Light Blue", "price": 25, "rating": 4.0 }
    ])
}

async fn post_filter(app: axum::Router, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/filter")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn ids(body: &Value) -> Vec<u64> {
    body["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn filter_by_category_color_and_price() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog());

    let (status, body) = post_filter(
        app_with_catalog(&path),
        &json!({ "category": "shoes", "color": "red", "max_price": 50 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2]);
    assert_eq!(body["summary"], "2 red shoes found under $50");
}

#[tokio::test]
async fn results_pass_through_extra_fields() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog());

    let (_, body) = post_filter(app_with_catalog(&path), &json!({ "category": "SHIRTS" })).await;

    assert_eq!(body["results"][0], sample_catalog()[5]);
    assert_eq!(body["summary"], "1 shirts found");
}

#[tokio::test]
async fn explicit_null_fields_are_returned_as_stored() {
    let dir = TempDir::new().unwrap();
    let catalog = json!([{ "id": 9, "category": "hats", "color": null, "price": null }]);
    let path = write_catalog(&dir, &catalog);

    let (_, body) = post_filter(app_with_catalog(&path), &json!({ "category": "hats" })).await;

    assert_eq!(body["results"][0], catalog[0]);
    assert_eq!(body["summary"], "1 hats found");
}

#[tokio::test]
async fn partial_category_never_matches() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog());

    let (_, body) = post_filter(app_with_catalog(&path), &json!({ "category": "shoe" })).await;

    assert!(body["results"].as_array().unwrap().is_empty());
    assert_eq!(body["summary"], "0 shoe found");
}

#[tokio::test]
async fn twenty_matches_are_truncated_to_twelve() {
    let dir = TempDir::new().unwrap();
    let products: Vec<Value> = (0..20)
        .map(|i| json!({ "id": i, "category": "hats", "color": "green", "price": 10 }))
        .collect();
    let path = write_catalog(&dir, &Value::Array(products));

    let (_, body) = post_filter(app_with_catalog(&path), &json!({ "category": "hats" })).await;

    assert_eq!(body["results"].as_array().unwrap().len(), 12);
    assert_eq!(body["summary"], "12 hats found");
    assert_eq!(ids(&body), (0..12).collect::<Vec<u64>>());
}

#[tokio::test]
async fn string_max_price_filters_nothing_but_is_named_in_summary() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog());

    let (status, body) = post_filter(
        app_with_catalog(&path),
        &json!({ "category": "shoes", "max_price": "50" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&body), vec![1, 2, 3, 4]);
    assert_eq!(body["summary"], "4 shoes found under $50");
}

#[tokio::test]
async fn missing_catalog_is_a_soft_failure() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");

    let (status, body) = post_filter(app_with_catalog(&path), &json!({ "category": "shoes" })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "error": "products.json not found on server" }));
    assert!(body.get("results").is_none());
}

#[tokio::test]
async fn malformed_catalog_is_a_server_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, b"[{ broken").unwrap();

    let (status, body) = post_filter(app_with_catalog(&path), &json!({ "category": "shoes" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("JSON"));
}

#[tokio::test]
async fn catalog_is_reread_on_every_call() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &json!([]));
    let app = app_with_catalog(&path);

    let (_, before) = post_filter(app.clone(), &json!({ "category": "hats" })).await;
    write_catalog(&dir, &json!([{ "category": "hats", "price": 1 }]));
    let (_, after) = post_filter(app, &json!({ "category": "hats" })).await;

    assert_eq!(before["summary"], "0 hats found");
    assert_eq!(after["summary"], "1 hats found");
}

#[tokio::test]
async fn products_endpoint_serves_whole_catalog() {
    let dir = TempDir::new().unwrap();
    let path = write_catalog(&dir, &sample_catalog());

    let request = Request::builder()
        .uri("/products.json")
        .body(Body::empty())
        .unwrap();
    let response = app_with_catalog(&path).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, sample_catalog());
}

#[tokio::test]
async fn health_check_reports_ok() {
    let dir = TempDir::new().unwrap();
    let app = app_with_catalog(&dir.path().join("products.json"));

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "OK");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_by_default() {
    let dir = TempDir::new().unwrap();
    let app = app_with_catalog(&dir.path().join("products.json"));

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/filter")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
