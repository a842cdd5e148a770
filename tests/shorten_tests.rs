//! Shorten endpoint tests
//!
//! POST /api/shorten: happy path, validation failures, and the shape of
//! the returned short URL.

use std::sync::{Arc, Once};

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use tempfile::TempDir;

use clicklens::api::services::api_routes;
use clicklens::config::init_config;
use clicklens::storage::SeaOrmStorage;

static INIT: Once = Once::new();

fn init_static_config() {
    INIT.call_once(|| {
        init_config();
    });
}

async fn create_temp_storage() -> (Arc<SeaOrmStorage>, TempDir) {
    init_static_config();
    let td = TempDir::new().unwrap();
    let p = td.path().join("shorten_test.db");
    let u = format!("sqlite://{}?mode=rwc", p.display());
    let s = SeaOrmStorage::new(&u).await.unwrap();
    (Arc::new(s), td)
}

#[tokio::test]
async fn test_shorten_returns_short_url() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .service(api_routes()),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "url": "https://example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let short_url = body["shortUrl"].as_str().unwrap();

    // scheme://host/code, 短码可以直接在存储中解析
    let code = short_url.rsplit('/').next().unwrap();
    assert!(!code.is_empty());
    let stored = storage.get(code).await.unwrap().unwrap();
    assert_eq!(stored.target, "https://example.com");
}

#[tokio::test]
async fn test_shorten_uses_request_host() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .service(api_routes()),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header(("Host", "short.example.org"))
        .set_json(serde_json::json!({ "url": "https://example.com/page" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let short_url = body["shortUrl"].as_str().unwrap();
    assert!(
        short_url.starts_with("http://short.example.org/"),
        "unexpected short url: {}",
        short_url
    );
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .service(api_routes()),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_shorten_empty_body() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .service(api_routes()),
    )
    .await;

    let req = TestRequest::post().uri("/api/shorten").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "URL is required");
}

#[tokio::test]
async fn test_shorten_empty_url_rejected() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .service(api_routes()),
    )
    .await;

    for url in ["", "   "] {
        let req = TestRequest::post()
            .uri("/api/shorten")
            .set_json(serde_json::json!({ "url": url }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_same_destination_gets_distinct_codes() {
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage))
            .service(api_routes()),
    )
    .await;

    let mut codes = Vec::new();
    for _ in 0..2 {
        let req = TestRequest::post()
            .uri("/api/shorten")
            .set_json(serde_json::json!({ "url": "https://example.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        codes.push(
            body["shortUrl"]
                .as_str()
                .unwrap()
                .rsplit('/')
                .next()
                .unwrap()
                .to_string(),
        );
    }

    assert_ne!(codes[0], codes[1]);
}

#[tokio::test]
async fn test_shorten_accepts_any_nonempty_string() {
    // 目标 URL 不做格式校验，原样存储
    let (storage, _td) = create_temp_storage().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(storage.clone()))
            .service(api_routes()),
    )
    .await;

    let req = TestRequest::post()
        .uri("/api/shorten")
        .set_json(serde_json::json!({ "url": "not a url at all" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let code = body["shortUrl"]
        .as_str()
        .unwrap()
        .rsplit('/')
        .next()
        .unwrap();
    let stored = storage.get(code).await.unwrap().unwrap();
    assert_eq!(stored.target, "not a url at all");
}
