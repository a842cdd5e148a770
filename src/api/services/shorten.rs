//! Shorten endpoint
//!
//! POST /api/shorten accepts `{"url": "..."}` and returns the externally
//! visible short URL, built from the request's detected scheme and host.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::errors::ClickLensError;
use crate::services::LinkService;
use crate::storage::SeaOrmStorage;

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortUrl")]
    pub short_url: String,
}

pub struct ShortenService {}

impl ShortenService {
    pub async fn handle_shorten(
        req: HttpRequest,
        payload: Option<web::Json<ShortenRequest>>,
        storage: web::Data<Arc<SeaOrmStorage>>,
    ) -> HttpResponse {
        // 缺失请求体、非 JSON、缺失字段统一按缺失 URL 处理
        let url = payload.and_then(|p| p.into_inner().url);
        let Some(url) = url.filter(|u| !u.trim().is_empty()) else {
            return HttpResponse::BadRequest().json(json!({ "error": "URL is required" }));
        };

        let service = LinkService::new(storage.get_ref().clone());
        match service.create_link(&url).await {
            Ok(link) => {
                let conn = req.connection_info();
                let short_url = format!("{}://{}/{}", conn.scheme(), conn.host(), link.code);
                HttpResponse::Ok().json(ShortenResponse { short_url })
            }
            Err(ClickLensError::Validation(msg)) => {
                HttpResponse::BadRequest().json(json!({ "error": msg }))
            }
            Err(e) => {
                error!("Failed to create short link: {}", e);
                HttpResponse::InternalServerError().json(json!({ "error": "Server Error" }))
            }
        }
    }
}

/// API 路由配置
pub fn api_routes() -> actix_web::Scope {
    web::scope("/api")
        .route("/shorten", web::post().to(ShortenService::handle_shorten))
        .service(super::analytics::analytics_routes())
}
