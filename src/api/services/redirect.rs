//! Redirect engine with click capture
//!
//! The hot path of the service: short code → 302 to the stored URL.
//! Client metadata is classified and buffered through the `ClickManager`
//! before the redirect is issued; the response never waits on the
//! click-event database write.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, error, trace};

use crate::analytics::{ClickEvent, ClickManager};
use crate::storage::SeaOrmStorage;
use crate::utils::ip::extract_client_ip;
use crate::utils::is_valid_short_code;
use crate::utils::user_agent::ClientInfo;

pub struct RedirectService {}

impl RedirectService {
    pub async fn handle_redirect(
        req: HttpRequest,
        path: web::Path<String>,
        storage: web::Data<Arc<SeaOrmStorage>>,
        clicks: web::Data<ClickManager>,
    ) -> HttpResponse {
        let captured_path = path.into_inner();

        if captured_path.is_empty() || !is_valid_short_code(&captured_path) {
            // 非法短码，直接 404，不进数据库
            trace!("Invalid short code rejected: {}", &captured_path);
            return Self::not_found_response();
        }

        match storage.get(&captured_path).await {
            Ok(Some(link)) => {
                Self::capture_click(&captured_path, &req, &clicks);
                HttpResponse::build(StatusCode::FOUND)
                    .insert_header((header::LOCATION, link.target))
                    .finish()
            }
            Ok(None) => {
                debug!("Redirect link not found: {}", &captured_path);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Database error during redirect lookup: {}", e);
                Self::error_response()
            }
        }
    }

    /// 分类客户端并把事件写入缓冲区（不等待落库）
    fn capture_click(code: &str, req: &HttpRequest, clicks: &ClickManager) {
        let user_agent = req
            .headers()
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok());
        let client = ClientInfo::from_user_agent(user_agent);

        clicks.record(ClickEvent {
            code: code.to_string(),
            timestamp: Utc::now(),
            ip_address: extract_client_ip(req),
            browser: client.browser,
            os: client.os,
            device: client.device,
        });
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("Link not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header((header::CONTENT_TYPE, "text/plain; charset=utf-8"))
            .body("Server Error")
    }
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{code}", web::get().to(RedirectService::handle_redirect))
        .route("/{code}", web::head().to(RedirectService::handle_redirect))
}
