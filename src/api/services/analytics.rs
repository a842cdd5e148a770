//! Analytics API 端点
//!
//! 单链接统计：点击总数 + 浏览器分布。任何调用方都可以查询任意
//! 短码；没有事件的短码返回零值而不是错误。

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use tracing::error;

use crate::services::AnalyticsService;
use crate::storage::SeaOrmStorage;

/// 浏览器分组行
///
/// `_id` 字段名是对外契约的一部分，保持原样。
#[derive(Debug, Clone, Serialize)]
pub struct BrowserBreakdownRow {
    #[serde(rename = "_id")]
    pub id: String,
    pub count: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    #[serde(rename = "totalClicks")]
    pub total_clicks: u64,
    #[serde(rename = "browserBreakdown")]
    pub browser_breakdown: Vec<BrowserBreakdownRow>,
}

async fn get_link_summary(
    path: web::Path<String>,
    storage: web::Data<Arc<SeaOrmStorage>>,
) -> HttpResponse {
    let code = path.into_inner();

    let service = AnalyticsService::new(storage.get_ref().clone());
    match service.summarize(&code).await {
        Ok(summary) => {
            let browser_breakdown = summary
                .browser_breakdown
                .into_iter()
                .map(|row| BrowserBreakdownRow {
                    id: row.browser,
                    count: row.count,
                })
                .collect();

            HttpResponse::Ok().json(SummaryResponse {
                total_clicks: summary.total_clicks,
                browser_breakdown,
            })
        }
        Err(e) => {
            error!("Failed to summarize clicks for {}: {}", code, e);
            HttpResponse::InternalServerError().json(json!({ "error": "Analytics Error" }))
        }
    }
}

/// Analytics 路由配置
pub fn analytics_routes() -> actix_web::Scope {
    web::scope("/analytics").route("/{code}", web::get().to(get_link_summary))
}
