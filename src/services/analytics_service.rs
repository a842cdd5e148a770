//! Analytics service layer
//!
//! Aggregates click events for a single short code: total count plus a
//! per-browser breakdown. Unknown codes are not an error — they simply
//! have zero events.

use std::sync::Arc;

use tracing::error;

use crate::errors::{ClickLensError, Result};
use crate::storage::SeaOrmStorage;

/// 单个浏览器的点击计数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserCount {
    pub browser: String,
    pub count: u64,
}

/// 单链接统计摘要
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub total_clicks: u64,
    /// 分组顺序由底层存储决定，不保证排序
    pub browser_breakdown: Vec<BrowserCount>,
}

pub struct AnalyticsService {
    storage: Arc<SeaOrmStorage>,
}

impl AnalyticsService {
    /// 创建 AnalyticsService 实例
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    /// Summarize all click events recorded for a short code.
    ///
    /// Does not validate that the code resolves to a stored link; a code
    /// with no events yields zero totals and an empty breakdown.
    pub async fn summarize(&self, code: &str) -> Result<LinkSummary> {
        let total_clicks = self.storage.count_link_clicks(code).await.map_err(|e| {
            error!("Failed to count clicks for {}: {}", code, e);
            ClickLensError::database_operation(e.to_string())
        })?;

        let rows = self.storage.get_browser_breakdown(code).await.map_err(|e| {
            error!("Failed to aggregate browsers for {}: {}", code, e);
            ClickLensError::database_operation(e.to_string())
        })?;

        let browser_breakdown = rows
            .into_iter()
            .map(|row| BrowserCount {
                browser: row.browser,
                count: row.count.max(0) as u64,
            })
            .collect();

        Ok(LinkSummary {
            total_clicks,
            browser_breakdown,
        })
    }
}
