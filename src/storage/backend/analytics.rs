//! Analytics 相关的数据库查询
//!
//! 提供点击事件的统计查询方法，供 AnalyticsService 调用。

use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter, QuerySelect,
};

use migration::entities::click_event;

/// 浏览器分组查询结果行
#[derive(Debug, FromQueryResult)]
pub struct BrowserRow {
    pub browser: String,
    pub count: i64,
}

impl super::SeaOrmStorage {
    /// 统计指定链接的点击总数
    pub async fn count_link_clicks(&self, code: &str) -> anyhow::Result<u64> {
        click_event::Entity::find()
            .filter(click_event::Column::ShortCode.eq(code))
            .count(&self.db)
            .await
            .map_err(Into::into)
    }

    /// 按浏览器分组统计指定链接的点击数
    ///
    /// 分组顺序由数据库决定，不保证排序。
    pub async fn get_browser_breakdown(&self, code: &str) -> anyhow::Result<Vec<BrowserRow>> {
        click_event::Entity::find()
            .select_only()
            .column(click_event::Column::Browser)
            .column_as(click_event::Column::Id.count(), "count")
            .filter(click_event::Column::ShortCode.eq(code))
            .group_by(click_event::Column::Browser)
            .into_model::<BrowserRow>()
            .all(&self.db)
            .await
            .map_err(Into::into)
    }
}
