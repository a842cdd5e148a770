//! Link read/write operations

use sea_orm::ActiveValue::Set;
use sea_orm::{EntityTrait, SqlErr};
use tracing::debug;

use super::SeaOrmStorage;
use crate::errors::{Result, ClickLensError};
use crate::storage::models::ShortLink;

use migration::entities::link;

fn model_to_shortlink(model: link::Model) -> ShortLink {
    ShortLink {
        code: model.short_code,
        target: model.redirect_url,
        created_at: model.created_at,
    }
}

fn shortlink_to_active_model(link: &ShortLink) -> link::ActiveModel {
    link::ActiveModel {
        short_code: Set(link.code.clone()),
        redirect_url: Set(link.target.clone()),
        created_at: Set(link.created_at),
    }
}

impl SeaOrmStorage {
    /// 按短码精确查询
    pub async fn get(&self, code: &str) -> Result<Option<ShortLink>> {
        let model = link::Entity::find_by_id(code).one(&self.db).await?;
        Ok(model.map(model_to_shortlink))
    }

    /// 插入新链接
    ///
    /// 唯一约束冲突（生成器撞码）映射为 `Conflict`，调用方据此重新
    /// 生成短码。
    pub async fn insert(&self, link: &ShortLink) -> Result<()> {
        let active = shortlink_to_active_model(link);

        match link::Entity::insert(active).exec(&self.db).await {
            Ok(_) => {
                debug!("Link inserted: {} -> {}", link.code, link.target);
                Ok(())
            }
            Err(e) => match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Err(ClickLensError::conflict(
                    format!("Short code already exists: {}", link.code),
                )),
                _ => Err(e.into()),
            },
        }
    }
}
