//! ClickSink implementation for SeaOrmStorage
//!
//! Batch-inserts buffered click events into the click_events table.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait};
use tracing::debug;

use super::SeaOrmStorage;
use crate::analytics::{ClickEvent, ClickSink};

use migration::entities::click_event;

#[async_trait]
impl ClickSink for SeaOrmStorage {
    async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()> {
        self.log_clicks_batch(vec![event]).await
    }

    async fn log_clicks_batch(&self, events: Vec<ClickEvent>) -> anyhow::Result<()> {
        if events.is_empty() {
            return Ok(());
        }

        let total_count = events.len();

        let models: Vec<click_event::ActiveModel> = events
            .iter()
            .map(|event| click_event::ActiveModel {
                short_code: Set(event.code.clone()),
                clicked_at: Set(event.timestamp),
                ip_address: Set(event.ip_address.clone()),
                browser: Set(event.browser.clone()),
                os: Set(event.os.clone()),
                device: Set(event.device.as_str().to_string()),
                ..Default::default()
            })
            .collect();

        click_event::Entity::insert_many(models)
            .exec(&self.db)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to batch insert click events: {}", e))?;

        debug!(
            "Click events written to {} database ({} records)",
            self.backend_name.to_uppercase(),
            total_count
        );

        Ok(())
    }
}
