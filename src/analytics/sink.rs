use super::ClickEvent;

/// 点击事件 Sink
///
/// 由存储后端实现；`ClickManager` 通过该 trait 刷盘，测试中可用
/// mock 实现替换。
#[async_trait::async_trait]
pub trait ClickSink: Send + Sync {
    /// 记录单条点击事件
    async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()>;

    /// 批量记录点击事件
    async fn log_clicks_batch(&self, events: Vec<ClickEvent>) -> anyhow::Result<()>;
}

pub struct StdoutSink;

#[async_trait::async_trait]
impl ClickSink for StdoutSink {
    async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()> {
        println!("Click event: {:?}", event);
        Ok(())
    }

    async fn log_clicks_batch(&self, events: Vec<ClickEvent>) -> anyhow::Result<()> {
        println!("Click events batch: {} entries", events.len());
        for event in &events {
            println!("  - {:?}", event);
        }
        Ok(())
    }
}
