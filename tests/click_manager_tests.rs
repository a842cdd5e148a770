//! ClickManager tests
//!
//! The buffered fire-and-forget pipeline: record → drain → sink, with
//! restore-on-failure semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use clicklens::analytics::{ClickEvent, ClickManager, ClickSink, DeviceClass};

fn event(code: &str) -> ClickEvent {
    ClickEvent {
        code: code.to_string(),
        timestamp: Utc::now(),
        ip_address: None,
        browser: "Chrome".to_string(),
        os: "Linux".to_string(),
        device: DeviceClass::Desktop,
    }
}

struct MockSink {
    received: std::sync::Mutex<Vec<ClickEvent>>,
}

impl MockSink {
    fn new() -> Self {
        Self {
            received: std::sync::Mutex::new(Vec::new()),
        }
    }

    fn codes(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.code.clone())
            .collect()
    }
}

#[async_trait]
impl ClickSink for MockSink {
    async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()> {
        self.log_clicks_batch(vec![event]).await
    }

    async fn log_clicks_batch(&self, events: Vec<ClickEvent>) -> anyhow::Result<()> {
        self.received.lock().unwrap().extend(events);
        Ok(())
    }
}

/// 第一次刷盘失败，之后成功
struct FlakySink {
    inner: MockSink,
    fail_next: AtomicBool,
}

impl FlakySink {
    fn new() -> Self {
        Self {
            inner: MockSink::new(),
            fail_next: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl ClickSink for FlakySink {
    async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()> {
        self.log_clicks_batch(vec![event]).await
    }

    async fn log_clicks_batch(&self, events: Vec<ClickEvent>) -> anyhow::Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            anyhow::bail!("sink unavailable");
        }
        self.inner.log_clicks_batch(events).await
    }
}

#[tokio::test]
async fn test_record_then_flush_delivers_events() {
    let sink = Arc::new(MockSink::new());
    let manager = ClickManager::new(sink.clone(), Duration::from_secs(3600), 100_000);

    manager.record(event("a"));
    manager.record(event("b"));
    assert_eq!(manager.buffer_size(), 2);

    manager.flush().await;

    assert_eq!(manager.buffer_size(), 0);
    let mut codes = sink.codes();
    codes.sort();
    assert_eq!(codes, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_flush_empty_buffer_is_noop() {
    let sink = Arc::new(MockSink::new());
    let manager = ClickManager::new(sink.clone(), Duration::from_secs(3600), 100_000);

    manager.flush().await;
    assert!(sink.codes().is_empty());
}

#[tokio::test]
async fn test_failed_flush_restores_buffer() {
    let sink = Arc::new(FlakySink::new());
    let manager = ClickManager::new(sink.clone(), Duration::from_secs(3600), 100_000);

    manager.record(event("kept"));

    // 第一次刷盘失败，事件必须回到缓冲区
    manager.flush().await;
    assert_eq!(manager.buffer_size(), 1);
    assert!(sink.inner.codes().is_empty());

    // 第二次刷盘成功，事件最终落库
    manager.flush().await;
    assert_eq!(manager.buffer_size(), 0);
    assert_eq!(sink.inner.codes(), vec!["kept".to_string()]);
}

#[tokio::test]
async fn test_threshold_triggers_background_flush() {
    let sink = Arc::new(MockSink::new());
    // 阈值 3：第三次 record 触发后台刷盘
    let manager = ClickManager::new(sink.clone(), Duration::from_secs(3600), 3);

    manager.record(event("x"));
    manager.record(event("x"));
    manager.record(event("x"));

    // 等待 spawn 出来的刷盘任务完成
    let mut delivered = 0;
    for _ in 0..50 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        delivered = sink.codes().len();
        if delivered == 3 {
            break;
        }
    }
    assert_eq!(delivered, 3);
    assert_eq!(manager.buffer_size(), 0);
}

#[tokio::test]
async fn test_record_does_not_block_on_slow_sink() {
    struct SlowSink;

    #[async_trait]
    impl ClickSink for SlowSink {
        async fn log_click(&self, event: ClickEvent) -> anyhow::Result<()> {
            self.log_clicks_batch(vec![event]).await
        }

        async fn log_clicks_batch(&self, _events: Vec<ClickEvent>) -> anyhow::Result<()> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(())
        }
    }

    let manager = ClickManager::new(Arc::new(SlowSink), Duration::from_secs(3600), 100_000);

    // record 只写内存缓冲区，即使 sink 很慢也立即返回
    let start = std::time::Instant::now();
    manager.record(event("fast"));
    assert!(start.elapsed() < Duration::from_millis(100));
    assert_eq!(manager.buffer_size(), 1);
}
