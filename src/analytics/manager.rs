//! 点击事件管理器
//!
//! 跳转路径只把事件写进内存缓冲区，不等待数据库；后台任务定期
//! 刷盘，缓冲区超过阈值时立即触发。刷盘失败的事件放回缓冲区，
//! 等下一轮重试，跳转响应永远不被日志写入拖慢。

use dashmap::DashMap;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use tokio::sync::Mutex;
use tokio::time::{Duration, sleep};
use tracing::{debug, trace, warn};

use crate::analytics::{ClickEvent, ClickSink};

/// 事件缓冲区，封装所有可变状态
struct EventBuffer {
    data: DashMap<u64, ClickEvent>,
    /// 下一个缓冲区内部 ID（仅用于去重键，与数据库主键无关）
    next_id: AtomicU64,
    /// 刷盘锁，防止并发刷盘
    flush_lock: Mutex<()>,
    /// 是否有 flush 任务待处理（防止重复 spawn）
    flush_pending: AtomicBool,
}

impl EventBuffer {
    fn new() -> Self {
        Self {
            data: DashMap::new(),
            next_id: AtomicU64::new(0),
            flush_lock: Mutex::new(()),
            flush_pending: AtomicBool::new(false),
        }
    }

    /// 添加事件，返回当前缓冲区大小
    fn push(&self, event: ClickEvent) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.data.insert(id, event);
        self.data.len()
    }

    /// 收集所有事件并清空缓冲区（逐个 remove 避免竞态）
    fn drain(&self) -> Vec<ClickEvent> {
        let keys: Vec<u64> = self.data.iter().map(|r| *r.key()).collect();
        let mut events = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some((_, event)) = self.data.remove(&key) {
                events.push(event);
            }
        }
        events
    }

    /// 恢复数据到缓冲区（用于刷盘失败时的恢复）
    fn restore(&self, events: Vec<ClickEvent>) {
        for event in events {
            self.push(event);
        }
    }

    fn len(&self) -> usize {
        self.data.len()
    }
}

/// 点击事件管理器
///
/// 状态完全封装在结构体内部，便于测试和多实例使用。
#[derive(Clone)]
pub struct ClickManager {
    buffer: Arc<EventBuffer>,
    sink: Arc<dyn ClickSink>,
    flush_interval: Duration,
    /// 触发立即刷盘的缓冲区事件数
    max_buffered_events: usize,
}

impl ClickManager {
    pub fn new(
        sink: Arc<dyn ClickSink>,
        flush_interval: Duration,
        max_buffered_events: usize,
    ) -> Self {
        Self {
            buffer: Arc::new(EventBuffer::new()),
            sink,
            flush_interval,
            max_buffered_events,
        }
    }

    /// 记录一次点击（非阻塞，调用方不等待数据库写入）
    pub fn record(&self, event: ClickEvent) {
        let current_size = self.buffer.push(event);
        trace!("ClickManager: Current buffer size: {}", current_size);

        // 检查是否达到阈值，尝试触发刷盘
        if current_size >= self.max_buffered_events {
            // 使用 compare_exchange 防止任务风暴：
            // 只有成功将 flush_pending 从 false 设为 true 的线程才 spawn
            if self
                .buffer
                .flush_pending
                .compare_exchange(false, true, Ordering::SeqCst, Ordering::Relaxed)
                .is_ok()
            {
                let buffer = Arc::clone(&self.buffer);
                let sink = Arc::clone(&self.sink);
                tokio::spawn(async move {
                    if let Ok(_guard) = buffer.flush_lock.try_lock() {
                        Self::flush_buffer(&buffer, &sink).await;
                    } else {
                        trace!("ClickManager: flush already in progress, skipping");
                    }
                    // 无论成功与否都重置标志，允许下次触发
                    buffer.flush_pending.store(false, Ordering::Release);
                });
            }
        }
    }

    /// 启动后台刷盘任务（作为异步方法运行）
    pub async fn start_background_task(&self) {
        loop {
            sleep(self.flush_interval).await;

            debug!("ClickManager: Triggering scheduled flush");
            if let Ok(_guard) = self.buffer.flush_lock.try_lock() {
                Self::flush_buffer(&self.buffer, &self.sink).await;
            } else {
                trace!("ClickManager: flush already in progress, skipping scheduled flush");
            }
        }
    }

    /// 手动触发刷盘（阻塞直到完成，关停时调用）
    pub async fn flush(&self) {
        debug!("ClickManager: Manual flush triggered");
        let _guard = self.buffer.flush_lock.lock().await;
        Self::flush_buffer(&self.buffer, &self.sink).await;
    }

    /// 执行实际的刷盘操作
    async fn flush_buffer(buffer: &EventBuffer, sink: &Arc<dyn ClickSink>) {
        let events = buffer.drain();

        if events.is_empty() {
            trace!("ClickManager: No events to flush");
            return;
        }

        let count = events.len();
        match sink.log_clicks_batch(events.clone()).await {
            Ok(_) => {
                debug!("ClickManager: Successfully flushed {} events", count);
            }
            Err(e) => {
                // 刷盘失败，恢复数据到 buffer
                buffer.restore(events);
                warn!(
                    "ClickManager: log_clicks_batch failed: {}, {} events restored to buffer",
                    e, count
                );
            }
        }
    }

    /// 获取当前缓冲区大小（用于监控和测试）
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }
}
