pub mod manager;
pub mod sink;

pub use manager::ClickManager;
pub use sink::ClickSink;

use chrono::{DateTime, Utc};

/// 设备类型，按 User-Agent 分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceClass {
    Mobile,
    Desktop,
}

impl DeviceClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceClass::Mobile => "Mobile",
            DeviceClass::Desktop => "Desktop",
        }
    }
}

/// 单次点击事件
///
/// 每次成功跳转记录一条，写入后不可变。
#[derive(Debug, Clone)]
pub struct ClickEvent {
    /// 短链接代码
    pub code: String,
    /// 点击时间戳
    pub timestamp: DateTime<Utc>,
    /// 客户端 IP 地址
    pub ip_address: Option<String>,
    /// 浏览器名称
    pub browser: String,
    /// 操作系统名称
    pub os: String,
    /// 设备类型
    pub device: DeviceClass,
}
