use serde::{Deserialize, Serialize};

/// 短链接记录，创建后不可变
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShortLink {
    pub code: String,
    pub target: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ShortLink {
    pub fn new(code: String, target: String) -> Self {
        Self {
            code,
            target,
            created_at: chrono::Utc::now(),
        }
    }
}
