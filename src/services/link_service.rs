//! Link management service
//!
//! Encapsulates link creation (code generation with bounded collision
//! retry) and lookup, shared by the HTTP handlers and tests.

use std::sync::Arc;

use tracing::{error, warn};

use crate::config::get_config;
use crate::errors::{ClickLensError, Result};
use crate::storage::{SeaOrmStorage, ShortLink};
use crate::utils::generate_random_code;

/// 生成器撞码时的最大重试次数
const MAX_GENERATE_ATTEMPTS: usize = 5;

pub struct LinkService {
    storage: Arc<SeaOrmStorage>,
}

impl LinkService {
    /// Create a new LinkService instance
    pub fn new(storage: Arc<SeaOrmStorage>) -> Self {
        Self { storage }
    }

    fn random_code_length(&self) -> usize {
        get_config().features.random_code_length
    }

    /// Create a new short link for the given destination URL.
    ///
    /// The destination is stored verbatim — any non-empty string is
    /// accepted. Code collisions trigger regeneration, bounded by
    /// `MAX_GENERATE_ATTEMPTS`.
    pub async fn create_link(&self, target: &str) -> Result<ShortLink> {
        if target.trim().is_empty() {
            return Err(ClickLensError::validation("URL is required"));
        }

        let length = self.random_code_length();

        for attempt in 1..=MAX_GENERATE_ATTEMPTS {
            let code = generate_random_code(length);
            let link = ShortLink::new(code, target.to_string());

            match self.storage.insert(&link).await {
                Ok(()) => return Ok(link),
                Err(ClickLensError::Conflict(msg)) => {
                    warn!(
                        "Generated code collision (attempt {}/{}): {}",
                        attempt, MAX_GENERATE_ATTEMPTS, msg
                    );
                    continue;
                }
                Err(e) => {
                    error!("Failed to insert link: {}", e);
                    return Err(e);
                }
            }
        }

        Err(ClickLensError::database_operation(format!(
            "Could not generate a unique short code after {} attempts",
            MAX_GENERATE_ATTEMPTS
        )))
    }

    /// Resolve a short code to its stored link, if any
    pub async fn resolve(&self, code: &str) -> Result<Option<ShortLink>> {
        self.storage.get(code).await
    }
}
