//! Application configuration
//!
//! Static configuration loaded once at startup: an optional `config.toml`
//! first, then environment variable overrides. `DATABASE_URL` has no
//! default — startup fails hard when it is missing.

use std::env;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::{ClickLensError, Result};

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// 数据库连接配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub database_url: String,
    #[serde(default = "default_database_pool_size")]
    pub pool_size: u32,
}

/// 点击统计配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    /// 后台刷盘间隔（秒）
    #[serde(default = "default_flush_interval_secs")]
    pub flush_interval_secs: u64,
    /// 缓冲区达到该数量时立即触发刷盘
    #[serde(default = "default_max_buffered_events")]
    pub max_buffered_events: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeaturesConfig {
    #[serde(default = "default_random_code_length")]
    pub random_code_length: usize,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML file with environment variable fallback
    pub fn load() -> Self {
        let mut config = Self::load_from_file();
        config.override_with_env();
        config
    }

    fn load_from_file() -> Self {
        let config_paths = ["config.toml", "clicklens.toml", "config/config.toml"];

        for path in &config_paths {
            if Path::new(path).exists() {
                debug!("Loading config from: {}", path);
                match fs::read_to_string(path) {
                    Ok(content) => match toml::from_str::<AppConfig>(&content) {
                        Ok(config) => return config,
                        Err(e) => {
                            warn!("Failed to parse config file {}: {}", path, e);
                        }
                    },
                    Err(e) => {
                        warn!("Failed to read config file {}: {}", path, e);
                    }
                }
            }
        }

        debug!("No config file found, using defaults");
        Self::default()
    }

    /// Override configuration with environment variables
    fn override_with_env(&mut self) {
        if let Ok(host) = env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = env::var("SERVER_PORT") {
            match port.parse() {
                Ok(port) => self.server.port = port,
                Err(_) => warn!("Invalid SERVER_PORT: {}", port),
            }
        }

        if let Ok(database_url) = env::var("DATABASE_URL") {
            self.database.database_url = database_url;
        }
        if let Ok(pool_size) = env::var("DATABASE_POOL_SIZE") {
            match pool_size.parse() {
                Ok(size) => self.database.pool_size = size,
                Err(_) => warn!("Invalid DATABASE_POOL_SIZE: {}", pool_size),
            }
        }

        if let Ok(interval) = env::var("CLICK_FLUSH_INTERVAL_SECS") {
            match interval.parse() {
                Ok(secs) => self.analytics.flush_interval_secs = secs,
                Err(_) => warn!("Invalid CLICK_FLUSH_INTERVAL_SECS: {}", interval),
            }
        }
        if let Ok(max_buffered) = env::var("CLICK_MAX_BUFFERED_EVENTS") {
            match max_buffered.parse() {
                Ok(max) => self.analytics.max_buffered_events = max,
                Err(_) => warn!("Invalid CLICK_MAX_BUFFERED_EVENTS: {}", max_buffered),
            }
        }

        if let Ok(length) = env::var("RANDOM_CODE_LENGTH") {
            match length.parse() {
                Ok(length) => self.features.random_code_length = length,
                Err(_) => warn!("Invalid RANDOM_CODE_LENGTH: {}", length),
            }
        }

        if let Ok(level) = env::var("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("LOG_FORMAT") {
            self.logging.format = format;
        }
        if let Ok(file) = env::var("LOG_FILE") {
            self.logging.file = Some(file);
        }
    }

    /// 校验配置，DATABASE_URL 缺失视为致命错误
    pub fn validate(&self) -> Result<()> {
        if self.database.database_url.trim().is_empty() {
            return Err(ClickLensError::database_config(
                "DATABASE_URL is missing. Set it in the environment or config.toml",
            ));
        }
        Ok(())
    }
}

/// Initialize the global configuration. Idempotent; subsequent calls
/// return the already-initialized value. Validation is the caller's
/// responsibility (startup treats a failed `validate` as fatal).
pub fn init_config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::load)
}

/// Get the global configuration
///
/// # Panics
/// Panics if `init_config` has not been called.
pub fn get_config() -> &'static AppConfig {
    CONFIG.get().expect("Config not initialized")
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_server_host() -> String {
    "127.0.0.1".to_string()
}

fn default_server_port() -> u16 {
    3001
}

fn default_database_pool_size() -> u32 {
    10
}

fn default_flush_interval_secs() -> u64 {
    2
}

fn default_max_buffered_events() -> usize {
    256
}

fn default_random_code_length() -> usize {
    7
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    7
}

fn default_enable_rotation() -> bool {
    false
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            pool_size: default_database_pool_size(),
        }
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            flush_interval_secs: default_flush_interval_secs(),
            max_buffered_events: default_max_buffered_events(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            random_code_length: default_random_code_length(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
