//! 配置文件 - 从 JSON 加载全局通知设置
//!
//! 默认路径 `~/.config/growl-notify/config.json`，可用 `GROWL_CONFIG` 覆盖。
//! 文件不存在时使用默认设置。
//!
//! ```json
//! {
//!   "target": "#growl",
//!   "timeout_ms": 3000,
//!   "closeable": true,
//!   "types": {
//!     "error": { "sticky": true, "title": "Error" },
//!     "info": { "timeout_ms": 1000 }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::notification::GlobalSettings;

/// 覆盖配置文件路径的环境变量
pub const CONFIG_ENV: &str = "GROWL_CONFIG";

/// 默认配置文件路径
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("growl-notify")
        .join("config.json")
}

/// 实际使用的配置文件路径（环境变量优先）
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

/// 从文件加载全局设置
pub fn load_settings(path: &Path) -> Result<GlobalSettings> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(GlobalSettings::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    parse_settings(&content).with_context(|| format!("Invalid config file {}", path.display()))
}

/// 解析 JSON 配置内容
pub fn parse_settings(content: &str) -> Result<GlobalSettings> {
    let settings: GlobalSettings = serde_json::from_str(content)?;
    Ok(settings)
}
