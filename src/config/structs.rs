use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 原始配置（从环境变量 / .env 加载）
///
/// Every `VITE_*` variable maps onto the unprefixed, lowercased field name,
/// e.g. `VITE_SERVER_PORT=5173` fills `server_port`. Optional fields are
/// the ones whose final value is derived from other settings in
/// [`ViteSettings::resolve`].
#[derive(Debug, Clone, Deserialize)]
pub struct ViteSettings {
    #[serde(default)]
    pub hot_reload: Option<bool>,
    #[serde(default)]
    pub static_url: Option<String>,
    #[serde(default = "default_static_path")]
    pub static_path: String,
    #[serde(default = "default_assets_path")]
    pub assets_path: String,
    #[serde(default)]
    pub manifest_path: Option<String>,
    #[serde(default)]
    pub is_react: bool,
    #[serde(default = "default_server_host")]
    pub server_host: String,
    #[serde(default = "default_server_protocol")]
    pub server_protocol: String,
    #[serde(default = "default_server_port")]
    pub server_port: u16,
    #[serde(default = "default_ws_client")]
    pub ws_client: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_format")]
    pub log_format: String,
    #[serde(default)]
    pub log_file: Option<String>,
}

/// 解析后的最终配置
///
/// Built once at startup by [`ViteConfig::load`] or
/// [`ViteConfig::from_vars`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViteConfig {
    /// `true` serves assets from the dev server, `false` from the manifest.
    pub hot_reload: bool,
    /// Always ends with `/`.
    pub static_url: String,
    pub static_path: PathBuf,
    pub assets_path: PathBuf,
    pub manifest_path: PathBuf,
    pub is_react: bool,
    pub server_host: String,
    pub server_protocol: String,
    pub server_port: u16,
    /// Sub-path of the dev server's client runtime.
    pub ws_client: String,
    pub logging: LoggingConfig,
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

// ============================================================
// Default value functions
// ============================================================

pub(crate) const DEFAULT_STATIC_URL: &str = "/static/";
pub(crate) const MANIFEST_FILE_NAME: &str = "manifest.json";

fn default_static_path() -> String {
    "static/".to_string()
}

fn default_assets_path() -> String {
    "static/".to_string()
}

fn default_server_host() -> String {
    "localhost".to_string()
}

fn default_server_protocol() -> String {
    "http".to_string()
}

fn default_server_port() -> u16 {
    3000
}

fn default_ws_client() -> String {
    "@vite/client".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

// ============================================================
// Default implementations
// ============================================================

impl Default for ViteSettings {
    fn default() -> Self {
        Self {
            hot_reload: None,
            static_url: None,
            static_path: default_static_path(),
            assets_path: default_assets_path(),
            manifest_path: None,
            is_react: false,
            server_host: default_server_host(),
            server_protocol: default_server_protocol(),
            server_port: default_server_port(),
            ws_client: default_ws_client(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            log_file: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Default for ViteConfig {
    /// Production-mode defaults, manifest at `static/manifest.json`.
    fn default() -> Self {
        let static_path = PathBuf::from(default_static_path());
        Self {
            hot_reload: false,
            static_url: DEFAULT_STATIC_URL.to_string(),
            manifest_path: static_path.join(MANIFEST_FILE_NAME),
            static_path,
            assets_path: PathBuf::from(default_assets_path()),
            is_react: false,
            server_host: default_server_host(),
            server_protocol: default_server_protocol(),
            server_port: default_server_port(),
            ws_client: default_ws_client(),
            logging: LoggingConfig::default(),
        }
    }
}
