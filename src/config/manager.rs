//! # 配置管理器
//!
//! 配置文件发现、环境变量覆盖与启动验证。配置在启动时构建一次，之后只读共享。

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::AppConfig;
use crate::error::{Context, DashboardError, Result};

/// 兼容旧部署的环境变量名到配置路径的映射
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("FB_APP_ID", "facebook.app_id"),
    ("FB_APP_SECRET", "facebook.app_secret"),
    ("GA_CLIENT_ID", "google.client_id"),
    ("GA_SECRET", "google.client_secret"),
    ("GA_REDIRECT_URI", "google.redirect_uri"),
    ("JITSU_KEY", "pipeline.api_key"),
    ("DATABASE_URL", "database.url"),
    ("JWT_SECRET", "auth.jwt_secret"),
];

const ENV_PREFIX: &str = "DASHBOARD_";

/// 配置管理器
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: Arc<AppConfig>,
}

impl ConfigManager {
    /// 创建配置管理器
    pub fn new() -> Result<Self> {
        // 优先使用环境变量指定的配置文件路径
        let config_file = if let Ok(path) = env::var("DASHBOARD_CONFIG_PATH") {
            path
        } else {
            let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
            format!("config/config.{env}.toml")
        };

        Self::from_file(&config_file)
    }

    /// 从指定文件创建配置管理器，并应用进程环境变量覆盖
    pub fn from_file(config_path: impl AsRef<Path>) -> Result<Self> {
        Self::from_file_with_env(config_path, env::vars())
    }

    /// 从指定文件与给定的环境变量集合创建配置管理器
    pub fn from_file_with_env(
        config_path: impl AsRef<Path>,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> Result<Self> {
        let config_path = config_path.as_ref();
        let mut config = Self::load_config_file(config_path)?;

        let overrides = Self::build_env_overrides(vars);
        Self::apply_env_overrides(&mut config, &overrides)?;

        super::validate_config(&config)?;

        info!(
            path = %config_path.display(),
            overrides = overrides.len(),
            "configuration loaded"
        );

        Ok(Self {
            config: Arc::new(config),
        })
    }

    /// 获取当前配置
    #[must_use]
    pub fn config(&self) -> Arc<AppConfig> {
        Arc::clone(&self.config)
    }

    /// 加载配置文件，文件不存在时使用默认配置
    fn load_config_file(path: &Path) -> Result<AppConfig> {
        if !path.exists() {
            warn!(path = %path.display(), "config file not found, using defaults");
            return Ok(AppConfig::default());
        }

        let config_content = std::fs::read_to_string(path).map_err(|e| {
            DashboardError::config_with_source(format!("读取配置文件失败: {}", path.display()), e)
        })?;

        toml::from_str(&config_content)
            .with_context(|| format!("加载配置文件失败: {}", path.display()))
    }

    /// 构建环境变量覆盖映射
    ///
    /// `DASHBOARD_SERVER_PORT` -> `server.port`，`DASHBOARD_GOOGLE_CLIENT_ID` -> `google.client_id`。
    pub fn build_env_overrides(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> HashMap<String, String> {
        let mut overrides = HashMap::new();

        for (key, value) in vars {
            if key == "DASHBOARD_CONFIG_PATH" {
                continue;
            }
            if let Some(config_key) = key.strip_prefix(ENV_PREFIX) {
                let lowered = config_key.to_lowercase();
                if let Some((section, field)) = lowered.split_once('_') {
                    overrides.insert(format!("{section}.{field}"), value);
                }
            } else if let Some((_, path)) = LEGACY_ENV_KEYS.iter().find(|(name, _)| *name == key) {
                // 显式的 DASHBOARD_ 前缀变量优先
                overrides.entry((*path).to_string()).or_insert(value);
            }
        }

        debug!("发现 {} 个环境变量覆盖", overrides.len());
        overrides
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(
        config: &mut AppConfig,
        overrides: &HashMap<String, String>,
    ) -> Result<()> {
        for (path, value) in overrides {
            debug!(
                "应用环境变量覆盖: {} = {}",
                path,
                if path.contains("secret") || path.contains("key") || path.contains("url") {
                    "***"
                } else {
                    value
                }
            );

            Self::apply_override_to_config(config, path, value)?;
        }
        Ok(())
    }

    fn parse_number<T: std::str::FromStr>(path: &str, value: &str) -> Result<T>
    where
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        value.parse().map_err(|e| {
            DashboardError::config_with_source(format!("无效的数值配置 {path}: {value}"), e)
        })
    }

    /// 将环境变量覆盖应用到配置对象
    fn apply_override_to_config(config: &mut AppConfig, path: &str, value: &str) -> Result<()> {
        let Some((section, field)) = path.split_once('.') else {
            warn!("未知的配置路径，忽略环境变量覆盖: {}", path);
            return Ok(());
        };

        match (section, field) {
            ("server", "host") => config.server.host = value.to_string(),
            ("server", "port") => config.server.port = Self::parse_number(path, value)?,
            ("server", "api_prefix") => config.server.api_prefix = value.to_string(),
            ("server", "cors_origins") => {
                config.server.cors_origins = value
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect();
            }
            ("server", "request_timeout_seconds") => {
                config.server.request_timeout_seconds = Self::parse_number(path, value)?;
            }
            ("database", "url") => config.database.url = value.to_string(),
            ("database", "max_connections") => {
                config.database.max_connections = Self::parse_number(path, value)?;
            }
            ("database", "connect_timeout") => {
                config.database.connect_timeout = Self::parse_number(path, value)?;
            }
            ("auth", "jwt_secret") => config.auth.jwt_secret = value.to_string(),
            ("facebook", "app_id") => config.facebook.app_id = value.to_string(),
            ("facebook", "app_secret") => config.facebook.app_secret = value.to_string(),
            ("facebook", "token_url") => config.facebook.token_url = value.to_string(),
            ("google", "client_id") => config.google.client_id = value.to_string(),
            ("google", "client_secret") => config.google.client_secret = value.to_string(),
            ("google", "redirect_uri") => config.google.redirect_uri = value.to_string(),
            ("google", "authorize_url") => config.google.authorize_url = value.to_string(),
            ("google", "token_url") => config.google.token_url = value.to_string(),
            ("google", "scope") => config.google.scope = value.to_string(),
            ("google", "state_ttl_minutes") => {
                config.google.state_ttl_minutes = Self::parse_number(path, value)?;
            }
            ("pipeline", "api_key") => config.pipeline.api_key = value.to_string(),
            ("transport", "routing_url") => config.transport.routing_url = value.to_string(),
            ("transport", "notify_url") => config.transport.notify_url = value.to_string(),
            ("transport", "notify_queue_capacity") => {
                config.transport.notify_queue_capacity = Self::parse_number(path, value)?;
            }
            ("transport", "notify_workers") => {
                config.transport.notify_workers = Self::parse_number(path, value)?;
            }
            ("http", "timeout_seconds") => {
                config.http.timeout_seconds = Self::parse_number(path, value)?;
            }
            ("http", "user_agent") => config.http.user_agent = value.to_string(),
            _ => {
                warn!("未知的配置路径，忽略环境变量覆盖: {}", path);
            }
        }

        Ok(())
    }
}
