//! # 配置管理模块
//!
//! 处理应用配置加载、验证和环境变量覆盖

mod app_config;
mod database;
mod manager;

pub use app_config::{
    AppConfig, AuthConfig, FacebookAppConfig, GoogleOAuthConfig, HttpClientConfig,
    PipelineConfig, ServerConfig, TransportConfig,
};
pub use database::DatabaseConfig;
pub use manager::ConfigManager;

/// 验证配置有效性，结构性问题直接失败，缺失凭证只告警
pub fn validate_config(config: &AppConfig) -> crate::error::Result<()> {
    config
        .validate()
        .map_err(|e| crate::error::DashboardError::config(format!("配置验证失败: {e}")))?;

    for name in config.missing_credentials() {
        tracing::warn!(setting = name, "credential not configured, dependent flow will be rejected");
    }

    Ok(())
}
