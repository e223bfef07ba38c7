//! # 应用配置结构定义

use serde::{Deserialize, Serialize};

/// 应用主配置结构
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP 服务配置
    pub server: ServerConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// 项目令牌配置
    pub auth: AuthConfig,
    /// Facebook 应用凭证
    pub facebook: FacebookAppConfig,
    /// Google Ads OAuth 凭证
    pub google: GoogleOAuthConfig,
    /// 数据管道配置
    pub pipeline: PipelineConfig,
    /// 来电接收与通知配置
    pub transport: TransportConfig,
    /// 出站 HTTP 客户端配置
    pub http: HttpClientConfig,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 管理接口前缀
    pub api_prefix: String,
    /// 允许的跨域来源，空表示允许全部
    pub cors_origins: Vec<String>,
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            api_prefix: "/api".to_string(),
            cors_origins: Vec::new(),
            request_timeout_seconds: 30,
        }
    }
}

/// 项目令牌（JWT）配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Facebook 应用凭证
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacebookAppConfig {
    pub app_id: String,
    pub app_secret: String,
    /// 长期令牌兑换地址
    pub token_url: String,
}

impl Default for FacebookAppConfig {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            app_secret: String::new(),
            token_url: "https://graph.facebook.com/oauth/access_token".to_string(),
        }
    }
}

/// Google Ads OAuth 凭证
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    /// 授权同意页地址
    pub authorize_url: String,
    /// 授权码兑换地址
    pub token_url: String,
    pub scope: String,
    /// 授权状态有效期（分钟）
    pub state_ttl_minutes: i64,
}

impl Default for GoogleOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            scope: "https://www.googleapis.com/auth/adwords".to_string(),
            state_ttl_minutes: 30,
        }
    }
}

/// 数据管道配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// 汇总接口共享密钥，为空时拒绝所有请求
    pub api_key: String,
}

/// 来电接收与通知配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// 创建来电数据源时返回给调用方的回调地址
    pub routing_url: String,
    /// 来电通知 webhook 地址，为空时不发送
    pub notify_url: String,
    pub notify_queue_capacity: usize,
    pub notify_workers: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            routing_url: "https://dash.gbs-digital.com/t/cp".to_string(),
            notify_url: "https://hooks.zapier.com/hooks/catch/6820014/bz8ghqa".to_string(),
            notify_queue_capacity: 256,
            notify_workers: 4,
        }
    }
}

/// 出站 HTTP 客户端配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpClientConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: concat!("dashboard-api/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl AppConfig {
    /// 验证配置的结构性错误
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be greater than 0".to_string());
        }
        if !self.server.api_prefix.starts_with('/') || self.server.api_prefix.ends_with('/') {
            return Err(format!(
                "server.api_prefix must start with '/' and must not end with '/': {}",
                self.server.api_prefix
            ));
        }
        if self.server.request_timeout_seconds == 0 {
            return Err("server.request_timeout_seconds must be greater than 0".to_string());
        }
        if self.database.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.database.max_connections == 0 {
            return Err("Database max_connections must be greater than 0".to_string());
        }
        if self.http.timeout_seconds == 0 {
            return Err("http.timeout_seconds must be greater than 0".to_string());
        }
        if self.transport.notify_queue_capacity == 0 {
            return Err("transport.notify_queue_capacity must be greater than 0".to_string());
        }
        if self.transport.notify_workers == 0 {
            return Err("transport.notify_workers must be greater than 0".to_string());
        }
        if self.google.state_ttl_minutes <= 0 {
            return Err("google.state_ttl_minutes must be greater than 0".to_string());
        }
        Ok(())
    }

    /// 列出缺失的第三方凭证，仅用于启动告警
    #[must_use]
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let checks = [
            ("facebook.app_id", &self.facebook.app_id),
            ("facebook.app_secret", &self.facebook.app_secret),
            ("google.client_id", &self.google.client_id),
            ("google.client_secret", &self.google.client_secret),
            ("google.redirect_uri", &self.google.redirect_uri),
            ("pipeline.api_key", &self.pipeline.api_key),
            ("auth.jwt_secret", &self.auth.jwt_secret),
        ];
        checks
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect()
    }
}
