//! # 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

/// 应用主要错误类型
#[derive(Debug, Error)]
pub enum DashboardError {
    /// 配置相关错误
    #[error("配置错误: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 请求参数校验错误（在进入核心逻辑之前拦截）
    #[error("参数错误: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// 资源不存在，或一次性令牌已被使用
    #[error("资源未找到: {resource_type} {identifier}")]
    NotFound {
        resource_type: String,
        identifier: String,
    },

    /// 第三方授权服务返回非成功状态或不可达
    #[error("上游服务错误 [{provider}]: {message}")]
    Upstream {
        provider: String,
        status: Option<u16>,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 第三方响应无法解析
    #[error("响应解析错误 [{provider}]: {message}")]
    Parse {
        provider: String,
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 没有活跃项目拥有该来电路由号码
    #[error("路由错误: {message}")]
    Routing { message: String },

    /// 存储层操作失败
    #[error("持久化错误: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 访问被拒绝
    #[error("禁止访问: {message}")]
    Forbidden { message: String },

    /// 身份认证失败
    #[error("认证错误: {message}")]
    Unauthorized {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// 系统内部错误
    #[error("内部错误: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// IO相关错误
    #[error("IO错误: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// 序列化/反序列化错误
    #[error("序列化错误: {message}")]
    Serialization {
        message: String,
        #[source]
        source: anyhow::Error,
    },

    /// 附加了上下文信息的错误
    #[error("{context}")]
    Context {
        context: String,
        #[source]
        source: Box<DashboardError>,
    },
}

impl DashboardError {
    /// 将错误转换为HTTP状态码和错误代码
    #[must_use]
    pub fn to_http_response_parts(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Config { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR"),
            Self::Validation { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Upstream { .. } => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Self::Parse { .. } => (StatusCode::BAD_GATEWAY, "PARSE_ERROR"),
            Self::Routing { .. } => (StatusCode::NOT_FOUND, "ROUTING_ERROR"),
            Self::Persistence { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "PERSISTENCE_ERROR"),
            Self::Forbidden { .. } => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            Self::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            Self::Io { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
            Self::Serialization { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "SERIALIZATION_ERROR")
            }
            Self::Context { source, .. } => source.to_http_response_parts(),
        }
    }

    /// 剥离上下文包装，返回最内层的错误
    #[must_use]
    pub fn root(&self) -> &Self {
        match self {
            Self::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// 是否为资源未找到错误（穿透上下文包装）
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), Self::NotFound { .. })
    }

    /// 按错误类别输出日志
    pub fn log(&self) {
        let (status, code) = self.to_http_response_parts();
        if status.is_server_error() {
            tracing::error!(code, error = %self, "request failed");
        } else {
            tracing::warn!(code, error = %self, "request rejected");
        }
    }

    /// 创建配置错误
    pub fn config<T: Into<String>>(message: T) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的配置错误
    pub fn config_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建参数校验错误
    pub fn validation<T: Into<String>>(message: T, field: Option<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field,
        }
    }

    /// 创建资源未找到错误
    pub fn not_found<T: Into<String>, I: Into<String>>(resource_type: T, identifier: I) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            identifier: identifier.into(),
        }
    }

    /// 创建上游服务错误
    pub fn upstream<P: Into<String>, T: Into<String>>(
        provider: P,
        status: Option<u16>,
        message: T,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status,
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的上游服务错误
    pub fn upstream_with_source<P: Into<String>, T: Into<String>, E: Into<anyhow::Error>>(
        provider: P,
        message: T,
        source: E,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status: None,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建带来源的响应解析错误
    pub fn parse_with_source<P: Into<String>, T: Into<String>, E: Into<anyhow::Error>>(
        provider: P,
        message: T,
        source: E,
    ) -> Self {
        Self::Parse {
            provider: provider.into(),
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建路由错误
    pub fn routing<T: Into<String>>(message: T) -> Self {
        Self::Routing {
            message: message.into(),
        }
    }

    /// 创建持久化错误
    pub fn persistence<T: Into<String>>(message: T) -> Self {
        Self::Persistence {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的持久化错误
    pub fn persistence_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Persistence {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// 创建禁止访问错误
    pub fn forbidden<T: Into<String>>(message: T) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// 创建认证错误
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized {
            message: message.into(),
            source: None,
        }
    }

    /// 创建内部错误
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }

    /// 创建带来源的内部错误
    pub fn internal_with_source<T: Into<String>, E: Into<anyhow::Error>>(
        message: T,
        source: E,
    ) -> Self {
        Self::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

// 自动转换常见错误类型
impl From<std::io::Error> for DashboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: "文件操作失败".to_string(),
            source: err,
        }
    }
}

impl From<toml::de::Error> for DashboardError {
    fn from(err: toml::de::Error) -> Self {
        Self::config_with_source("TOML解析失败", err)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: "JSON处理失败".to_string(),
            source: err.into(),
        }
    }
}

impl From<sea_orm::error::DbErr> for DashboardError {
    fn from(err: sea_orm::error::DbErr) -> Self {
        Self::persistence_with_source("数据库操作失败", err)
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        Self::Upstream {
            provider: err
                .url()
                .and_then(|u| u.host_str().map(ToString::to_string))
                .unwrap_or_else(|| "unknown".to_string()),
            status,
            message: "HTTP请求失败".to_string(),
            source: Some(err.into()),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for DashboardError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Unauthorized {
            message: "JWT处理失败".to_string(),
            source: Some(err.into()),
        }
    }
}
