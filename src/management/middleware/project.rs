//! # 项目认证中间件
//!
//! 从请求头中提取 JWT，验证并将其中的项目信息注入到请求扩展中。

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::{DashboardError, Result};
use crate::management::response;
use crate::management::server::AppState;

/// 项目令牌声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectClaims {
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub exp: i64,
}

/// 请求所属的项目上下文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectContext {
    pub project_id: String,
}

/// 项目令牌管理器（HS256）
pub struct ProjectTokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    enabled: bool,
}

impl ProjectTokenManager {
    #[must_use]
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 30;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            enabled: !secret.is_empty(),
        }
    }

    /// 签发项目令牌
    pub fn issue(&self, project_id: &str, ttl: chrono::Duration) -> Result<String> {
        let claims = ProjectClaims {
            project_id: project_id.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DashboardError::internal_with_source("签发项目令牌失败", e))
    }

    /// 验证令牌并返回声明；未配置密钥时一律拒绝
    pub fn validate(&self, token: &str) -> Result<ProjectClaims> {
        if !self.enabled {
            return Err(DashboardError::unauthorized("项目令牌密钥未配置"));
        }
        let data = decode::<ProjectClaims>(token, &self.decoding_key, &self.validation)?;
        if data.claims.project_id.is_empty() {
            return Err(DashboardError::unauthorized("令牌缺少项目信息"));
        }
        Ok(data.claims)
    }
}

/// 从 Authorization 头中提取 Bearer token
#[must_use]
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Axum 项目认证中间件
pub async fn project_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(extract_bearer_token);

    let Some(token) = token else {
        return response::app_error(DashboardError::unauthorized("缺少认证令牌"));
    };

    match state.tokens.validate(token) {
        Ok(claims) => {
            request.extensions_mut().insert(Arc::new(ProjectContext {
                project_id: claims.project_id,
            }));
            next.run(request).await
        }
        Err(err) => {
            tracing::debug!(error = %err, "project token rejected");
            response::app_error(err)
        }
    }
}
