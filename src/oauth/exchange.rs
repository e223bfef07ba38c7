//! # 凭证兑换客户端
//!
//! 向第三方授权服务兑换长期凭证：
//! - Facebook：短期用户令牌换取长期令牌（GET）
//! - Google：授权码换取刷新令牌（POST）

use std::time::Duration;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::{FacebookAppConfig, GoogleOAuthConfig, HttpClientConfig};
use crate::error::{DashboardError, Result};
use crate::logging::mask_secret;

const FACEBOOK: &str = "facebook";
const GOOGLE: &str = "google";

/// Facebook 长期令牌响应
#[derive(Debug, Deserialize)]
struct FacebookTokenResponse {
    access_token: String,
}

/// Google 授权码兑换响应
#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    refresh_token: String,
}

/// 构建共享的出站 HTTP 客户端
pub fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| DashboardError::config_with_source("HTTP客户端初始化失败", e))
}

/// 凭证兑换客户端
#[derive(Debug, Clone)]
pub struct CredentialExchangeClient {
    http_client: reqwest::Client,
    facebook: FacebookAppConfig,
    google: GoogleOAuthConfig,
}

impl CredentialExchangeClient {
    #[must_use]
    pub const fn new(
        http_client: reqwest::Client,
        facebook: FacebookAppConfig,
        google: GoogleOAuthConfig,
    ) -> Self {
        Self {
            http_client,
            facebook,
            google,
        }
    }

    /// 兑换 Facebook 长期访问令牌
    pub async fn exchange_facebook_token(&self, short_lived_token: &str) -> Result<String> {
        debug!(token = %mask_secret(short_lived_token), "exchanging facebook token");

        let request = self.http_client.get(&self.facebook.token_url).query(&[
            ("grant_type", "fb_exchange_token"),
            ("client_id", self.facebook.app_id.as_str()),
            ("client_secret", self.facebook.app_secret.as_str()),
            ("fb_exchange_token", short_lived_token),
        ]);

        let response: FacebookTokenResponse = Self::send(FACEBOOK, request).await?;
        Ok(response.access_token)
    }

    /// 用授权码兑换 Google 刷新令牌
    pub async fn exchange_google_code(&self, code: &str) -> Result<String> {
        debug!(code = %mask_secret(code), "exchanging google authorization code");

        let request = self.http_client.post(&self.google.token_url).query(&[
            ("code", code),
            ("client_id", self.google.client_id.as_str()),
            ("client_secret", self.google.client_secret.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.google.redirect_uri.as_str()),
        ]);

        let response: GoogleTokenResponse = Self::send(GOOGLE, request).await?;
        Ok(response.refresh_token)
    }

    /// 发送请求：非成功状态为上游错误，响应体无法解码为解析错误
    async fn send<T: DeserializeOwned>(
        provider: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<T> {
        let response = request.send().await.map_err(|e| {
            warn!(provider, error = %e, "upstream request failed");
            DashboardError::upstream_with_source(provider, "请求第三方授权服务失败", e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            DashboardError::upstream_with_source(provider, "读取第三方响应失败", e)
        })?;

        if !status.is_success() {
            warn!(provider, status = status.as_u16(), "upstream rejected credential exchange");
            return Err(DashboardError::upstream(
                provider,
                Some(status.as_u16()),
                format!("HTTP {status}: {body}"),
            ));
        }

        serde_json::from_str(&body).map_err(|e| {
            DashboardError::parse_with_source(provider, "无法解析凭证兑换响应", e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_response_parsing() {
        let fb: FacebookTokenResponse = serde_json::from_str(
            r#"{"access_token": "EAAB-long", "token_type": "bearer", "expires_in": 5183944}"#,
        )
        .unwrap();
        assert_eq!(fb.access_token, "EAAB-long");

        let google: GoogleTokenResponse = serde_json::from_str(
            r#"{"access_token": "ya29", "expires_in": 3599, "refresh_token": "1//0g", "scope": "https://www.googleapis.com/auth/adwords"}"#,
        )
        .unwrap();
        assert_eq!(google.refresh_token, "1//0g");
    }

    #[test]
    fn test_missing_refresh_token_is_rejected() {
        let result =
            serde_json::from_str::<GoogleTokenResponse>(r#"{"access_token": "ya29"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&HttpClientConfig::default());
        assert!(client.is_ok());
    }
}
