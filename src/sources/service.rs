//! # 数据源创建服务
//!
//! 按类型编排凭证获取与持久化：
//! - Facebook：兑换长期令牌后立即创建
//! - Google Ads：签发状态 -> 用户授权 -> 兑换授权码 -> 消费状态 -> 创建
//! - Call Picker：无需授权，直接保存号码列表

use serde::{Deserialize, Serialize};
use tracing::info;

use super::registry::SourceRegistry;
use super::types::{
    CallPickerConfig, FacebookConfig, GoogleAdsConfig, PhoneNumber, Source, SourceConfig,
};
use crate::config::GoogleOAuthConfig;
use crate::ensure_validation;
use crate::error::Result;
use crate::oauth::{CredentialExchangeClient, OAuthStateStore, google_authorization_url};

/// 创建 Facebook 数据源请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacebookSource {
    pub account_id: String,
    /// 前端登录得到的短期用户令牌
    pub access_token: String,
    pub source_name: String,
}

impl CreateFacebookSource {
    pub fn validate(&self) -> Result<()> {
        ensure_validation!(!self.account_id.trim().is_empty(), "accountId", "账户ID不能为空");
        ensure_validation!(
            !self.access_token.trim().is_empty(),
            "accessToken",
            "访问令牌不能为空"
        );
        ensure_validation!(
            !self.source_name.trim().is_empty(),
            "sourceName",
            "数据源名称不能为空"
        );
        Ok(())
    }
}

/// 发起 Google 授权请求
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthorizeRequest {
    pub customer_id: String,
    #[serde(default)]
    pub manager_id: Option<String>,
    pub source_name: String,
}

impl GoogleAuthorizeRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_validation!(
            !self.customer_id.trim().is_empty(),
            "customerId",
            "客户ID不能为空"
        );
        ensure_validation!(
            !self.source_name.trim().is_empty(),
            "sourceName",
            "数据源名称不能为空"
        );
        Ok(())
    }
}

/// Google 授权回调兑换请求
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleCallbackRequest {
    pub code: String,
    pub state: String,
}

impl GoogleCallbackRequest {
    pub fn validate(&self) -> Result<()> {
        ensure_validation!(!self.code.trim().is_empty(), "code", "授权码不能为空");
        ensure_validation!(!self.state.trim().is_empty(), "state", "状态令牌不能为空");
        Ok(())
    }
}

/// 创建 Call Picker 数据源请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCallPickerSource {
    pub source_name: String,
    pub numbers: Vec<PhoneNumber>,
}

impl CreateCallPickerSource {
    pub fn validate(&self) -> Result<()> {
        ensure_validation!(
            !self.source_name.trim().is_empty(),
            "source_name",
            "数据源名称不能为空"
        );
        ensure_validation!(
            self.numbers.iter().all(|n| !n.number.trim().is_empty()),
            "numbers",
            "号码不能为空"
        );
        Ok(())
    }
}

/// Call Picker 创建结果，附带第三方系统需配置的回调地址
#[derive(Debug, Clone, Serialize)]
pub struct CallPickerCreated {
    pub source: Source,
    pub url: String,
}

/// 数据源创建服务
#[derive(Debug, Clone)]
pub struct SourceService {
    registry: SourceRegistry,
    states: OAuthStateStore,
    exchange: CredentialExchangeClient,
    google: GoogleOAuthConfig,
    routing_url: String,
}

impl SourceService {
    #[must_use]
    pub const fn new(
        registry: SourceRegistry,
        states: OAuthStateStore,
        exchange: CredentialExchangeClient,
        google: GoogleOAuthConfig,
        routing_url: String,
    ) -> Self {
        Self {
            registry,
            states,
            exchange,
            google,
            routing_url,
        }
    }

    #[must_use]
    pub const fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// 兑换长期令牌并创建 Facebook 数据源
    pub async fn create_facebook(
        &self,
        project_id: &str,
        request: CreateFacebookSource,
    ) -> Result<Source> {
        let long_lived = self
            .exchange
            .exchange_facebook_token(&request.access_token)
            .await?;

        let config = SourceConfig::Facebook(FacebookConfig {
            account_id: request.account_id,
            access_token: long_lived,
        });
        self.registry
            .create(project_id, &request.source_name, config)
            .await
    }

    /// 签发状态并返回 Google 授权跳转地址
    pub async fn authorize_google(
        &self,
        project_id: &str,
        request: GoogleAuthorizeRequest,
    ) -> Result<String> {
        let manager_id = request
            .manager_id
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty());

        let token = self
            .states
            .issue(
                project_id,
                &request.customer_id,
                manager_id,
                &request.source_name,
            )
            .await?;

        let url = google_authorization_url(&self.google, project_id, &token)?;
        info!(project_id = %project_id, "google authorization url issued");
        Ok(url)
    }

    /// 兑换授权码、消费状态并创建 Google Ads 数据源
    ///
    /// 数据源名称取自签发状态时的记录，而非回调请求。
    pub async fn complete_google(
        &self,
        project_id: &str,
        request: GoogleCallbackRequest,
    ) -> Result<Source> {
        let refresh_token = self.exchange.exchange_google_code(&request.code).await?;

        let state = self
            .states
            .consume_and_delete(project_id, &request.state)
            .await?;

        let config = SourceConfig::GoogleAds(GoogleAdsConfig {
            refresh_token,
            customer_id: state.customer_id,
            manager_customer_id: state.manager_id,
        });
        self.registry
            .create(project_id, &state.source_name, config)
            .await
    }

    /// 创建 Call Picker 数据源
    pub async fn create_callpicker(
        &self,
        project_id: &str,
        request: CreateCallPickerSource,
    ) -> Result<CallPickerCreated> {
        let config = SourceConfig::CallPicker(CallPickerConfig {
            numbers: request.numbers,
        });
        let source = self
            .registry
            .create(project_id, &request.source_name, config)
            .await?;

        Ok(CallPickerCreated {
            source,
            url: self.routing_url.clone(),
        })
    }
}
