//! # 授权跳转地址

use url::Url;

use crate::config::GoogleOAuthConfig;
use crate::error::{DashboardError, Result};

/// 构建 Google 授权同意页地址
///
/// `state` 参数为 `project_id + 令牌`，跳转回来时无需服务端会话即可携带项目身份。
pub fn google_authorization_url(
    config: &GoogleOAuthConfig,
    project_id: &str,
    state_token: &str,
) -> Result<String> {
    let state = format!("{project_id}{state_token}");
    let url = Url::parse_with_params(
        &config.authorize_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("response_type", "code"),
            ("scope", config.scope.as_str()),
            ("access_type", "offline"),
            ("prompt", "consent"),
            ("state", state.as_str()),
        ],
    )
    .map_err(|e| DashboardError::config_with_source("无效的Google授权地址", e))?;

    Ok(url.into())
}
