//! # 管道配置片段

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::CollectionSpec;

/// Facebook 凭证块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacebookCredentials {
    pub account_id: String,
    pub access_token: String,
}

/// Google Ads OAuth 认证块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleAuth {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
}

/// Google Ads 凭证块
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoogleAdsCredentials {
    pub customer_id: String,
    /// 未指定经理账户时为空字符串
    pub manager_customer_id: String,
    pub auth: GoogleAuth,
}

/// 片段凭证
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FragmentCredentials {
    Facebook(FacebookCredentials),
    GoogleAds(GoogleAdsCredentials),
}

/// 单个数据源投影出的管道配置片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigFragment {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub destinations: Vec<String>,
    pub config: FragmentCredentials,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<&'static str>,
    pub collections: &'static [CollectionSpec],
}

/// 汇总接口返回的完整文档，键有序以保证输出稳定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PipelineDocument {
    pub sources: BTreeMap<String, ConfigFragment>,
}

/// 项目的数据写入目标
#[must_use]
pub fn destination_for(project_id: &str) -> String {
    format!("postgres_{project_id}")
}
