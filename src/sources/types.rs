//! # 数据源类型定义
//!
//! 数据源按类型携带各自的凭证结构，存储层的 `config` JSON 列在这里被解析为强类型。

use crate::error::{DashboardError, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 数据源类型标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceKind {
    #[serde(rename = "fb")]
    Facebook,
    #[serde(rename = "ga")]
    GoogleAds,
    #[serde(rename = "cp")]
    CallPicker,
}

impl SourceKind {
    /// 存储和配置键中使用的短标识
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Facebook => "fb",
            Self::GoogleAds => "ga",
            Self::CallPicker => "cp",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fb" => Ok(Self::Facebook),
            "ga" => Ok(Self::GoogleAds),
            "cp" => Ok(Self::CallPicker),
            other => Err(DashboardError::Parse {
                provider: "storage".to_string(),
                message: format!("未知的数据源类型: {other}"),
                source: None,
            }),
        }
    }
}

/// Facebook Marketing 凭证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacebookConfig {
    #[serde(rename = "accountId")]
    pub account_id: String,
    /// 兑换后的长期访问令牌
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

/// Google Ads 凭证
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleAdsConfig {
    pub refresh_token: String,
    pub customer_id: String,
    #[serde(default)]
    pub manager_customer_id: Option<String>,
}

/// 来电追踪号码
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneNumber {
    pub name: String,
    pub number: String,
}

/// Call Picker 配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallPickerConfig {
    pub numbers: Vec<PhoneNumber>,
}

impl CallPickerConfig {
    /// 是否包含指定路由号码
    #[must_use]
    pub fn owns_number(&self, number: &str) -> bool {
        self.numbers.iter().any(|n| n.number == number)
    }
}

/// 按类型区分的数据源配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum SourceConfig {
    #[serde(rename = "fb")]
    Facebook(FacebookConfig),
    #[serde(rename = "ga")]
    GoogleAds(GoogleAdsConfig),
    #[serde(rename = "cp")]
    CallPicker(CallPickerConfig),
}

impl SourceConfig {
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        match self {
            Self::Facebook(_) => SourceKind::Facebook,
            Self::GoogleAds(_) => SourceKind::GoogleAds,
            Self::CallPicker(_) => SourceKind::CallPicker,
        }
    }

    /// 序列化为存储层的 JSON 载荷（不含类型标签）
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let value = match self {
            Self::Facebook(c) => serde_json::to_value(c)?,
            Self::GoogleAds(c) => serde_json::to_value(c)?,
            Self::CallPicker(c) => serde_json::to_value(c)?,
        };
        Ok(value)
    }

    /// 根据类型标识解析存储层的 JSON 载荷
    pub fn from_json(kind: SourceKind, value: serde_json::Value) -> Result<Self> {
        let parsed = match kind {
            SourceKind::Facebook => serde_json::from_value(value).map(Self::Facebook),
            SourceKind::GoogleAds => serde_json::from_value(value).map(Self::GoogleAds),
            SourceKind::CallPicker => serde_json::from_value(value).map(Self::CallPicker),
        };
        parsed.map_err(|e| {
            DashboardError::parse_with_source(
                "storage",
                format!("数据源配置与类型 {kind} 不匹配"),
                e,
            )
        })
    }
}

/// 数据源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub name: String,
    #[serde(rename = "projectId")]
    pub project_id: String,
    #[serde(flatten)]
    pub config: SourceConfig,
    pub created_at: NaiveDateTime,
}

impl Source {
    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        self.config.kind()
    }
}

impl TryFrom<entity::sources::Model> for Source {
    type Error = DashboardError;

    fn try_from(model: entity::sources::Model) -> Result<Self> {
        let kind: SourceKind = model.source_type.parse()?;
        let config = SourceConfig::from_json(kind, model.config)?;
        Ok(Self {
            id: model.id,
            name: model.name,
            project_id: model.project_id,
            config,
            created_at: model.created_at,
        })
    }
}
