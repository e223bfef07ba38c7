//! # 来电记录

use serde::{Deserialize, Serialize};

use crate::ensure_validation;
use crate::error::Result;

/// Call Picker 推送的来电记录
///
/// 除路由号码外的字段原样保留，持久化与通知时一并输出。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallRecord {
    #[serde(rename = "cpNumber")]
    pub cp_number: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CallRecord {
    pub fn validate(&self) -> Result<()> {
        ensure_validation!(
            !self.cp_number.trim().is_empty(),
            "cpNumber",
            "路由号码不能为空"
        );
        Ok(())
    }
}
