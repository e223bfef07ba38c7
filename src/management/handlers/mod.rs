//! # 管理API处理器

pub mod oauth;
pub mod pipeline;
pub mod sources;
pub mod system;
pub mod transport;

use axum::Json;
use axum::extract::rejection::JsonRejection;

use crate::error::{DashboardError, Result};

/// 解析请求体，格式错误统一转换为参数错误
pub fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| DashboardError::validation(rejection.body_text(), None))
}
