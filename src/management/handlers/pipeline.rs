//! # 汇总配置处理器
//!
//! 调度器直接消费该接口，因此返回裸文档而非标准响应包装。

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::DashboardError;
use crate::management::{response, server::AppState};

/// 拉取全部活跃项目的采集配置
pub async fn get_pipeline_sources(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Response {
    match state.pipeline.aggregate(&key).await {
        Ok(document) => Json(document).into_response(),
        Err(DashboardError::Forbidden { .. }) => {
            tracing::warn!("pipeline config requested with invalid key");
            (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response()
        }
        Err(err) => response::app_error(err),
    }
}
