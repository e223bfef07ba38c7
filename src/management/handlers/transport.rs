//! # 来电接入处理器

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use super::parse_body;
use crate::error::Result;
use crate::management::{response, server::AppState};
use crate::transport::CallRecord;

/// 接收 Call Picker 推送的来电记录
pub async fn receive_call(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CallRecord>, JsonRejection>,
) -> Response {
    let result: Result<String> = async {
        let record = parse_body(payload)?;
        record.validate()?;
        state.transport.receive(record).await
    }
    .await;

    match result {
        Ok(_) => Json(json!({ "status": "ok" })).into_response(),
        Err(err) => response::app_error(err),
    }
}
