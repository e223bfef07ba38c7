//! # Google Ads 授权处理器

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, State};
use axum::response::Response;
use serde::Serialize;

use super::parse_body;
use crate::error::Result;
use crate::management::middleware::ProjectContext;
use crate::management::{response, server::AppState};
use crate::sources::{GoogleAuthorizeRequest, GoogleCallbackRequest, Source};

#[derive(Debug, Serialize)]
struct AuthorizeResponse {
    url: String,
}

/// 签发授权状态并返回 Google 授权地址
pub async fn authorize_google(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    payload: std::result::Result<Json<GoogleAuthorizeRequest>, JsonRejection>,
) -> Response {
    let result: Result<String> = async {
        let request = parse_body(payload)?;
        request.validate()?;
        state
            .sources
            .authorize_google(&project.project_id, request)
            .await
    }
    .await;

    match result {
        Ok(url) => response::success(AuthorizeResponse { url }),
        Err(err) => response::app_error(err),
    }
}

/// 授权回调：兑换授权码并创建 Google Ads 数据源
pub async fn complete_google(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    payload: std::result::Result<Json<GoogleCallbackRequest>, JsonRejection>,
) -> Response {
    let result: Result<Source> = async {
        let request = parse_body(payload)?;
        request.validate()?;
        state
            .sources
            .complete_google(&project.project_id, request)
            .await
    }
    .await;

    match result {
        Ok(source) => response::success_with_message(source, "数据源创建成功"),
        Err(err) => response::app_error(err),
    }
}
