//! # 数据源管理处理器
//!
//! 列表、查询、删除以及 Facebook / Call Picker 数据源的创建

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::response::Response;
use tracing::info;

use super::parse_body;
use crate::error::Result;
use crate::management::middleware::ProjectContext;
use crate::management::{response, server::AppState};
use crate::sources::{CallPickerCreated, CreateCallPickerSource, CreateFacebookSource, Source};

/// 列出项目下的全部数据源
pub async fn list_sources(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
) -> Response {
    match state.sources.registry().list(&project.project_id).await {
        Ok(sources) => response::success(sources),
        Err(err) => response::app_error(err),
    }
}

/// 查询单个数据源
pub async fn get_source(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    Path(id): Path<String>,
) -> Response {
    match state.sources.registry().get(&project.project_id, &id).await {
        Ok(source) => response::success(source),
        Err(err) => response::app_error(err),
    }
}

/// 删除数据源
pub async fn delete_source(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    Path(id): Path<String>,
) -> Response {
    match state
        .sources
        .registry()
        .delete(&project.project_id, &id)
        .await
    {
        Ok(()) => response::success_without_data("数据源已删除"),
        Err(err) => response::app_error(err),
    }
}

/// 创建 Facebook 数据源
pub async fn create_facebook_source(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    payload: std::result::Result<Json<CreateFacebookSource>, JsonRejection>,
) -> Response {
    let result: Result<Source> = async {
        let request = parse_body(payload)?;
        request.validate()?;
        state
            .sources
            .create_facebook(&project.project_id, request)
            .await
    }
    .await;

    match result {
        Ok(source) => {
            info!(project_id = %project.project_id, source_id = %source.id, "facebook source created");
            response::success_with_message(source, "数据源创建成功")
        }
        Err(err) => response::app_error(err),
    }
}

/// 创建 Call Picker 数据源
pub async fn create_callpicker_source(
    State(state): State<AppState>,
    Extension(project): Extension<Arc<ProjectContext>>,
    payload: std::result::Result<Json<CreateCallPickerSource>, JsonRejection>,
) -> Response {
    let result: Result<CallPickerCreated> = async {
        let request = parse_body(payload)?;
        request.validate()?;
        state
            .sources
            .create_callpicker(&project.project_id, request)
            .await
    }
    .await;

    match result {
        Ok(created) => {
            info!(project_id = %project.project_id, source_id = %created.source.id, "call picker source created");
            response::success_with_message(created, "数据源创建成功")
        }
        Err(err) => response::app_error(err),
    }
}
