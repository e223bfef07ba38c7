//! # 路由配置
//!
//! 定义所有API路由和路由组织

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};

use crate::management::handlers::{oauth, pipeline, sources};
use crate::management::middleware::project_auth;
use crate::management::server::AppState;

/// 创建所有API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 数据源路由，需要项目令牌
        .nest("/sources", source_routes(state.clone()))
        // 调度器拉取配置，凭路径中的密钥访问
        .nest("/pipeline", pipeline_routes())
        .with_state(state)
}

/// 数据源路由
fn source_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(sources::list_sources))
        .route(
            "/{id}",
            get(sources::get_source).delete(sources::delete_source),
        )
        .route("/facebook", post(sources::create_facebook_source))
        .route("/google/authorize", post(oauth::authorize_google))
        .route("/google", post(oauth::complete_google))
        .route("/callpicker", post(sources::create_callpicker_source))
        .route_layer(from_fn_with_state(state, project_auth))
}

/// 汇总配置路由
fn pipeline_routes() -> Router<AppState> {
    Router::new().route("/{key}/sources", get(pipeline::get_pipeline_sources))
}
