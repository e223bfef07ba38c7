//! # 管理服务器
//!
//! Axum HTTP服务器，承载数据源管理接口、汇总配置接口与来电接入

use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::app::AppContext;
use crate::config::ServerConfig;
use crate::error::{DashboardError, Result};
use crate::management::handlers::{system, transport};

/// 管理服务器应用状态
#[derive(Clone)]
pub struct AppState {
    context: Arc<AppContext>,
}

impl AppState {
    #[must_use]
    pub const fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }
}

impl Deref for AppState {
    type Target = AppContext;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// 管理服务器
pub struct ManagementServer {
    /// 监听配置
    config: ServerConfig,
    /// 路由器
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    #[must_use]
    pub fn new(context: Arc<AppContext>) -> Self {
        let config = context.config.server.clone();
        let router = Self::create_router(AppState::new(context), &config);
        Self { config, router }
    }

    /// 获取路由器副本，便于在测试中直接驱动
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// 创建路由器
    fn create_router(state: AppState, config: &ServerConfig) -> Router {
        let api_routes = super::routes::create_routes(state.clone());

        let transport_routes = Router::new()
            .route("/t/cp", post(transport::receive_call))
            .with_state(state);

        let app = Router::new()
            .nest(&config.api_prefix, api_routes)
            .merge(transport_routes)
            .route("/ping", get(system::ping_handler));

        let service_builder = ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(Self::cors_layer(&config.cors_origins))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.request_timeout_seconds,
            )));

        app.layer(service_builder)
    }

    /// 配置CORS，未配置或包含 "*" 时允许任意源
    fn cors_layer(origins: &[String]) -> CorsLayer {
        let cors_layer = CorsLayer::new()
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
                header::ORIGIN,
            ]);

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            return cors_layer.allow_origin(Any);
        }

        let parsed = origins
            .iter()
            .map(|origin| origin.parse::<HeaderValue>())
            .collect::<std::result::Result<Vec<_>, _>>();

        match parsed {
            Ok(parsed) => cors_layer.allow_origin(parsed),
            Err(e) => {
                warn!(error = %e, "invalid CORS origin configuration, falling back to allow any");
                cors_layer.allow_origin(Any)
            }
        }
    }

    /// 获取绑定地址
    pub fn bind_address(&self) -> Result<SocketAddr> {
        let ip = self.config.host.parse::<std::net::IpAddr>().map_err(|e| {
            DashboardError::config(format!(
                "Invalid server bind address '{}': {e}",
                self.config.host
            ))
        })?;
        Ok(SocketAddr::new(ip, self.config.port))
    }

    /// 启动服务器
    pub async fn serve(self) -> Result<()> {
        let addr = self.bind_address()?;
        info!(%addr, "starting dashboard api server");

        let listener = TcpListener::bind(&addr).await?;

        axum::serve(listener, self.router)
            .await
            .map_err(|e| DashboardError::internal_with_source("HTTP 服务异常退出", e))?;

        Ok(())
    }
}

