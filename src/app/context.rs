//! 应用上下文（DI 容器）
//!
//! 统一持有跨模块共享的服务实例，便于在测试中注入替身实现。

use std::sync::Arc;

use chrono::Duration;
use sea_orm::DatabaseConnection;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::management::middleware::ProjectTokenManager;
use crate::oauth::{CredentialExchangeClient, OAuthStateStore, build_http_client};
use crate::pipeline::{ConfigProjector, PipelineService};
use crate::sources::{SourceRegistry, SourceService};
use crate::transport::{
    CallNotifier, DatabaseCallRouting, NoopNotifier, TransportReceiver, WebhookNotifier,
};

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub db: Arc<DatabaseConnection>,
    pub sources: SourceService,
    pub pipeline: PipelineService,
    pub transport: TransportReceiver,
    pub tokens: Arc<ProjectTokenManager>,
}

impl AppContext {
    /// 按配置装配全部服务
    ///
    /// 需要在 tokio 运行时内调用（webhook 投递任务在此启动）。
    pub fn build(config: Arc<AppConfig>, db: Arc<DatabaseConnection>) -> Result<Self> {
        let http_client = build_http_client(&config.http)?;

        let notifier: Arc<dyn CallNotifier> = if config.transport.notify_url.trim().is_empty() {
            Arc::new(NoopNotifier)
        } else {
            Arc::new(WebhookNotifier::spawn(
                http_client.clone(),
                config.transport.notify_url.clone(),
                config.transport.notify_queue_capacity,
                config.transport.notify_workers,
            ))
        };

        let context = Self::with_notifier(config, db, http_client, notifier);
        info!("application context ready");
        Ok(context)
    }

    /// 使用指定的通知器装配服务
    pub fn with_notifier(
        config: Arc<AppConfig>,
        db: Arc<DatabaseConnection>,
        http_client: reqwest::Client,
        notifier: Arc<dyn CallNotifier>,
    ) -> Self {
        let registry = SourceRegistry::new(Arc::clone(&db));
        let states = OAuthStateStore::new(
            Arc::clone(&db),
            Duration::minutes(config.google.state_ttl_minutes),
        );
        let exchange = CredentialExchangeClient::new(
            http_client,
            config.facebook.clone(),
            config.google.clone(),
        );
        let sources = SourceService::new(
            registry,
            states,
            exchange,
            config.google.clone(),
            config.transport.routing_url.clone(),
        );

        let pipeline = PipelineService::new(
            Arc::clone(&db),
            ConfigProjector::new(&config.google),
            config.pipeline.api_key.clone(),
        );

        let transport = TransportReceiver::new(
            Arc::clone(&db),
            Arc::new(DatabaseCallRouting::new(Arc::clone(&db))),
            notifier,
        );

        let tokens = Arc::new(ProjectTokenManager::new(&config.auth.jwt_secret));

        Self {
            config,
            db,
            sources,
            pipeline,
            transport,
            tokens,
        }
    }
}
