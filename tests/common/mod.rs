//! 集成测试公共辅助函数

#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use dashboard_api::AppConfig;
use entity::projects;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};

pub const JWT_SECRET: &str = "integration-secret";
pub const PIPELINE_KEY: &str = "pipeline-key";

pub async fn setup_test_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect test db");
    Migrator::up(&db, None).await.expect("run migrations");
    Arc::new(db)
}

pub async fn insert_project(db: &DatabaseConnection, id: &str, active: bool) {
    projects::ActiveModel {
        id: Set(id.to_string()),
        name: Set(format!("Project {id}")),
        active: Set(active),
        created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .expect("insert project");
}

/// 第三方地址全部指向 mock 服务器的测试配置
pub fn test_config(mock_uri: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.auth.jwt_secret = JWT_SECRET.to_string();
    config.pipeline.api_key = PIPELINE_KEY.to_string();
    config.facebook.app_id = "fb-app".to_string();
    config.facebook.app_secret = "fb-secret".to_string();
    config.facebook.token_url = format!("{mock_uri}/oauth/access_token");
    config.google.client_id = "ga-client".to_string();
    config.google.client_secret = "ga-secret".to_string();
    config.google.redirect_uri = "https://dash.example.com/oauth/google".to_string();
    config.google.token_url = format!("{mock_uri}/token");
    config.transport.notify_url = String::new();
    config
}
