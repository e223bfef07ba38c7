//! # 数据库模块
//!
//! 数据库连接和迁移管理

use crate::config::DatabaseConfig;
use crate::error::{DashboardError, Result};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 初始化数据库连接
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection> {
    let display_url: String = config.url.chars().take(50).collect();
    info!("正在连接数据库: {display_url}");

    // 对于SQLite文件数据库，确保目录和文件存在
    config.ensure_database_path()?;
    if let Some(path) = config.sqlite_file_path() {
        let db_file_path = Path::new(path);
        if db_file_path.exists() {
            debug!("数据库文件已存在: {}", db_file_path.display());
        } else {
            std::fs::File::create(db_file_path).map_err(|e| {
                DashboardError::config_with_source(
                    format!("无法创建数据库文件: {}", db_file_path.display()),
                    e,
                )
            })?;
            info!("数据库文件创建成功: {}", db_file_path.display());
        }
    }

    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout))
        .sqlx_logging(false);

    let db = Database::connect(options)
        .await
        .map_err(|e| DashboardError::persistence_with_source("数据库连接失败", e))?;

    info!("数据库连接成功");
    Ok(db)
}

/// 运行数据库迁移
pub async fn run_migrations(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    info!("开始运行数据库迁移...");

    match ::migration::Migrator::up(db, None).await {
        Ok(()) => {
            info!("数据库迁移完成");
            Ok(())
        }
        Err(e) => {
            error!("数据库迁移失败: {}", e);
            Err(e)
        }
    }
}

/// 检查数据库状态
pub async fn check_database_status(db: &DatabaseConnection) -> std::result::Result<(), DbErr> {
    let pending = ::migration::Migrator::get_pending_migrations(db).await?;

    if pending.is_empty() {
        info!("所有迁移都已应用");
    } else {
        warn!("有 {} 个待应用的迁移", pending.len());
    }

    Ok(())
}
