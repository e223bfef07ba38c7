//! # Dashboard API 主程序
//!
//! 加载配置、连接数据库并执行迁移，随后启动 HTTP 服务

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dashboard_api::{
    app::AppContext,
    config::ConfigManager,
    database::{check_database_status, init_database, run_migrations},
    logging,
    management::ManagementServer,
};
use tracing::{error, info};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "dashboard-api", version, about = "Dashboard data source backend")]
struct Args {
    /// 配置文件路径，缺省时按 DASHBOARD_CONFIG_PATH / RUST_ENV 查找
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// 日志级别（RUST_LOG 存在时以其为准）
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    logging::init_logging(Some(&args.log_level));

    if let Err(e) = run(args).await {
        error!(error = ?e, "服务启动失败");
        return Err(e);
    }

    info!("服务正常关闭");
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let manager = match args.config {
        Some(path) => ConfigManager::from_file(path),
        None => ConfigManager::new(),
    }
    .map_err(|e| anyhow::anyhow!("配置管理器初始化失败: {e}"))?;
    let config = manager.config();

    let db = init_database(&config.database)
        .await
        .map_err(|e| anyhow::anyhow!("数据库连接失败: {e}"))?;

    // 首先运行数据库迁移，确保表结构存在
    run_migrations(&db)
        .await
        .map_err(|e| anyhow::anyhow!("数据库迁移失败: {e}"))?;
    check_database_status(&db)
        .await
        .map_err(|e| anyhow::anyhow!("数据库状态检查失败: {e}"))?;

    let context = AppContext::build(config, Arc::new(db))?;
    let server = ManagementServer::new(Arc::new(context));

    server.serve().await?;
    Ok(())
}
