//! # 日志配置模块
//!
//! 初始化 tracing 订阅器，并提供敏感值脱敏辅助函数

use std::env;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// 构建默认过滤规则：数据库查询日志默认关闭
#[must_use]
pub fn default_filter(level: &str) -> String {
    format!("{level},dashboard_api=debug,sqlx::query=off,sea_orm::query=warn,sqlx=warn")
}

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先使用，否则按传入级别生成默认过滤规则。
pub fn init_logging(log_level: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| default_filter(level));

    let result = tracing_subscriber::registry()
        .with(EnvFilter::try_new(&log_filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!(filter = %log_filter, "logging initialized");
    }
}

/// 对令牌、密钥等敏感值脱敏，仅保留前4位和长度
#[must_use]
pub fn mask_secret(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    if value.chars().count() <= 4 {
        format!("***(len={})", value.chars().count())
    } else {
        format!("{prefix}***(len={})", value.chars().count())
    }
}
