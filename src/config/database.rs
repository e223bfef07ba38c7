//! # 数据库配置

use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 数据库URL
    pub url: String,
    /// 最大连接数
    pub max_connections: u32,
    /// 连接超时时间（秒）
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./data/dashboard.db".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

impl DatabaseConfig {
    /// 确保数据库路径存在（仅对SQLite文件数据库）
    pub fn ensure_database_path(&self) -> Result<()> {
        if let Some(path) = self.sqlite_file_path() {
            let db_path = Path::new(path);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        DashboardError::config_with_source(
                            format!("无法创建数据库目录: {}", parent.display()),
                            e,
                        )
                    })?;
                    tracing::info!(dir = %parent.display(), "created database directory");
                }
            }
        }
        Ok(())
    }

    /// 检查是否为内存数据库
    #[must_use]
    pub fn is_memory_database(&self) -> bool {
        self.url.contains(":memory:")
    }

    /// 提取 SQLite 文件路径（去掉查询参数）
    #[must_use]
    pub fn sqlite_file_path(&self) -> Option<&str> {
        if self.is_memory_database() {
            return None;
        }
        let path = self.url.strip_prefix("sqlite://")?;
        Some(path.split('?').next().unwrap_or(path))
    }
}
