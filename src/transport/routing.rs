//! # 来电路由
//!
//! 根据路由号码查找拥有该号码的活跃项目。

use std::sync::Arc;

use async_trait::async_trait;
use entity::{Sources, projects, sources};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use tracing::warn;

use crate::error::{DashboardError, Result};
use crate::sources::{CallPickerConfig, SourceKind};

/// 路由查询接口
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CallRouting: Send + Sync {
    /// 返回拥有该号码的项目 ID；没有活跃项目拥有时返回 `None`
    async fn resolve_project(&self, cp_number: &str) -> Result<Option<String>>;
}

/// 基于数据源表的路由查询
#[derive(Debug, Clone)]
pub struct DatabaseCallRouting {
    db: Arc<DatabaseConnection>,
}

impl DatabaseCallRouting {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CallRouting for DatabaseCallRouting {
    async fn resolve_project(&self, cp_number: &str) -> Result<Option<String>> {
        let candidates = Sources::find()
            .join(JoinType::InnerJoin, sources::Relation::Project.def())
            .filter(projects::Column::Active.eq(true))
            .filter(sources::Column::SourceType.eq(SourceKind::CallPicker.as_str()))
            .order_by_asc(sources::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("查询来电路由失败", e))?;

        for source in candidates {
            match serde_json::from_value::<CallPickerConfig>(source.config) {
                Ok(config) if config.owns_number(cp_number) => {
                    return Ok(Some(source.project_id));
                }
                Ok(_) => {}
                Err(e) => warn!(source_id = %source.id, error = %e, "unreadable call picker config"),
            }
        }

        Ok(None)
    }
}
