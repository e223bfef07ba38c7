//! # 数据源注册表
//!
//! 所有读写都以 `(id, project_id)` 作用域执行，数据源在所属项目之外不可见。

use std::sync::Arc;

use chrono::Utc;
use entity::{Sources, sources};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use super::types::{Source, SourceConfig};
use crate::error::{DashboardError, Result};
use crate::utils::{SOURCE_ID_LEN, generate_id};

/// 数据源注册表
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    db: Arc<DatabaseConnection>,
}

impl SourceRegistry {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 列出项目下的全部数据源
    pub async fn list(&self, project_id: &str) -> Result<Vec<Source>> {
        let models = Sources::find()
            .filter(sources::Column::ProjectId.eq(project_id))
            .order_by_asc(sources::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("查询数据源列表失败", e))?;

        models.into_iter().map(Source::try_from).collect()
    }

    /// 按 ID 查询项目内的数据源
    pub async fn get(&self, project_id: &str, id: &str) -> Result<Source> {
        let model = self.find_scoped(project_id, id).await?;
        Source::try_from(model)
    }

    /// 创建数据源，生成新的 10 位 ID
    pub async fn create(
        &self,
        project_id: &str,
        name: &str,
        config: SourceConfig,
    ) -> Result<Source> {
        let kind = config.kind();
        let active = sources::ActiveModel {
            id: Set(generate_id(SOURCE_ID_LEN)),
            source_type: Set(kind.as_str().to_string()),
            name: Set(name.to_string()),
            project_id: Set(project_id.to_string()),
            config: Set(config.to_json()?),
            created_at: Set(Utc::now().naive_utc()),
        };

        let model = active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("保存数据源失败", e))?;

        info!(
            project_id = %project_id,
            source_id = %model.id,
            source_type = %kind,
            "source created"
        );

        Ok(Source {
            id: model.id,
            name: model.name,
            project_id: model.project_id,
            config,
            created_at: model.created_at,
        })
    }

    /// 删除项目内的数据源
    pub async fn delete(&self, project_id: &str, id: &str) -> Result<()> {
        self.find_scoped(project_id, id).await?;

        // 条件删除，影响行数为 0 表示已被并发删除
        let result = Sources::delete_many()
            .filter(sources::Column::Id.eq(id))
            .filter(sources::Column::ProjectId.eq(project_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("删除数据源失败", e))?;

        if result.rows_affected == 0 {
            debug!(project_id = %project_id, source_id = %id, "source already deleted");
            return Err(crate::not_found!("source", id));
        }

        info!(project_id = %project_id, source_id = %id, "source deleted");
        Ok(())
    }

    async fn find_scoped(&self, project_id: &str, id: &str) -> Result<sources::Model> {
        let found = Sources::find_by_id(id.to_string())
            .filter(sources::Column::ProjectId.eq(project_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("查询数据源失败", e))?;

        found.ok_or_else(|| {
            debug!(project_id = %project_id, source_id = %id, "source not found in project");
            crate::not_found!("source", id)
        })
    }
}
