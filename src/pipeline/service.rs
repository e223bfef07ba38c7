//! # 汇总配置服务
//!
//! 外部调度器凭共享密钥拉取所有活跃项目的数据源配置。

use std::sync::Arc;

use entity::{Sources, projects};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait,
};
use tracing::{info, warn};

use super::fragment::PipelineDocument;
use super::projector::ConfigProjector;
use crate::error::{DashboardError, Result};
use crate::sources::Source;
use crate::utils::constant_time_eq;

/// 汇总配置服务
#[derive(Debug, Clone)]
pub struct PipelineService {
    db: Arc<DatabaseConnection>,
    projector: ConfigProjector,
    api_key: String,
}

impl PipelineService {
    #[must_use]
    pub const fn new(
        db: Arc<DatabaseConnection>,
        projector: ConfigProjector,
        api_key: String,
    ) -> Self {
        Self {
            db,
            projector,
            api_key,
        }
    }

    /// 校验共享密钥
    pub fn authorize(&self, provided_key: &str) -> Result<()> {
        if constant_time_eq(provided_key, &self.api_key) {
            Ok(())
        } else {
            Err(DashboardError::forbidden("Forbidden"))
        }
    }

    /// 生成汇总配置文档
    ///
    /// 只包含活跃项目的数据源；存储内容无法解析的数据源会被跳过并记录告警。
    pub async fn aggregate(&self, provided_key: &str) -> Result<PipelineDocument> {
        self.authorize(provided_key)?;

        let models = Sources::find()
            .join(JoinType::InnerJoin, entity::sources::Relation::Project.def())
            .filter(projects::Column::Active.eq(true))
            .order_by_asc(entity::sources::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("查询活跃数据源失败", e))?;

        let mut document = PipelineDocument::default();
        for model in models {
            let source_id = model.id.clone();
            let source = match Source::try_from(model) {
                Ok(source) => source,
                Err(e) => {
                    warn!(source_id = %source_id, error = %e, "skipping unreadable source");
                    continue;
                }
            };
            if let Some((key, fragment)) = self.projector.project(&source) {
                document.sources.insert(key, fragment);
            }
        }

        info!(fragments = document.sources.len(), "pipeline configuration generated");
        Ok(document)
    }
}
