//! # 来电接收

use std::sync::Arc;

use chrono::Utc;
use entity::call_records;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;

use super::notifier::CallNotifier;
use super::record::CallRecord;
use super::routing::CallRouting;
use crate::error::{DashboardError, Result};

/// 来电接收器
#[derive(Clone)]
pub struct TransportReceiver {
    db: Arc<DatabaseConnection>,
    routing: Arc<dyn CallRouting>,
    notifier: Arc<dyn CallNotifier>,
}

impl std::fmt::Debug for TransportReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransportReceiver").finish_non_exhaustive()
    }
}

impl TransportReceiver {
    #[must_use]
    pub fn new(
        db: Arc<DatabaseConnection>,
        routing: Arc<dyn CallRouting>,
        notifier: Arc<dyn CallNotifier>,
    ) -> Self {
        Self {
            db,
            routing,
            notifier,
        }
    }

    /// 接收来电记录，返回归属项目 ID
    ///
    /// 通知先于路由发出，无论后续是否成功都会尝试。
    pub async fn receive(&self, record: CallRecord) -> Result<String> {
        self.notifier.notify(&record);

        let project_id = self
            .routing
            .resolve_project(&record.cp_number)
            .await?
            .ok_or_else(|| {
                DashboardError::routing(format!(
                    "号码 {} 不属于任何活跃项目或未接入 Call Picker",
                    record.cp_number
                ))
            })?;

        let payload = serde_json::to_value(&record)?;
        let active = call_records::ActiveModel {
            project_id: Set(project_id.clone()),
            cp_number: Set(record.cp_number.clone()),
            payload: Set(payload),
            received_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("保存来电记录失败", e))?;

        info!(project_id = %project_id, "call record stored");
        Ok(project_id)
    }
}
