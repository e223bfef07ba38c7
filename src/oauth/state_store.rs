//! # OAuth 状态存储
//!
//! 授权跳转前签发的一次性关联记录。兑换时通过带条件的删除完成消费，
//! 并发兑换同一令牌时只有删除成功的一方胜出。

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime, Utc};
use entity::{GoogleOAuthStates, google_oauth_states};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::{debug, info, warn};

use crate::error::{DashboardError, Result};
use crate::utils::{STATE_TOKEN_LEN, generate_id};

/// 已兑换的状态记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateRecord {
    pub token: String,
    pub project_id: String,
    pub customer_id: String,
    pub manager_id: Option<String>,
    pub source_name: String,
    pub created_at: NaiveDateTime,
}

impl From<google_oauth_states::Model> for StateRecord {
    fn from(model: google_oauth_states::Model) -> Self {
        Self {
            token: model.id,
            project_id: model.project_id,
            customer_id: model.customer_id,
            manager_id: model.manager_id,
            source_name: model.source_name,
            created_at: model.created_at,
        }
    }
}

/// OAuth 状态存储
#[derive(Debug, Clone)]
pub struct OAuthStateStore {
    db: Arc<DatabaseConnection>,
    ttl: Duration,
}

impl OAuthStateStore {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>, ttl: Duration) -> Self {
        Self { db, ttl }
    }

    /// 签发新的 5 位状态令牌
    pub async fn issue(
        &self,
        project_id: &str,
        customer_id: &str,
        manager_id: Option<&str>,
        source_name: &str,
    ) -> Result<String> {
        self.purge_expired().await;

        let token = generate_id(STATE_TOKEN_LEN);
        let active = google_oauth_states::ActiveModel {
            id: Set(token.clone()),
            project_id: Set(project_id.to_string()),
            customer_id: Set(customer_id.to_string()),
            manager_id: Set(manager_id.map(ToString::to_string)),
            source_name: Set(source_name.to_string()),
            created_at: Set(Utc::now().naive_utc()),
        };

        active
            .insert(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("保存授权状态失败", e))?;

        debug!(project_id = %project_id, "oauth state issued");
        Ok(token)
    }

    /// 消费并删除状态令牌
    ///
    /// `state` 可以是裸令牌，也可以是跳转参数中携带的 `project_id + 令牌`。
    /// 未知、已消费、已过期或属于其他项目的令牌都返回 `NotFound`。
    pub async fn consume_and_delete(&self, project_id: &str, state: &str) -> Result<StateRecord> {
        let token = Self::normalize_token(project_id, state);

        let model = GoogleOAuthStates::find_by_id(token.to_string())
            .filter(google_oauth_states::Column::ProjectId.eq(project_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| DashboardError::persistence_with_source("查询授权状态失败", e))?
            .ok_or_else(|| crate::not_found!("oauth_state", token))?;

        // 删除失败时无法确认本次是唯一消费者，不能放行
        let deleted = GoogleOAuthStates::delete_many()
            .filter(google_oauth_states::Column::Id.eq(token))
            .filter(google_oauth_states::Column::ProjectId.eq(project_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| {
                warn!(project_id = %project_id, error = %e, "failed to delete consumed oauth state");
                DashboardError::persistence_with_source("删除授权状态失败", e)
            })?;

        if deleted.rows_affected == 0 {
            debug!(project_id = %project_id, "oauth state consumed concurrently");
            return Err(crate::not_found!("oauth_state", token));
        }

        if model.is_expired(self.ttl) {
            info!(project_id = %project_id, "expired oauth state rejected");
            return Err(crate::not_found!("oauth_state", token));
        }

        Ok(StateRecord::from(model))
    }

    fn normalize_token<'a>(project_id: &str, state: &'a str) -> &'a str {
        match state.strip_prefix(project_id) {
            Some(rest) if !project_id.is_empty() && rest.len() == STATE_TOKEN_LEN => rest,
            _ => state,
        }
    }

    async fn purge_expired(&self) {
        let cutoff = Utc::now().naive_utc() - self.ttl;
        match GoogleOAuthStates::delete_many()
            .filter(google_oauth_states::Column::CreatedAt.lt(cutoff))
            .exec(self.db.as_ref())
            .await
        {
            Ok(result) if result.rows_affected > 0 => {
                debug!(purged = result.rows_affected, "expired oauth states purged");
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "failed to purge expired oauth states"),
        }
    }
}
