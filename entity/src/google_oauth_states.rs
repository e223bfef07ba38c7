//! # Google OAuth 状态实体定义
//!
//! 一次性的授权关联记录，在兑换授权码时被删除。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Google OAuth 状态实体
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "google_oauth_states")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: String,
    pub customer_id: String,
    pub manager_id: Option<String>,
    pub source_name: String,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 检查状态记录是否已超过有效期
    pub fn is_expired(&self, ttl: chrono::Duration) -> bool {
        chrono::Utc::now().naive_utc() > self.created_at + ttl
    }
}
