//! # 来电记录实体定义
//!
//! Call Picker 推送的来电数据，按归属项目保存原始载荷。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 来电记录实体
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "call_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub project_id: String,
    pub cp_number: String,
    pub payload: Json,
    pub received_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Project,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
