use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Whether a version row is a fresh release or a regulatory renewal of one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum VersionKind {
    #[sea_orm(string_value = "new_version")]
    NewVersion,
    #[sea_orm(string_value = "renewal")]
    Renewal,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "version")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub device_id: i32,
    pub version_number: String,
    pub kind: VersionKind,
    pub base_version_id: Option<i32>,
    pub release_date: Option<Date>,
    #[sea_orm(column_type = "Text")]
    pub changes: String,
    pub status: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::device::Entity",
        from = "Column::DeviceId",
        to = "super::device::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Device,
    #[sea_orm(
        belongs_to = "Entity",
        from = "Column::BaseVersionId",
        to = "Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    BaseVersion,
    #[sea_orm(has_many = "super::license::Entity")]
    License,
}

impl Related<super::device::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Device.def()
    }
}

impl Related<super::license::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::License.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
