use crate::ids::{GroupId, TenantId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Selects which variant table holds the group's membership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum GroupKind {
    #[sea_orm(string_value = "batch")]
    Batch,
    #[sea_orm(string_value = "department")]
    Department,
    #[sea_orm(string_value = "custom")]
    Custom,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "group")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: GroupId,
    pub tenant_id: TenantId,
    pub name: String,
    pub kind: GroupKind,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
