use crate::ids::PermissionId;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const ALL_PERMISSION: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "permission")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: PermissionId,
    #[sea_orm(unique)]
    pub name: String,
}

impl Model {
    /// Matched by name, ignoring case, so "all" and "ALL" both qualify.
    pub fn grants_everything(&self) -> bool {
        self.name.eq_ignore_ascii_case(ALL_PERMISSION)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
