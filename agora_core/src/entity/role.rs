use crate::ids::{RoleId, TenantId};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const SUPER_ADMIN: &str = "Super Admin";
pub const DISABLED: &str = "Disabled";

/// Roles that can never be edited or deleted.
pub const PROTECTED_ROLE_NAMES: [&str; 2] = [SUPER_ADMIN, DISABLED];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "role")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: RoleId,
    pub tenant_id: TenantId,
    pub name: String,
}

impl Model {
    pub fn is_protected(&self) -> bool {
        is_protected_name(&self.name)
    }
}

/// Matches ignoring ASCII case and surrounding whitespace, so "disabled"
/// cannot sit beside "Disabled".
pub fn is_protected_name(name: &str) -> bool {
    let name = name.trim();
    PROTECTED_ROLE_NAMES
        .iter()
        .any(|protected| protected.eq_ignore_ascii_case(name))
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_permission::Entity")]
    RolePermission,
}

impl Related<super::role_permission::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePermission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
