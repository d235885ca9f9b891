//! Role to permission links.
//!
//! A permission named "all" (any casing) grants everything, so a role that
//! asks for it is linked to that permission alone.

use std::collections::{HashMap, HashSet};

use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing::{instrument, warn};

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{require_text, CoreError, CoreResult},
    ids::{PermissionId, RoleId},
    service::roles::find_role,
};

/// Links `role_id` to the requested permissions, collapsing to a single link
/// when an "all" permission is among them. Returns the linked permissions.
pub async fn assign<C: ConnectionTrait>(
    conn: &C,
    role_id: RoleId,
    permission_ids: &[PermissionId],
) -> CoreResult<Vec<PermissionModel>> {
    let mut seen = HashSet::new();
    let requested: Vec<PermissionId> = permission_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let mut loaded: HashMap<PermissionId, PermissionModel> = Permission::find()
        .filter(PermissionColumn::Id.is_in(requested.iter().copied()))
        .all(conn)
        .await?
        .into_iter()
        .map(|permission| (permission.id, permission))
        .collect();

    let mut resolved = Vec::with_capacity(requested.len());
    for id in &requested {
        let permission = loaded
            .remove(id)
            .ok_or(CoreError::not_found("permission"))?;
        resolved.push(permission);
    }

    let all_like = resolved
        .iter()
        .filter(|permission| permission.grants_everything())
        .count();
    if all_like > 1 {
        warn!(
            role = %role_id,
            candidates = all_like,
            "several all-granting permissions requested, linking the first"
        );
    }

    let first_all = resolved
        .iter()
        .position(|permission| permission.grants_everything());
    let linked = match first_all {
        Some(index) => vec![resolved.swap_remove(index)],
        None => resolved,
    };

    RolePermission::insert_many(linked.iter().map(|permission| RolePermissionActiveModel {
        role_id: Set(role_id),
        permission_id: Set(permission.id),
    }))
    .exec_without_returning(conn)
    .await?;

    Ok(linked)
}

/// Replaces every link of `role_id` with a fresh [`assign`].
pub async fn reassign<C: ConnectionTrait>(
    conn: &C,
    role_id: RoleId,
    permission_ids: &[PermissionId],
) -> CoreResult<Vec<PermissionModel>> {
    RolePermission::delete_many()
        .filter(RolePermissionColumn::RoleId.eq(role_id))
        .exec(conn)
        .await?;

    assign(conn, role_id, permission_ids).await
}

pub(crate) async fn linked_permissions<C: ConnectionTrait>(
    conn: &C,
    role_id: RoleId,
) -> CoreResult<Vec<PermissionModel>> {
    let ids: Vec<PermissionId> = RolePermission::find()
        .select_only()
        .column(RolePermissionColumn::PermissionId)
        .filter(RolePermissionColumn::RoleId.eq(role_id))
        .into_tuple()
        .all(conn)
        .await?;

    if ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(Permission::find()
        .filter(PermissionColumn::Id.is_in(ids))
        .order_by_asc(PermissionColumn::Name)
        .all(conn)
        .await?)
}

#[derive(Clone)]
pub struct PermissionsService {
    db: DatabaseConnection,
}

impl PermissionsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Permission names are global and matched exactly.
    #[instrument(skip(self), err)]
    pub async fn create_permission(&self, name: String) -> CoreResult<PermissionModel> {
        require_text("permission name", &name)?;

        let existing = Permission::find()
            .filter(PermissionColumn::Name.eq(name.as_str()))
            .one(&self.db)
            .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(format!("permission {name} already exists")));
        }

        let permission = PermissionActiveModel {
            id: Set(PermissionId::new()),
            name: Set(name),
        }
        .insert(&self.db)
        .await?;

        if permission.grants_everything() {
            let all_like = Permission::find()
                .all(&self.db)
                .await?
                .into_iter()
                .filter(|other| other.grants_everything())
                .count();
            if all_like > 1 {
                warn!(
                    name = %permission.name,
                    all_like,
                    "more than one permission now grants everything"
                );
            }
        }

        Ok(permission)
    }

    pub async fn list_permissions(&self) -> CoreResult<Vec<PermissionModel>> {
        Ok(Permission::find()
            .order_by_asc(PermissionColumn::Name)
            .all(&self.db)
            .await?)
    }

    pub async fn permissions_for_role(
        &self,
        ctx: &RequestContext,
        role_id: RoleId,
    ) -> CoreResult<Vec<PermissionModel>> {
        let role = find_role(&self.db, ctx.tenant_id, role_id).await?;
        linked_permissions(&self.db, role.id).await
    }
}
