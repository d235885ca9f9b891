use sea_orm::{sea_query::Expr, ConnectionTrait, DatabaseConnection, TransactionTrait, Value};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    context::RequestContext,
    entity::{
        permission::ALL_PERMISSION,
        prelude::*,
        role::{is_protected_name, DISABLED, SUPER_ADMIN},
    },
    error::{require_text, CoreError, CoreResult},
    ids::{AdministrationId, PermissionId, RoleId, TenantId, UserId},
    service::{
        groups::find_user,
        permissions::{assign, reassign},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteOutcome {
    /// The role is gone; `reassigned` administrators moved to "Disabled".
    Deleted { reassigned: u64 },
    /// Protected roles are never deleted.
    Refused,
}

/// The two roles every tenant carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedRoles {
    pub super_admin: RoleModel,
    pub disabled: RoleModel,
}

pub(crate) async fn find_role<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    role_id: RoleId,
) -> CoreResult<RoleModel> {
    Role::find_by_id(role_id)
        .filter(RoleColumn::TenantId.eq(tenant_id))
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("role"))
}

async fn find_role_by_name<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    name: &str,
) -> CoreResult<Option<RoleModel>> {
    Ok(Role::find()
        .filter(RoleColumn::TenantId.eq(tenant_id))
        .filter(RoleColumn::Name.eq(name))
        .one(conn)
        .await?)
}

async fn insert_role<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    name: &str,
) -> CoreResult<RoleModel> {
    let role = RoleActiveModel {
        id: Set(RoleId::new()),
        tenant_id: Set(tenant_id),
        name: Set(name.to_string()),
    };

    Ok(role.insert(conn).await?)
}

#[derive(Clone)]
pub struct RolesService {
    db: DatabaseConnection,
}

impl RolesService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, ctx, permission_ids), fields(tenant = %ctx.tenant_id), err)]
    pub async fn create_role(
        &self,
        ctx: &RequestContext,
        name: String,
        permission_ids: Vec<PermissionId>,
    ) -> CoreResult<(RoleModel, Vec<PermissionModel>)> {
        require_text("role name", &name)?;
        if is_protected_name(&name) {
            return Err(CoreError::Conflict(format!("role name {name} is reserved")));
        }

        let txn = self.db.begin().await?;

        if find_role_by_name(&txn, ctx.tenant_id, &name).await?.is_some() {
            return Err(CoreError::Conflict(format!("role {name} already exists")));
        }

        let role = insert_role(&txn, ctx.tenant_id, &name).await?;
        let permissions = assign(&txn, role.id, &permission_ids).await?;

        txn.commit().await?;
        Ok((role, permissions))
    }

    /// Renames a role and replaces its permission set.
    #[instrument(skip(self, ctx, permission_ids), fields(tenant = %ctx.tenant_id), err)]
    pub async fn edit_role(
        &self,
        ctx: &RequestContext,
        role_id: RoleId,
        name: String,
        permission_ids: Vec<PermissionId>,
    ) -> CoreResult<(RoleModel, Vec<PermissionModel>)> {
        require_text("role name", &name)?;

        let txn = self.db.begin().await?;

        let role = find_role(&txn, ctx.tenant_id, role_id).await?;
        if role.is_protected() {
            return Err(CoreError::Forbidden(format!(
                "role {} cannot be edited",
                role.name
            )));
        }
        if is_protected_name(&name) {
            return Err(CoreError::Conflict(format!("role name {name} is reserved")));
        }
        if let Some(other) = find_role_by_name(&txn, ctx.tenant_id, &name).await? {
            if other.id != role.id {
                return Err(CoreError::Conflict(format!("role {name} already exists")));
            }
        }

        let mut active: RoleActiveModel = role.into();
        active.name = Set(name);
        let role = active.update(&txn).await?;

        let permissions = reassign(&txn, role.id, &permission_ids).await?;

        txn.commit().await?;
        Ok((role, permissions))
    }

    /// Deletes a role, moving its administrators to "Disabled" first.
    /// Protected roles are left untouched.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_role(&self, ctx: &RequestContext, role_id: RoleId) -> CoreResult<DeleteOutcome> {
        let txn = self.db.begin().await?;

        let role = find_role(&txn, ctx.tenant_id, role_id).await?;
        if role.is_protected() {
            info!(role = %role.name, "refusing to delete protected role");
            return Ok(DeleteOutcome::Refused);
        }

        let disabled = find_role_by_name(&txn, ctx.tenant_id, DISABLED)
            .await?
            .ok_or_else(|| {
                CoreError::InvalidState(format!(
                    "tenant {} has no {DISABLED} role",
                    ctx.tenant_id
                ))
            })?;

        let moved = Administration::update_many()
            .col_expr(AdministrationColumn::RoleId, Expr::value(Value::from(disabled.id)))
            .filter(AdministrationColumn::TenantId.eq(ctx.tenant_id))
            .filter(AdministrationColumn::RoleId.eq(role.id))
            .exec(&txn)
            .await?;

        RolePermission::delete_many()
            .filter(RolePermissionColumn::RoleId.eq(role.id))
            .exec(&txn)
            .await?;

        Role::delete_by_id(role.id).exec(&txn).await?;

        txn.commit().await?;

        info!(role = %role.name, reassigned = moved.rows_affected, "role deleted");
        Ok(DeleteOutcome::Deleted {
            reassigned: moved.rows_affected,
        })
    }

    /// Seeds "Super Admin" (linked to "all") and "Disabled" for the tenant.
    /// Safe to call repeatedly.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn ensure_protected_roles(&self, ctx: &RequestContext) -> CoreResult<ProtectedRoles> {
        let txn = self.db.begin().await?;

        let all_like: Vec<PermissionModel> = Permission::find()
            .order_by_asc(PermissionColumn::Name)
            .all(&txn)
            .await?
            .into_iter()
            .filter(|permission| permission.grants_everything())
            .collect();
        if all_like.len() > 1 {
            warn!(
                candidates = all_like.len(),
                using = %all_like[0].name,
                "several all-granting permissions exist, linking the first"
            );
        }

        let all = match all_like.into_iter().next() {
            Some(all) => all,
            None => {
                PermissionActiveModel {
                    id: Set(PermissionId::new()),
                    name: Set(ALL_PERMISSION.to_string()),
                }
                .insert(&txn)
                .await?
            }
        };

        let super_admin = match find_role_by_name(&txn, ctx.tenant_id, SUPER_ADMIN).await? {
            Some(role) => role,
            None => {
                let role = insert_role(&txn, ctx.tenant_id, SUPER_ADMIN).await?;
                assign(&txn, role.id, &[all.id]).await?;
                info!("seeded {SUPER_ADMIN} role");
                role
            }
        };

        let disabled = match find_role_by_name(&txn, ctx.tenant_id, DISABLED).await? {
            Some(role) => role,
            None => {
                let role = insert_role(&txn, ctx.tenant_id, DISABLED).await?;
                info!("seeded {DISABLED} role");
                role
            }
        };

        txn.commit().await?;
        Ok(ProtectedRoles {
            super_admin,
            disabled,
        })
    }

    /// Gives `user_id` the role, replacing any role the user already holds.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn assign_role(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
        role_id: RoleId,
    ) -> CoreResult<AdministrationModel> {
        let txn = self.db.begin().await?;

        find_user(&txn, ctx.tenant_id, user_id).await?;
        let role = find_role(&txn, ctx.tenant_id, role_id).await?;

        let existing = Administration::find()
            .filter(AdministrationColumn::TenantId.eq(ctx.tenant_id))
            .filter(AdministrationColumn::UserId.eq(user_id))
            .one(&txn)
            .await?;

        let administration = match existing {
            Some(row) => {
                let mut active: AdministrationActiveModel = row.into();
                active.role_id = Set(role.id);
                active.update(&txn).await?
            }
            None => {
                AdministrationActiveModel {
                    id: Set(AdministrationId::new()),
                    tenant_id: Set(ctx.tenant_id),
                    user_id: Set(user_id),
                    role_id: Set(role.id),
                }
                .insert(&txn)
                .await?
            }
        };

        txn.commit().await?;
        Ok(administration)
    }

    pub async fn get_role(&self, ctx: &RequestContext, role_id: RoleId) -> CoreResult<RoleModel> {
        find_role(&self.db, ctx.tenant_id, role_id).await
    }

    pub async fn list_roles(&self, ctx: &RequestContext) -> CoreResult<Vec<RoleModel>> {
        Ok(Role::find()
            .filter(RoleColumn::TenantId.eq(ctx.tenant_id))
            .order_by_asc(RoleColumn::Name)
            .all(&self.db)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::permissions::PermissionsService;
    use crate::test_utils::*;

    async fn setup_test_service() -> (DatabaseConnection, RequestContext, RolesService) {
        let db = setup_test_db().await;
        let ctx = create_test_tenant(&db).await;
        let service = RolesService::new(db.clone());
        service
            .ensure_protected_roles(&ctx)
            .await
            .expect("Failed to seed protected roles");
        (db, ctx, service)
    }

    #[tokio::test]
    async fn test_ensure_protected_roles_is_idempotent() {
        let (db, ctx, service) = setup_test_service().await;

        let again = service.ensure_protected_roles(&ctx).await.unwrap();
        assert_eq!(again.super_admin.name, SUPER_ADMIN);
        assert_eq!(again.disabled.name, DISABLED);
        assert_eq!(service.list_roles(&ctx).await.unwrap().len(), 2);

        let permissions = PermissionsService::new(db.clone())
            .permissions_for_role(&ctx, again.super_admin.id)
            .await
            .unwrap();
        assert_eq!(permissions.len(), 1);
        assert!(permissions[0].grants_everything());
        assert_eq!(Permission::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_ensure_protected_roles_reuses_differently_cased_all() {
        let db = setup_test_db().await;
        let ctx = create_test_tenant(&db).await;
        let existing_all = create_test_permission(&db, "ALL").await;
        let service = RolesService::new(db.clone());

        let protected = service.ensure_protected_roles(&ctx).await.unwrap();

        let all_like = Permission::find()
            .all(&db)
            .await
            .unwrap()
            .into_iter()
            .filter(|permission| permission.grants_everything())
            .count();
        assert_eq!(all_like, 1);

        let links = RolePermission::find()
            .filter(RolePermissionColumn::RoleId.eq(protected.super_admin.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].permission_id, existing_all);
    }

    #[tokio::test]
    async fn test_protected_names_reserved_in_any_casing() {
        let (_db, ctx, service) = setup_test_service().await;

        for name in ["disabled", "SUPER ADMIN", " Disabled"] {
            let result = service.create_role(&ctx, name.to_string(), vec![]).await;
            assert!(matches!(result, Err(CoreError::Conflict(_))), "{name}");
        }

        let (role, _) = service
            .create_role(&ctx, "Auditor".to_string(), vec![])
            .await
            .unwrap();
        let renamed = service
            .edit_role(&ctx, role.id, "super admin".to_string(), vec![])
            .await;
        assert!(matches!(renamed, Err(CoreError::Conflict(_))));
        assert_eq!(service.list_roles(&ctx).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_role_links_permissions() {
        let (db, ctx, service) = setup_test_service().await;
        let p1 = create_test_permission(&db, "forums.create").await;
        let p2 = create_test_permission(&db, "posts.moderate").await;

        let (role, linked) = service
            .create_role(&ctx, "Moderator".to_string(), vec![p1, p2])
            .await
            .unwrap();
        assert_eq!(role.name, "Moderator");
        assert_eq!(linked.len(), 2);

        let duplicate = service
            .create_role(&ctx, "Moderator".to_string(), vec![])
            .await;
        assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

        let reserved = service
            .create_role(&ctx, SUPER_ADMIN.to_string(), vec![])
            .await;
        assert!(matches!(reserved, Err(CoreError::Conflict(_))));

        let blank = service.create_role(&ctx, "".to_string(), vec![]).await;
        assert!(matches!(blank, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_role_with_unknown_permission_rolls_back() {
        let (_db, ctx, service) = setup_test_service().await;

        let result = service
            .create_role(&ctx, "Ghost".to_string(), vec![PermissionId::new()])
            .await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "permission" })));
        assert_eq!(service.list_roles(&ctx).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_edit_role_replaces_all_with_single_permission() {
        let (db, ctx, service) = setup_test_service().await;
        let all = Permission::find()
            .filter(PermissionColumn::Name.eq(ALL_PERMISSION))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        let p1 = create_test_permission(&db, "forums.create").await;
        let p3 = create_test_permission(&db, "users.invite").await;

        let (role, linked) = service
            .create_role(&ctx, "Staff".to_string(), vec![p1, all.id])
            .await
            .unwrap();
        assert_eq!(linked.len(), 1);

        let (role, linked) = service
            .edit_role(&ctx, role.id, "Staff lead".to_string(), vec![p3])
            .await
            .unwrap();
        assert_eq!(role.name, "Staff lead");
        assert_eq!(linked.len(), 1);

        let links = RolePermission::find()
            .filter(RolePermissionColumn::RoleId.eq(role.id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].permission_id, p3);
    }

    #[tokio::test]
    async fn test_edit_role_guards() {
        let (_db, ctx, service) = setup_test_service().await;
        let protected = service.ensure_protected_roles(&ctx).await.unwrap();
        let (role, _) = service
            .create_role(&ctx, "Editor".to_string(), vec![])
            .await
            .unwrap();
        service
            .create_role(&ctx, "Reviewer".to_string(), vec![])
            .await
            .unwrap();

        let locked = service
            .edit_role(&ctx, protected.disabled.id, "Inactive".to_string(), vec![])
            .await;
        assert!(matches!(locked, Err(CoreError::Forbidden(_))));

        let reserved = service
            .edit_role(&ctx, role.id, DISABLED.to_string(), vec![])
            .await;
        assert!(matches!(reserved, Err(CoreError::Conflict(_))));

        let clash = service
            .edit_role(&ctx, role.id, "Reviewer".to_string(), vec![])
            .await;
        assert!(matches!(clash, Err(CoreError::Conflict(_))));

        assert_eq!(service.get_role(&ctx, role.id).await.unwrap().name, "Editor");
    }

    #[tokio::test]
    async fn test_delete_role_reassigns_administrators_to_disabled() {
        let (db, ctx, service) = setup_test_service().await;
        let protected = service.ensure_protected_roles(&ctx).await.unwrap();
        let p1 = create_test_permission(&db, "forums.create").await;
        let (role, _) = service
            .create_role(&ctx, "Coordinator".to_string(), vec![p1])
            .await
            .unwrap();

        let u1 = create_test_user(&db, ctx.tenant_id, UserKind::Faculty, None, None).await;
        let u2 = create_test_user(&db, ctx.tenant_id, UserKind::Faculty, None, None).await;
        service.assign_role(&ctx, u1, role.id).await.unwrap();
        service.assign_role(&ctx, u2, role.id).await.unwrap();

        let outcome = service.delete_role(&ctx, role.id).await.unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted { reassigned: 2 });

        let rows = Administration::find()
            .filter(AdministrationColumn::TenantId.eq(ctx.tenant_id))
            .all(&db)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.role_id == protected.disabled.id));
        assert!(Role::find_by_id(role.id).one(&db).await.unwrap().is_none());
        assert_eq!(
            RolePermission::find()
                .filter(RolePermissionColumn::RoleId.eq(role.id))
                .count(&db)
                .await
                .unwrap(),
            0
        );
    }

    #[tokio::test]
    async fn test_delete_protected_role_is_refused() {
        let (db, ctx, service) = setup_test_service().await;
        let protected = service.ensure_protected_roles(&ctx).await.unwrap();
        let admin = create_test_user(&db, ctx.tenant_id, UserKind::Admin, None, None).await;
        service
            .assign_role(&ctx, admin, protected.super_admin.id)
            .await
            .unwrap();

        for role_id in [protected.super_admin.id, protected.disabled.id] {
            let outcome = service.delete_role(&ctx, role_id).await.unwrap();
            assert_eq!(outcome, DeleteOutcome::Refused);
        }

        assert_eq!(service.list_roles(&ctx).await.unwrap().len(), 2);
        let row = Administration::find()
            .filter(AdministrationColumn::UserId.eq(admin))
            .one(&db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.role_id, protected.super_admin.id);
        assert_eq!(RolePermission::find().count(&db).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delete_role_without_disabled_is_invalid_state() {
        let db = setup_test_db().await;
        let ctx = create_test_tenant(&db).await;
        let service = RolesService::new(db.clone());

        let (role, _) = service
            .create_role(&ctx, "Orphan".to_string(), vec![])
            .await
            .unwrap();

        let result = service.delete_role(&ctx, role.id).await;
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
        assert!(service.get_role(&ctx, role.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_assign_role_replaces_existing_assignment() {
        let (db, ctx, service) = setup_test_service().await;
        let (first, _) = service
            .create_role(&ctx, "First".to_string(), vec![])
            .await
            .unwrap();
        let (second, _) = service
            .create_role(&ctx, "Second".to_string(), vec![])
            .await
            .unwrap();
        let user = create_test_user(&db, ctx.tenant_id, UserKind::Faculty, None, None).await;

        let row = service.assign_role(&ctx, user, first.id).await.unwrap();
        let updated = service.assign_role(&ctx, user, second.id).await.unwrap();
        assert_eq!(row.id, updated.id);
        assert_eq!(updated.role_id, second.id);
        assert_eq!(Administration::find().count(&db).await.unwrap(), 1);
    }
}
