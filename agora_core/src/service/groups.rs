use std::collections::BTreeSet;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{require_text, CoreError, CoreResult},
    ids::{BatchId, CustomGroupId, DepartmentId, ForumId, GroupId, TenantId, UserId},
    service::cascade::{CascadeDeleter, DeletionSummary},
};

/// Membership source of a group, read from the variant table named by its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupVariant {
    Batch(BatchId),
    Department(DepartmentId),
    Custom(CustomGroupId),
}

pub(crate) async fn find_group<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    group_id: GroupId,
) -> CoreResult<GroupModel> {
    Group::find_by_id(group_id)
        .filter(GroupColumn::TenantId.eq(tenant_id))
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("group"))
}

pub(crate) async fn find_user<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    user_id: UserId,
) -> CoreResult<UserModel> {
    User::find_by_id(user_id)
        .filter(UserColumn::TenantId.eq(tenant_id))
        .one(conn)
        .await?
        .ok_or(CoreError::not_found("user"))
}

pub(crate) async fn variant_of<C: ConnectionTrait>(
    conn: &C,
    group: &GroupModel,
) -> CoreResult<GroupVariant> {
    let variant = match group.kind {
        GroupKind::Batch => GroupBatch::find_by_id(group.id)
            .one(conn)
            .await?
            .map(|link| GroupVariant::Batch(link.batch_id)),
        GroupKind::Department => GroupDepartment::find_by_id(group.id)
            .one(conn)
            .await?
            .map(|link| GroupVariant::Department(link.department_id)),
        GroupKind::Custom => CustomGroup::find()
            .filter(CustomGroupColumn::GroupId.eq(group.id))
            .one(conn)
            .await?
            .map(|custom| GroupVariant::Custom(custom.id)),
    };

    variant.ok_or_else(|| {
        CoreError::InvalidState(format!(
            "group {} is tagged {:?} but has no matching variant record",
            group.id, group.kind
        ))
    })
}

pub(crate) async fn members_of<C: ConnectionTrait>(
    conn: &C,
    group: &GroupModel,
) -> CoreResult<BTreeSet<UserId>> {
    let members: Vec<UserId> = match variant_of(conn, group).await? {
        GroupVariant::Batch(batch_id) => {
            User::find()
                .select_only()
                .column(UserColumn::Id)
                .filter(UserColumn::TenantId.eq(group.tenant_id))
                .filter(UserColumn::Kind.eq(UserKind::Student))
                .filter(UserColumn::BatchId.eq(batch_id))
                .into_tuple()
                .all(conn)
                .await?
        }
        GroupVariant::Department(department_id) => {
            User::find()
                .select_only()
                .column(UserColumn::Id)
                .filter(UserColumn::TenantId.eq(group.tenant_id))
                .filter(UserColumn::Kind.ne(UserKind::Admin))
                .filter(UserColumn::DepartmentId.eq(department_id))
                .into_tuple()
                .all(conn)
                .await?
        }
        GroupVariant::Custom(custom_group_id) => {
            CustomGroupMember::find()
                .select_only()
                .column(CustomGroupMemberColumn::UserId)
                .filter(CustomGroupMemberColumn::CustomGroupId.eq(custom_group_id))
                .into_tuple()
                .all(conn)
                .await?
        }
    };

    Ok(members.into_iter().collect())
}

/// Single-user membership test without materialising the member set.
pub(crate) async fn is_member_of<C: ConnectionTrait>(
    conn: &C,
    group: &GroupModel,
    user_id: UserId,
) -> CoreResult<bool> {
    let found = match variant_of(conn, group).await? {
        GroupVariant::Batch(batch_id) => {
            User::find_by_id(user_id)
                .filter(UserColumn::TenantId.eq(group.tenant_id))
                .filter(UserColumn::Kind.eq(UserKind::Student))
                .filter(UserColumn::BatchId.eq(batch_id))
                .count(conn)
                .await?
        }
        GroupVariant::Department(department_id) => {
            User::find_by_id(user_id)
                .filter(UserColumn::TenantId.eq(group.tenant_id))
                .filter(UserColumn::Kind.ne(UserKind::Admin))
                .filter(UserColumn::DepartmentId.eq(department_id))
                .count(conn)
                .await?
        }
        GroupVariant::Custom(custom_group_id) => {
            CustomGroupMember::find_by_id((custom_group_id, user_id))
                .count(conn)
                .await?
        }
    };

    Ok(found > 0)
}

pub(crate) async fn forum_visible_to<C: ConnectionTrait>(
    conn: &C,
    forum: &ForumModel,
    user_id: UserId,
) -> CoreResult<bool> {
    match forum.group_id {
        None => Ok(true),
        Some(group_id) => {
            let group = find_group(conn, forum.tenant_id, group_id)
                .await
                .map_err(|err| match err {
                    CoreError::NotFound { .. } => CoreError::InvalidState(format!(
                        "forum {} is scoped to missing group {group_id}",
                        forum.id
                    )),
                    other => other,
                })?;
            is_member_of(conn, &group, user_id).await
        }
    }
}

async fn insert_group<C: ConnectionTrait>(
    conn: &C,
    tenant_id: TenantId,
    name: String,
    kind: GroupKind,
) -> CoreResult<GroupModel> {
    let group = GroupActiveModel {
        id: Set(GroupId::new()),
        tenant_id: Set(tenant_id),
        name: Set(name),
        kind: Set(kind),
    };

    Ok(group.insert(conn).await?)
}

#[derive(Clone)]
pub struct GroupsService {
    db: DatabaseConnection,
    cascade: CascadeDeleter,
}

impl GroupsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cascade: CascadeDeleter::new(db.clone()),
            db,
        }
    }

    /// Create a department together with its department group.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn create_department(
        &self,
        ctx: &RequestContext,
        name: String,
    ) -> CoreResult<(DepartmentModel, GroupModel)> {
        require_text("department name", &name)?;

        let txn = self.db.begin().await?;

        let department = DepartmentActiveModel {
            id: Set(DepartmentId::new()),
            tenant_id: Set(ctx.tenant_id),
            name: Set(name.clone()),
        }
        .insert(&txn)
        .await?;

        let group = insert_group(&txn, ctx.tenant_id, name, GroupKind::Department).await?;

        GroupDepartment::insert(GroupDepartmentActiveModel {
            group_id: Set(group.id),
            department_id: Set(department.id),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok((department, group))
    }

    /// Create a batch under a department together with its batch group.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn create_batch(
        &self,
        ctx: &RequestContext,
        department_id: DepartmentId,
        name: String,
    ) -> CoreResult<(BatchModel, GroupModel)> {
        require_text("batch name", &name)?;

        let txn = self.db.begin().await?;

        Department::find_by_id(department_id)
            .filter(DepartmentColumn::TenantId.eq(ctx.tenant_id))
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("department"))?;

        let batch = BatchActiveModel {
            id: Set(BatchId::new()),
            tenant_id: Set(ctx.tenant_id),
            department_id: Set(department_id),
            name: Set(name.clone()),
        }
        .insert(&txn)
        .await?;

        let group = insert_group(&txn, ctx.tenant_id, name, GroupKind::Batch).await?;

        GroupBatch::insert(GroupBatchActiveModel {
            group_id: Set(group.id),
            batch_id: Set(batch.id),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok((batch, group))
    }

    /// Create a custom group owned by the caller with an explicit member list.
    #[instrument(skip(self, ctx, members), fields(tenant = %ctx.tenant_id, members = members.len()), err)]
    pub async fn create_custom_group(
        &self,
        ctx: &RequestContext,
        name: String,
        members: Vec<UserId>,
    ) -> CoreResult<GroupModel> {
        require_text("group name", &name)?;

        let members: BTreeSet<UserId> = members.into_iter().collect();

        let txn = self.db.begin().await?;

        find_user(&txn, ctx.tenant_id, ctx.user_id).await?;

        if !members.is_empty() {
            let known = User::find()
                .filter(UserColumn::TenantId.eq(ctx.tenant_id))
                .filter(UserColumn::Id.is_in(members.iter().copied()))
                .count(&txn)
                .await?;
            if known != members.len() as u64 {
                return Err(CoreError::not_found("user"));
            }
        }

        let group = insert_group(&txn, ctx.tenant_id, name, GroupKind::Custom).await?;

        let custom = CustomGroupActiveModel {
            id: Set(CustomGroupId::new()),
            group_id: Set(group.id),
            creator_id: Set(ctx.user_id),
        }
        .insert(&txn)
        .await?;

        if !members.is_empty() {
            CustomGroupMember::insert_many(members.iter().map(|user_id| {
                CustomGroupMemberActiveModel {
                    custom_group_id: Set(custom.id),
                    user_id: Set(*user_id),
                }
            }))
            .exec_without_returning(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(group)
    }

    pub async fn get_group(&self, ctx: &RequestContext, group_id: GroupId) -> CoreResult<GroupModel> {
        find_group(&self.db, ctx.tenant_id, group_id).await
    }

    pub async fn list_groups(&self, ctx: &RequestContext) -> CoreResult<Vec<GroupModel>> {
        Ok(Group::find()
            .filter(GroupColumn::TenantId.eq(ctx.tenant_id))
            .order_by_asc(GroupColumn::Name)
            .all(&self.db)
            .await?)
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn resolve_variant(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> CoreResult<GroupVariant> {
        let group = find_group(&self.db, ctx.tenant_id, group_id).await?;
        variant_of(&self.db, &group).await
    }

    /// Every user the group currently covers.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn resolve_members(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> CoreResult<BTreeSet<UserId>> {
        let group = find_group(&self.db, ctx.tenant_id, group_id).await?;
        members_of(&self.db, &group).await
    }

    pub async fn is_member(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        user_id: UserId,
    ) -> CoreResult<bool> {
        let group = find_group(&self.db, ctx.tenant_id, group_id).await?;
        is_member_of(&self.db, &group, user_id).await
    }

    /// Public forums are visible to everyone in the tenant; scoped forums only
    /// to members of their group.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id, user = %ctx.user_id), err)]
    pub async fn is_forum_visible(&self, ctx: &RequestContext, forum_id: ForumId) -> CoreResult<bool> {
        let forum = Forum::find_by_id(forum_id)
            .filter(ForumColumn::TenantId.eq(ctx.tenant_id))
            .one(&self.db)
            .await?
            .ok_or(CoreError::not_found("forum"))?;

        forum_visible_to(&self.db, &forum, ctx.user_id).await
    }

    async fn custom_variant<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> CoreResult<CustomGroupId> {
        let group = find_group(conn, ctx.tenant_id, group_id).await?;
        match variant_of(conn, &group).await? {
            GroupVariant::Custom(custom_group_id) => Ok(custom_group_id),
            GroupVariant::Batch(_) | GroupVariant::Department(_) => Err(CoreError::Validation(
                "membership of batch and department groups follows the directory".to_string(),
            )),
        }
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn add_custom_member(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        user_id: UserId,
    ) -> CoreResult<()> {
        let txn = self.db.begin().await?;

        let custom_group_id = Self::custom_variant(&txn, ctx, group_id).await?;
        find_user(&txn, ctx.tenant_id, user_id).await?;

        let existing = CustomGroupMember::find_by_id((custom_group_id, user_id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(format!(
                "user {user_id} is already a member of group {group_id}"
            )));
        }

        CustomGroupMember::insert(CustomGroupMemberActiveModel {
            custom_group_id: Set(custom_group_id),
            user_id: Set(user_id),
        })
        .exec_without_returning(&txn)
        .await?;

        txn.commit().await?;
        Ok(())
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn remove_custom_member(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
        user_id: UserId,
    ) -> CoreResult<()> {
        let txn = self.db.begin().await?;

        let custom_group_id = Self::custom_variant(&txn, ctx, group_id).await?;

        let removed = CustomGroupMember::delete_by_id((custom_group_id, user_id))
            .exec(&txn)
            .await?;
        if removed.rows_affected == 0 {
            return Err(CoreError::not_found("group member"));
        }

        txn.commit().await?;
        Ok(())
    }

    /// Tear down a custom group with every forum and thread scoped to it.
    pub async fn delete_custom_group(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> CoreResult<DeletionSummary> {
        self.cascade.delete_custom_group(ctx, group_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    async fn setup_test_service() -> GroupsService {
        GroupsService::new(setup_test_db().await)
    }

    #[tokio::test]
    async fn test_create_department_creates_linked_group() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;

        let (department, group) = service
            .create_department(&ctx, "Physics".to_string())
            .await
            .expect("Failed to create department");

        assert_eq!(group.kind, GroupKind::Department);
        assert_eq!(group.name, "Physics");
        assert_eq!(
            service.resolve_variant(&ctx, group.id).await.unwrap(),
            GroupVariant::Department(department.id)
        );
    }

    #[tokio::test]
    async fn test_create_batch_requires_department_in_tenant() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;
        let other = create_test_tenant(&service.db).await;
        let foreign_department = create_test_department(&service.db, other.tenant_id).await;

        let result = service
            .create_batch(&ctx, foreign_department, "2026".to_string())
            .await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "department" })));
        assert_eq!(Group::find().count(&service.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_batch_members_are_its_students_regardless_of_department() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;

        let (physics, _) = service
            .create_department(&ctx, "Physics".to_string())
            .await
            .unwrap();
        let chemistry = create_test_department(&service.db, ctx.tenant_id).await;
        let (batch, batch_group) = service
            .create_batch(&ctx, physics.id, "2026".to_string())
            .await
            .unwrap();

        let in_batch = create_test_user(
            &service.db,
            ctx.tenant_id,
            UserKind::Student,
            Some(physics.id),
            Some(batch.id),
        )
        .await;
        let in_batch_other_department = create_test_user(
            &service.db,
            ctx.tenant_id,
            UserKind::Student,
            Some(chemistry),
            Some(batch.id),
        )
        .await;
        // Same department, no batch: not a member.
        create_test_user(&service.db, ctx.tenant_id, UserKind::Student, Some(physics.id), None)
            .await;
        create_test_user(&service.db, ctx.tenant_id, UserKind::Faculty, Some(physics.id), None)
            .await;

        let members = service.resolve_members(&ctx, batch_group.id).await.unwrap();
        assert_eq!(
            members,
            BTreeSet::from([in_batch, in_batch_other_department])
        );
    }

    #[tokio::test]
    async fn test_department_members_include_faculty_and_students() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;

        let (department, group) = service
            .create_department(&ctx, "History".to_string())
            .await
            .unwrap();
        let other_department = create_test_department(&service.db, ctx.tenant_id).await;

        let faculty = create_test_user(
            &service.db,
            ctx.tenant_id,
            UserKind::Faculty,
            Some(department.id),
            None,
        )
        .await;
        let student = create_test_user(
            &service.db,
            ctx.tenant_id,
            UserKind::Student,
            Some(department.id),
            None,
        )
        .await;
        create_test_user(
            &service.db,
            ctx.tenant_id,
            UserKind::Student,
            Some(other_department),
            None,
        )
        .await;

        let members = service.resolve_members(&ctx, group.id).await.unwrap();
        assert_eq!(members, BTreeSet::from([faculty, student]));
        assert!(service.is_member(&ctx, group.id, faculty).await.unwrap());
        assert!(!service.is_member(&ctx, group.id, ctx.user_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_custom_group_members_and_edits() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;
        let u1 = create_test_user(&service.db, ctx.tenant_id, UserKind::Student, None, None).await;
        let u2 = create_test_user(&service.db, ctx.tenant_id, UserKind::Faculty, None, None).await;
        let u3 = create_test_user(&service.db, ctx.tenant_id, UserKind::Student, None, None).await;

        let group = service
            .create_custom_group(&ctx, "Robotics club".to_string(), vec![u1, u2, u1])
            .await
            .unwrap();
        assert_eq!(group.kind, GroupKind::Custom);
        assert_eq!(
            service.resolve_members(&ctx, group.id).await.unwrap(),
            BTreeSet::from([u1, u2])
        );

        service.add_custom_member(&ctx, group.id, u3).await.unwrap();
        let duplicate = service.add_custom_member(&ctx, group.id, u3).await;
        assert!(matches!(duplicate, Err(CoreError::Conflict(_))));

        service.remove_custom_member(&ctx, group.id, u1).await.unwrap();
        assert_eq!(
            service.resolve_members(&ctx, group.id).await.unwrap(),
            BTreeSet::from([u2, u3])
        );

        let missing = service.remove_custom_member(&ctx, group.id, u1).await;
        assert!(matches!(missing, Err(CoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_custom_group_rejects_unknown_members() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;
        let other = create_test_tenant(&service.db).await;

        let result = service
            .create_custom_group(&ctx, "Mixed".to_string(), vec![other.user_id])
            .await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "user" })));
        assert_eq!(Group::find().count(&service.db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_custom_membership_edits_refused_on_derived_groups() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;
        let (_, group) = service
            .create_department(&ctx, "Art".to_string())
            .await
            .unwrap();

        let result = service.add_custom_member(&ctx, group.id, ctx.user_id).await;
        assert!(matches!(result, Err(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_variant_record_is_invalid_state() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;

        // Bypass the service to plant a group without its link row.
        let orphan = GroupActiveModel {
            id: Set(GroupId::new()),
            tenant_id: Set(ctx.tenant_id),
            name: Set("Broken".to_string()),
            kind: Set(GroupKind::Batch),
        }
        .insert(&service.db)
        .await
        .unwrap();

        let result = service.resolve_members(&ctx, orphan.id).await;
        assert!(matches!(result, Err(CoreError::InvalidState(_))));
    }

    #[tokio::test]
    async fn test_groups_are_tenant_scoped() {
        let service = setup_test_service().await;
        let ctx = create_test_tenant(&service.db).await;
        let other = create_test_tenant(&service.db).await;

        let group = service
            .create_custom_group(&ctx, "Private".to_string(), vec![])
            .await
            .unwrap();

        let result = service.get_group(&other, group.id).await;
        assert!(matches!(result, Err(CoreError::NotFound { entity: "group" })));
        assert_eq!(service.list_groups(&ctx).await.unwrap().len(), 1);
        assert!(service.list_groups(&other).await.unwrap().is_empty());
    }
}
