use chrono::Utc;
use sea_orm::DatabaseConnection;
use tracing::instrument;

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{require_text, CoreError, CoreResult},
    ids::{ForumId, GroupId},
    service::{
        cascade::{CascadeDeleter, DeletionSummary},
        groups::{find_group, forum_visible_to},
    },
};

#[derive(Clone)]
pub struct ForumsService {
    db: DatabaseConnection,
    cascade: CascadeDeleter,
}

impl ForumsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cascade: CascadeDeleter::new(db.clone()),
            db,
        }
    }

    /// A forum without a group is public within the tenant.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn create_forum(
        &self,
        ctx: &RequestContext,
        name: String,
        group_id: Option<GroupId>,
    ) -> CoreResult<ForumModel> {
        require_text("forum name", &name)?;

        if let Some(group_id) = group_id {
            find_group(&self.db, ctx.tenant_id, group_id).await?;
        }

        let forum = ForumActiveModel {
            id: Set(ForumId::new()),
            tenant_id: Set(ctx.tenant_id),
            name: Set(name),
            group_id: Set(group_id),
            created_by: Set(ctx.user_id),
            created_at: Set(Utc::now()),
        };

        Ok(forum.insert(&self.db).await?)
    }

    pub async fn get_forum(&self, ctx: &RequestContext, forum_id: ForumId) -> CoreResult<ForumModel> {
        Forum::find_by_id(forum_id)
            .filter(ForumColumn::TenantId.eq(ctx.tenant_id))
            .one(&self.db)
            .await?
            .ok_or(CoreError::not_found("forum"))
    }

    /// Forums the caller may see, by name.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id, user = %ctx.user_id), err)]
    pub async fn list_visible_forums(&self, ctx: &RequestContext) -> CoreResult<Vec<ForumModel>> {
        let forums = Forum::find()
            .filter(ForumColumn::TenantId.eq(ctx.tenant_id))
            .order_by_asc(ForumColumn::Name)
            .all(&self.db)
            .await?;

        let mut visible = Vec::with_capacity(forums.len());
        for forum in forums {
            if forum_visible_to(&self.db, &forum, ctx.user_id).await? {
                visible.push(forum);
            }
        }
        Ok(visible)
    }

    pub async fn delete_forum(
        &self,
        ctx: &RequestContext,
        forum_id: ForumId,
    ) -> CoreResult<DeletionSummary> {
        self.cascade.delete_forum(ctx, forum_id).await
    }
}
