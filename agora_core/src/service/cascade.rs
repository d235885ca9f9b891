//! Ordered teardown of threads, forums, custom groups and classrooms.
//!
//! Nothing here relies on store-level cascades. The `*_rows` step functions
//! take any connection so a compound delete runs inside the caller's single
//! transaction; the [`CascadeDeleter`] entry points each open and commit one.

use std::ops::AddAssign;

use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{CoreError, CoreResult},
    ids::{ClassroomId, ForumId, GroupId, PostId, SubmissionId, ThreadId},
    service::{
        for_update,
        groups::{find_group, variant_of, GroupVariant},
    },
};

/// Row counts removed by one cascading delete.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeletionSummary {
    pub groups: u64,
    pub forums: u64,
    pub classrooms: u64,
    pub threads: u64,
    pub posts: u64,
    pub attachments: u64,
    pub assignments: u64,
    pub submissions: u64,
    pub members: u64,
}

impl AddAssign for DeletionSummary {
    fn add_assign(&mut self, other: Self) {
        self.groups += other.groups;
        self.forums += other.forums;
        self.classrooms += other.classrooms;
        self.threads += other.threads;
        self.posts += other.posts;
        self.attachments += other.attachments;
        self.assignments += other.assignments;
        self.submissions += other.submissions;
        self.members += other.members;
    }
}

pub(crate) async fn delete_thread_rows<C: ConnectionTrait>(
    conn: &C,
    thread: ThreadModel,
) -> CoreResult<DeletionSummary> {
    let mut summary = DeletionSummary::default();

    let assignment = Assignment::find()
        .filter(AssignmentColumn::ThreadId.eq(thread.id))
        .one(conn)
        .await?;

    if let Some(assignment) = assignment {
        let submission_ids: Vec<SubmissionId> = Submission::find()
            .select_only()
            .column(SubmissionColumn::Id)
            .filter(SubmissionColumn::AssignmentId.eq(assignment.id))
            .into_tuple()
            .all(conn)
            .await?;

        if !submission_ids.is_empty() {
            let attachments = SubmissionAttachment::delete_many()
                .filter(SubmissionAttachmentColumn::SubmissionId.is_in(submission_ids))
                .exec(conn)
                .await?;
            summary.attachments += attachments.rows_affected;

            let submissions = Submission::delete_many()
                .filter(SubmissionColumn::AssignmentId.eq(assignment.id))
                .exec(conn)
                .await?;
            summary.submissions += submissions.rows_affected;
        }

        Assignment::delete_by_id(assignment.id).exec(conn).await?;
        summary.assignments += 1;
    }

    let thread_id = thread.id;

    // The main post pointer goes first so no post is referenced when deleted.
    if thread.main_post_id.is_some() {
        let mut active: ThreadActiveModel = thread.into();
        active.main_post_id = Set(None);
        active.update(conn).await?;
    }

    let post_ids: Vec<PostId> = Post::find()
        .select_only()
        .column(PostColumn::Id)
        .filter(PostColumn::ThreadId.eq(thread_id))
        .into_tuple()
        .all(conn)
        .await?;

    if !post_ids.is_empty() {
        let attachments = PostAttachment::delete_many()
            .filter(PostAttachmentColumn::PostId.is_in(post_ids))
            .exec(conn)
            .await?;
        summary.attachments += attachments.rows_affected;

        let posts = Post::delete_many()
            .filter(PostColumn::ThreadId.eq(thread_id))
            .exec(conn)
            .await?;
        summary.posts += posts.rows_affected;
    }

    Thread::delete_by_id(thread_id).exec(conn).await?;
    summary.threads += 1;

    debug!(thread = %thread_id, posts = summary.posts, "thread rows removed");
    Ok(summary)
}

pub(crate) async fn delete_forum_rows<C: ConnectionTrait>(
    conn: &C,
    forum: ForumModel,
) -> CoreResult<DeletionSummary> {
    let mut summary = DeletionSummary::default();

    let threads = Thread::find()
        .filter(ThreadColumn::ForumId.eq(forum.id))
        .all(conn)
        .await?;
    for thread in threads {
        summary += delete_thread_rows(conn, thread).await?;
    }

    Forum::delete_by_id(forum.id).exec(conn).await?;
    summary.forums += 1;

    Ok(summary)
}

pub(crate) async fn delete_custom_group_rows<C: ConnectionTrait>(
    conn: &C,
    group: GroupModel,
) -> CoreResult<DeletionSummary> {
    if group.kind != GroupKind::Custom {
        return Err(CoreError::Validation(format!(
            "only custom groups can be deleted, group {} is {:?}",
            group.id, group.kind
        )));
    }

    let custom_group_id = match variant_of(conn, &group).await? {
        GroupVariant::Custom(custom_group_id) => custom_group_id,
        other => {
            return Err(CoreError::InvalidState(format!(
                "custom group {} resolved to {other:?}",
                group.id
            )))
        }
    };

    let mut summary = DeletionSummary::default();

    let forums = Forum::find()
        .filter(ForumColumn::GroupId.eq(group.id))
        .all(conn)
        .await?;
    for forum in forums {
        summary += delete_forum_rows(conn, forum).await?;
    }

    // Threads scoped to the group that live outside its forums.
    let threads = Thread::find()
        .filter(ThreadColumn::GroupId.eq(group.id))
        .all(conn)
        .await?;
    for thread in threads {
        summary += delete_thread_rows(conn, thread).await?;
    }

    let members = CustomGroupMember::delete_many()
        .filter(CustomGroupMemberColumn::CustomGroupId.eq(custom_group_id))
        .exec(conn)
        .await?;
    summary.members += members.rows_affected;

    CustomGroup::delete_by_id(custom_group_id).exec(conn).await?;
    Group::delete_by_id(group.id).exec(conn).await?;
    summary.groups += 1;

    Ok(summary)
}

pub(crate) async fn delete_classroom_rows<C: ConnectionTrait>(
    conn: &C,
    classroom: ClassroomModel,
) -> CoreResult<DeletionSummary> {
    let mut summary = DeletionSummary::default();

    let threads = Thread::find()
        .filter(ThreadColumn::ClassroomId.eq(classroom.id))
        .all(conn)
        .await?;
    for thread in threads {
        summary += delete_thread_rows(conn, thread).await?;
    }

    Classroom::delete_by_id(classroom.id).exec(conn).await?;
    summary.classrooms += 1;

    Ok(summary)
}

#[derive(Clone)]
pub struct CascadeDeleter {
    db: DatabaseConnection,
}

impl CascadeDeleter {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_thread(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
    ) -> CoreResult<DeletionSummary> {
        let txn = self.db.begin().await?;

        let select = Thread::find_by_id(thread_id).filter(ThreadColumn::TenantId.eq(ctx.tenant_id));
        let thread = for_update(select, &txn)
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("thread"))?;

        let summary = delete_thread_rows(&txn, thread).await?;

        txn.commit().await?;
        Ok(summary)
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_forum(
        &self,
        ctx: &RequestContext,
        forum_id: ForumId,
    ) -> CoreResult<DeletionSummary> {
        let txn = self.db.begin().await?;

        let forum = Forum::find_by_id(forum_id)
            .filter(ForumColumn::TenantId.eq(ctx.tenant_id))
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("forum"))?;

        let summary = delete_forum_rows(&txn, forum).await?;

        txn.commit().await?;
        Ok(summary)
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_custom_group(
        &self,
        ctx: &RequestContext,
        group_id: GroupId,
    ) -> CoreResult<DeletionSummary> {
        let txn = self.db.begin().await?;

        let group = find_group(&txn, ctx.tenant_id, group_id).await?;
        let summary = delete_custom_group_rows(&txn, group).await?;

        txn.commit().await?;
        Ok(summary)
    }

    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id), err)]
    pub async fn delete_classroom(
        &self,
        ctx: &RequestContext,
        classroom_id: ClassroomId,
    ) -> CoreResult<DeletionSummary> {
        let txn = self.db.begin().await?;

        let classroom = Classroom::find_by_id(classroom_id)
            .filter(ClassroomColumn::TenantId.eq(ctx.tenant_id))
            .one(&txn)
            .await?
            .ok_or(CoreError::not_found("classroom"))?;

        let summary = delete_classroom_rows(&txn, classroom).await?;

        txn.commit().await?;
        Ok(summary)
    }
}
