use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};
use tracing::instrument;

use crate::{
    context::RequestContext,
    entity::prelude::*,
    error::{require_text, CoreError, CoreResult},
    ids::{AssignmentId, AttachmentId, ClassroomId, SubmissionId, ThreadId},
    service::{
        cascade::{CascadeDeleter, DeletionSummary},
        discussions::{find_thread, Container, NewAttachment},
        groups::find_user,
    },
};

#[derive(Clone)]
pub struct ClassroomsService {
    db: DatabaseConnection,
    cascade: CascadeDeleter,
}

impl ClassroomsService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            cascade: CascadeDeleter::new(db.clone()),
            db,
        }
    }

    /// The caller becomes the classroom's faculty owner.
    #[instrument(skip(self, ctx), fields(tenant = %ctx.tenant_id, user = %ctx.user_id), err)]
    pub async fn create_classroom(&self, ctx: &RequestContext, name: String) -> CoreResult<ClassroomModel> {
        require_text("classroom name", &name)?;

        let owner = find_user(&self.db, ctx.tenant_id, ctx.user_id).await?;
        if owner.kind == UserKind::Student {
            return Err(CoreError::Forbidden(
                "students cannot own classrooms".to_string(),
            ));
        }

        let classroom = ClassroomActiveModel {
            id: Set(ClassroomId::new()),
            tenant_id: Set(ctx.tenant_id),
            name: Set(name),
            faculty_id: Set(owner.id),
            created_at: Set(Utc::now()),
        };

        Ok(classroom.insert(&self.db).await?)
    }

    pub async fn get_classroom(
        &self,
        ctx: &RequestContext,
        classroom_id: ClassroomId,
    ) -> CoreResult<ClassroomModel> {
        Classroom::find_by_id(classroom_id)
            .filter(ClassroomColumn::TenantId.eq(ctx.tenant_id))
            .one(&self.db)
            .await?
            .ok_or(CoreError::not_found("classroom"))
    }

    /// Attaches an assignment to a classroom thread. A thread carries at most one.
    #[instrument(skip(self, ctx, title), fields(tenant = %ctx.tenant_id), err)]
    pub async fn create_assignment(
        &self,
        ctx: &RequestContext,
        thread_id: ThreadId,
        title: String,
        due_at: Option<DateTime<Utc>>,
    ) -> CoreResult<AssignmentModel> {
        require_text("assignment title", &title)?;

        let txn = self.db.begin().await?;

        let thread = find_thread(&txn, ctx.tenant_id, thread_id).await?;
        let classroom_id = match Container::of(&thread)? {
            Container::Classroom(classroom_id) => classroom_id,
            Container::Forum(_) => {
                return Err(CoreError::Validation(
                    "assignments can only be attached to classroom threads".to_string(),
                ))
            }
        };

        let existing = Assignment::find()
            .filter(AssignmentColumn::ThreadId.eq(thread.id))
            .one(&txn)
            .await?;
        if existing.is_some() {
            return Err(CoreError::Conflict(format!(
                "thread {} already has an assignment",
                thread.id
            )));
        }

        let assignment = AssignmentActiveModel {
            id: Set(AssignmentId::new()),
            classroom_id: Set(classroom_id),
            thread_id: Set(thread.id),
            title: Set(title),
            due_at: Set(due_at),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        Ok(assignment)
    }

    async fn find_assignment<C: ConnectionTrait>(
        conn: &C,
        ctx: &RequestContext,
        assignment_id: AssignmentId,
    ) -> CoreResult<AssignmentModel> {
        let assignment = Assignment::find_by_id(assignment_id)
            .one(conn)
            .await?
            .ok_or(CoreError::not_found("assignment"))?;

        let in_tenant = Classroom::find_by_id(assignment.classroom_id)
            .filter(ClassroomColumn::TenantId.eq(ctx.tenant_id))
            .count(conn)
            .await?;
        if in_tenant == 0 {
            return Err(CoreError::not_found("assignment"));
        }

        Ok(assignment)
    }

    /// Records a student's submission with its file metadata.
    #[instrument(skip(self, ctx, attachments), fields(tenant = %ctx.tenant_id, user = %ctx.user_id, files = attachments.len()), err)]
    pub async fn submit_assignment(
        &self,
        ctx: &RequestContext,
        assignment_id: AssignmentId,
        attachments: Vec<NewAttachment>,
    ) -> CoreResult<(SubmissionModel, Vec<SubmissionAttachmentModel>)> {
        for attachment in &attachments {
            attachment.validate()?;
        }

        let txn = self.db.begin().await?;

        let assignment = Self::find_assignment(&txn, ctx, assignment_id).await?;
        let student = find_user(&txn, ctx.tenant_id, ctx.user_id).await?;
        if student.kind != UserKind::Student {
            return Err(CoreError::Forbidden(
                "only students submit assignments".to_string(),
            ));
        }

        let submission = SubmissionActiveModel {
            id: Set(SubmissionId::new()),
            assignment_id: Set(assignment.id),
            student_id: Set(student.id),
            submitted_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await?;

        let mut stored = Vec::with_capacity(attachments.len());
        for attachment in attachments {
            let row = SubmissionAttachmentActiveModel {
                id: Set(AttachmentId::new()),
                submission_id: Set(submission.id),
                filename: Set(attachment.filename),
                filepath: Set(attachment.filepath),
            }
            .insert(&txn)
            .await?;
            stored.push(row);
        }

        txn.commit().await?;
        Ok((submission, stored))
    }

    pub async fn list_submissions(
        &self,
        ctx: &RequestContext,
        assignment_id: AssignmentId,
    ) -> CoreResult<Vec<SubmissionModel>> {
        let assignment = Self::find_assignment(&self.db, ctx, assignment_id).await?;

        Ok(Submission::find()
            .filter(SubmissionColumn::AssignmentId.eq(assignment.id))
            .order_by_asc(SubmissionColumn::SubmittedAt)
            .all(&self.db)
            .await?)
    }

    pub async fn delete_classroom(
        &self,
        ctx: &RequestContext,
        classroom_id: ClassroomId,
    ) -> CoreResult<DeletionSummary> {
        self.cascade.delete_classroom(ctx, classroom_id).await
    }
}
