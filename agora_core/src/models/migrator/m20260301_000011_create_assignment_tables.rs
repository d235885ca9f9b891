use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_user_table::User;
use super::m20260301_000008_create_classroom_table::Classroom;
use super::m20260301_000009_create_thread_table::Thread;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Assignment::Table)
                    .col(pk_uuid(Assignment::Id))
                    .col(uuid(Assignment::ClassroomId))
                    .col(uuid_uniq(Assignment::ThreadId))
                    .col(string(Assignment::Title))
                    .col(timestamp_with_time_zone_null(Assignment::DueAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-classroom_id")
                            .from(Assignment::Table, Assignment::ClassroomId)
                            .to(Classroom::Table, Classroom::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-assignment-thread_id")
                            .from(Assignment::Table, Assignment::ThreadId)
                            .to(Thread::Table, Thread::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Submission::Table)
                    .col(pk_uuid(Submission::Id))
                    .col(uuid(Submission::AssignmentId))
                    .col(uuid(Submission::StudentId))
                    .col(timestamp_with_time_zone(Submission::SubmittedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-assignment_id")
                            .from(Submission::Table, Submission::AssignmentId)
                            .to(Assignment::Table, Assignment::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission-student_id")
                            .from(Submission::Table, Submission::StudentId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submission_assignment_id")
                    .table(Submission::Table)
                    .col(Submission::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubmissionAttachment::Table)
                    .col(pk_uuid(SubmissionAttachment::Id))
                    .col(uuid(SubmissionAttachment::SubmissionId))
                    .col(string(SubmissionAttachment::Filename))
                    .col(string(SubmissionAttachment::Filepath))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-submission_attachment-submission_id")
                            .from(SubmissionAttachment::Table, SubmissionAttachment::SubmissionId)
                            .to(Submission::Table, Submission::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubmissionAttachment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignment::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Assignment {
    Table,
    Id,
    ClassroomId,
    ThreadId,
    Title,
    DueAt,
}

#[derive(DeriveIden)]
pub enum Submission {
    Table,
    Id,
    AssignmentId,
    StudentId,
    SubmittedAt,
}

#[derive(DeriveIden)]
pub enum SubmissionAttachment {
    Table,
    Id,
    SubmissionId,
    Filename,
    Filepath,
}
