use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000004_create_group_table::Group;
use super::m20260301_000007_create_forum_table::Forum;
use super::m20260301_000008_create_classroom_table::Classroom;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Thread::Table)
                    .col(pk_uuid(Thread::Id))
                    .col(uuid(Thread::TenantId))
                    .col(string_len(Thread::ContainerKind, 16))
                    .col(uuid_null(Thread::ForumId))
                    .col(uuid_null(Thread::ClassroomId))
                    .col(uuid_null(Thread::GroupId))
                    .col(string(Thread::Title))
                    .col(string(Thread::ThreadType))
                    // References post.id; the constraint is added with the post table.
                    .col(uuid_null(Thread::MainPostId))
                    .col(big_integer(Thread::NextPostSeq).default(0))
                    .col(uuid(Thread::CreatedBy))
                    .col(timestamp_with_time_zone(Thread::CreatedAt))
                    .check(
                        Expr::col(Thread::ForumId)
                            .is_not_null()
                            .and(Expr::col(Thread::ClassroomId).is_null())
                            .or(Expr::col(Thread::ForumId)
                                .is_null()
                                .and(Expr::col(Thread::ClassroomId).is_not_null())),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-thread-forum_id")
                            .from(Thread::Table, Thread::ForumId)
                            .to(Forum::Table, Forum::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-thread-classroom_id")
                            .from(Thread::Table, Thread::ClassroomId)
                            .to(Classroom::Table, Classroom::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-thread-group_id")
                            .from(Thread::Table, Thread::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_forum_id")
                    .table(Thread::Table)
                    .col(Thread::ForumId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_classroom_id")
                    .table(Thread::Table)
                    .col(Thread::ClassroomId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_thread_group_id")
                    .table(Thread::Table)
                    .col(Thread::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Thread::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Thread {
    Table,
    Id,
    TenantId,
    ContainerKind,
    ForumId,
    ClassroomId,
    GroupId,
    Title,
    ThreadType,
    MainPostId,
    NextPostSeq,
    CreatedBy,
    CreatedAt,
}
