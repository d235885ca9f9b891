use sea_orm_migration::{prelude::*, schema::*, sea_orm::DatabaseBackend};

use super::m20260301_000003_create_user_table::User;
use super::m20260301_000009_create_thread_table::Thread;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .col(pk_uuid(Post::Id))
                    .col(uuid(Post::ThreadId))
                    .col(string_len(Post::Kind, 16))
                    .col(uuid(Post::AuthorId))
                    .col(text(Post::Body))
                    .col(timestamp_with_time_zone(Post::CreatedAt))
                    .col(big_integer(Post::Seq))
                    .col(timestamp_with_time_zone_null(Post::EditedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post-thread_id")
                            .from(Post::Table, Post::ThreadId)
                            .to(Thread::Table, Thread::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post-author_id")
                            .from(Post::Table, Post::AuthorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Ordering key for "oldest surviving post" lookups.
        manager
            .create_index(
                Index::create()
                    .name("idx_post_thread_created_seq")
                    .table(Post::Table)
                    .col(Post::ThreadId)
                    .col(Post::CreatedAt)
                    .col(Post::Seq)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_thread_seq_unique")
                    .table(Post::Table)
                    .col(Post::ThreadId)
                    .col(Post::Seq)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // SQLite cannot add constraints to an existing table; there the
        // discussion engine is the only writer of main_post_id.
        if manager.get_database_backend() != DatabaseBackend::Sqlite {
            manager
                .create_foreign_key(
                    ForeignKey::create()
                        .name("fk-thread-main_post_id")
                        .from(Thread::Table, Thread::MainPostId)
                        .to(Post::Table, Post::Id)
                        .on_delete(ForeignKeyAction::Restrict)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(PostAttachment::Table)
                    .col(pk_uuid(PostAttachment::Id))
                    .col(uuid(PostAttachment::PostId))
                    .col(string(PostAttachment::Filename))
                    .col(string(PostAttachment::Filepath))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_attachment-post_id")
                            .from(PostAttachment::Table, PostAttachment::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_attachment_post_id")
                    .table(PostAttachment::Table)
                    .col(PostAttachment::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostAttachment::Table).to_owned())
            .await?;

        if manager.get_database_backend() != DatabaseBackend::Sqlite {
            manager
                .drop_foreign_key(
                    ForeignKey::drop()
                        .name("fk-thread-main_post_id")
                        .table(Thread::Table)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    Table,
    Id,
    ThreadId,
    Kind,
    AuthorId,
    Body,
    CreatedAt,
    Seq,
    EditedAt,
}

#[derive(DeriveIden)]
pub enum PostAttachment {
    Table,
    Id,
    PostId,
    Filename,
    Filepath,
}
