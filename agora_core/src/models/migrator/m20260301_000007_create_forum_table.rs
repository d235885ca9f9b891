use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_user_table::User;
use super::m20260301_000004_create_group_table::Group;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Forum::Table)
                    .col(pk_uuid(Forum::Id))
                    .col(uuid(Forum::TenantId))
                    .col(string(Forum::Name))
                    .col(uuid_null(Forum::GroupId))
                    .col(uuid(Forum::CreatedBy))
                    .col(timestamp_with_time_zone(Forum::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-forum-group_id")
                            .from(Forum::Table, Forum::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-forum-created_by")
                            .from(Forum::Table, Forum::CreatedBy)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_tenant_id")
                    .table(Forum::Table)
                    .col(Forum::TenantId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_forum_group_id")
                    .table(Forum::Table)
                    .col(Forum::GroupId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Forum::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Forum {
    Table,
    Id,
    TenantId,
    Name,
    GroupId,
    CreatedBy,
    CreatedAt,
}
