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
                    .table(CustomGroup::Table)
                    .col(pk_uuid(CustomGroup::Id))
                    .col(uuid_uniq(CustomGroup::GroupId))
                    .col(uuid(CustomGroup::CreatorId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-custom_group-group_id")
                            .from(CustomGroup::Table, CustomGroup::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-custom_group-creator_id")
                            .from(CustomGroup::Table, CustomGroup::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CustomGroupMember::Table)
                    .col(uuid(CustomGroupMember::CustomGroupId))
                    .col(uuid(CustomGroupMember::UserId))
                    .primary_key(
                        Index::create()
                            .col(CustomGroupMember::CustomGroupId)
                            .col(CustomGroupMember::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-custom_group_member-custom_group_id")
                            .from(CustomGroupMember::Table, CustomGroupMember::CustomGroupId)
                            .to(CustomGroup::Table, CustomGroup::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-custom_group_member-user_id")
                            .from(CustomGroupMember::Table, CustomGroupMember::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_custom_group_member_user_id")
                    .table(CustomGroupMember::Table)
                    .col(CustomGroupMember::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CustomGroupMember::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CustomGroup::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CustomGroup {
    Table,
    Id,
    GroupId,
    CreatorId,
}

#[derive(DeriveIden)]
pub enum CustomGroupMember {
    Table,
    CustomGroupId,
    UserId,
}
