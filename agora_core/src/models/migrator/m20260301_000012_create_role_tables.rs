use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000003_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Role::Table)
                    .col(pk_uuid(Role::Id))
                    .col(uuid(Role::TenantId))
                    .col(string(Role::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_tenant_name")
                    .table(Role::Table)
                    .col(Role::TenantId)
                    .col(Role::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Permission::Table)
                    .col(pk_uuid(Permission::Id))
                    .col(string_uniq(Permission::Name))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RolePermission::Table)
                    .col(uuid(RolePermission::RoleId))
                    .col(uuid(RolePermission::PermissionId))
                    .primary_key(
                        Index::create()
                            .col(RolePermission::RoleId)
                            .col(RolePermission::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role_permission-role_id")
                            .from(RolePermission::Table, RolePermission::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-role_permission-permission_id")
                            .from(RolePermission::Table, RolePermission::PermissionId)
                            .to(Permission::Table, Permission::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Administration::Table)
                    .col(pk_uuid(Administration::Id))
                    .col(uuid(Administration::TenantId))
                    .col(uuid(Administration::UserId))
                    .col(uuid(Administration::RoleId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-administration-user_id")
                            .from(Administration::Table, Administration::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-administration-role_id")
                            .from(Administration::Table, Administration::RoleId)
                            .to(Role::Table, Role::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_administration_tenant_user")
                    .table(Administration::Table)
                    .col(Administration::TenantId)
                    .col(Administration::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_administration_role_id")
                    .table(Administration::Table)
                    .col(Administration::RoleId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Administration::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RolePermission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Permission::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Role::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Role {
    Table,
    Id,
    TenantId,
    Name,
}

#[derive(DeriveIden)]
pub enum Permission {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum RolePermission {
    Table,
    RoleId,
    PermissionId,
}

#[derive(DeriveIden)]
pub enum Administration {
    Table,
    Id,
    TenantId,
    UserId,
    RoleId,
}
