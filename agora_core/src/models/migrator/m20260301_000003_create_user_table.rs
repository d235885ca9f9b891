use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_department_table::Department;
use super::m20260301_000002_create_batch_table::Batch;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .col(pk_uuid(User::Id))
                    .col(uuid(User::TenantId))
                    .col(string(User::Name))
                    .col(string_len(User::Kind, 16))
                    .col(uuid_null(User::DepartmentId))
                    .col(uuid_null(User::BatchId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user-department_id")
                            .from(User::Table, User::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-user-batch_id")
                            .from(User::Table, User::BatchId)
                            .to(Batch::Table, Batch::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_batch_id")
                    .table(User::Table)
                    .col(User::BatchId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_department_id")
                    .table(User::Table)
                    .col(User::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum User {
    Table,
    Id,
    TenantId,
    Name,
    Kind,
    DepartmentId,
    BatchId,
}
