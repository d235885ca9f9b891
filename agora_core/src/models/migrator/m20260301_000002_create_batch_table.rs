use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_department_table::Department;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Batch::Table)
                    .col(pk_uuid(Batch::Id))
                    .col(uuid(Batch::TenantId))
                    .col(uuid(Batch::DepartmentId))
                    .col(string(Batch::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-batch-department_id")
                            .from(Batch::Table, Batch::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_batch_department_id")
                    .table(Batch::Table)
                    .col(Batch::DepartmentId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Batch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Batch {
    Table,
    Id,
    TenantId,
    DepartmentId,
    Name,
}
