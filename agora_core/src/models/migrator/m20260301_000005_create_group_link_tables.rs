use sea_orm_migration::{prelude::*, schema::*};

use super::m20260301_000001_create_department_table::Department;
use super::m20260301_000002_create_batch_table::Batch;
use super::m20260301_000004_create_group_table::Group;

// Batch and department groups each keep their link in a table keyed by the
// group id, so a group holds at most one record per variant table.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GroupBatch::Table)
                    .col(pk_uuid(GroupBatch::GroupId))
                    .col(uuid_uniq(GroupBatch::BatchId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-group_batch-group_id")
                            .from(GroupBatch::Table, GroupBatch::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-group_batch-batch_id")
                            .from(GroupBatch::Table, GroupBatch::BatchId)
                            .to(Batch::Table, Batch::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GroupDepartment::Table)
                    .col(pk_uuid(GroupDepartment::GroupId))
                    .col(uuid_uniq(GroupDepartment::DepartmentId))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-group_department-group_id")
                            .from(GroupDepartment::Table, GroupDepartment::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-group_department-department_id")
                            .from(GroupDepartment::Table, GroupDepartment::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GroupDepartment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GroupBatch::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GroupBatch {
    Table,
    GroupId,
    BatchId,
}

#[derive(DeriveIden)]
pub enum GroupDepartment {
    Table,
    GroupId,
    DepartmentId,
}
