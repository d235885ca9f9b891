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
                    .table(Classroom::Table)
                    .col(pk_uuid(Classroom::Id))
                    .col(uuid(Classroom::TenantId))
                    .col(string(Classroom::Name))
                    .col(uuid(Classroom::FacultyId))
                    .col(timestamp_with_time_zone(Classroom::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-classroom-faculty_id")
                            .from(Classroom::Table, Classroom::FacultyId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Classroom::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Classroom {
    Table,
    Id,
    TenantId,
    Name,
    FacultyId,
    CreatedAt,
}
