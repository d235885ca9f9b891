use sea_orm_migration::prelude::*;

mod m20260301_000001_create_department_table;
mod m20260301_000002_create_batch_table;
mod m20260301_000003_create_user_table;
mod m20260301_000004_create_group_table;
mod m20260301_000005_create_group_link_tables;
mod m20260301_000006_create_custom_group_tables;
mod m20260301_000007_create_forum_table;
mod m20260301_000008_create_classroom_table;
mod m20260301_000009_create_thread_table;
mod m20260301_000010_create_post_tables;
mod m20260301_000011_create_assignment_tables;
mod m20260301_000012_create_role_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_department_table::Migration),
            Box::new(m20260301_000002_create_batch_table::Migration),
            Box::new(m20260301_000003_create_user_table::Migration),
            Box::new(m20260301_000004_create_group_table::Migration),
            Box::new(m20260301_000005_create_group_link_tables::Migration),
            Box::new(m20260301_000006_create_custom_group_tables::Migration),
            Box::new(m20260301_000007_create_forum_table::Migration),
            Box::new(m20260301_000008_create_classroom_table::Migration),
            Box::new(m20260301_000009_create_thread_table::Migration),
            Box::new(m20260301_000010_create_post_tables::Migration),
            Box::new(m20260301_000011_create_assignment_tables::Migration),
            Box::new(m20260301_000012_create_role_tables::Migration),
        ]
    }
}
