use std::time::Duration;

use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use crate::context::RequestContext;
use crate::entity::prelude::*;
use crate::ids::{BatchId, DepartmentId, PermissionId, TenantId, UserId};
use crate::models::migrator::Migrator;

/// Fresh in-memory SQLite database. A single pooled connection keeps every
/// query on the same in-memory instance.
pub async fn connect_memory() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(Duration::from_secs(3600))
        .sqlx_logging(false);

    Database::connect(options)
        .await
        .expect("Failed to create in-memory database")
}

/// In-memory database with all migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = connect_memory().await;

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub async fn create_test_department(db: &DatabaseConnection, tenant_id: TenantId) -> DepartmentId {
    let department_id = DepartmentId::new();
    let department = DepartmentActiveModel {
        id: Set(department_id),
        tenant_id: Set(tenant_id),
        name: Set(format!("Department {department_id}")),
    };
    Department::insert(department).exec(db).await.unwrap();
    department_id
}

pub async fn create_test_batch(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    department_id: DepartmentId,
) -> BatchId {
    let batch_id = BatchId::new();
    let batch = BatchActiveModel {
        id: Set(batch_id),
        tenant_id: Set(tenant_id),
        department_id: Set(department_id),
        name: Set(format!("Batch {batch_id}")),
    };
    Batch::insert(batch).exec(db).await.unwrap();
    batch_id
}

pub async fn create_test_user(
    db: &DatabaseConnection,
    tenant_id: TenantId,
    kind: UserKind,
    department_id: Option<DepartmentId>,
    batch_id: Option<BatchId>,
) -> UserId {
    let user_id = UserId::new();
    let user = UserActiveModel {
        id: Set(user_id),
        tenant_id: Set(tenant_id),
        name: Set(format!("User {user_id}")),
        kind: Set(kind),
        department_id: Set(department_id),
        batch_id: Set(batch_id),
    };
    User::insert(user).exec(db).await.unwrap();
    user_id
}

/// Tenant with one admin user acting as the caller.
pub async fn create_test_tenant(db: &DatabaseConnection) -> RequestContext {
    let tenant_id = TenantId::new();
    let admin = create_test_user(db, tenant_id, UserKind::Admin, None, None).await;
    RequestContext::new(tenant_id, admin)
}

pub async fn create_test_permission(db: &DatabaseConnection, name: &str) -> PermissionId {
    let permission_id = PermissionId::new();
    let permission = PermissionActiveModel {
        id: Set(permission_id),
        name: Set(name.to_string()),
    };
    Permission::insert(permission).exec(db).await.unwrap();
    permission_id
}
