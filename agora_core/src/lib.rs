pub mod entity;
pub mod ids;
pub mod models;
use tokio::sync::OnceCell;

use std::sync::Arc;

use sea_orm::{DatabaseConnection, DbErr};
use tracing::info;

use crate::error::StartupError;
use crate::service::{
    cascade::CascadeDeleter, classrooms::ClassroomsService, discussions::DiscussionsService,
    forums::ForumsService, groups::GroupsService, permissions::PermissionsService,
    roles::RolesService,
};

pub mod service;

pub mod error;

pub mod config;

pub mod context;

pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

static AGORA_CORE: OnceCell<Arc<AgoraCore>> = OnceCell::const_new();

/// Process-wide handle, started on first use.
pub async fn core() -> Result<Arc<AgoraCore>, StartupError> {
    AGORA_CORE
        .get_or_try_init(|| async move { AgoraCore::start().await.map(Arc::new) })
        .await
        .cloned()
}

/// Main runtime handle for Agora.
pub struct AgoraCore {
    pub config: config::AgoraConfig,

    pub db: DatabaseConnection,

    pub groups: GroupsService,
    pub forums: ForumsService,
    pub discussions: DiscussionsService,
    pub classrooms: ClassroomsService,
    pub roles: RolesService,
    pub permissions: PermissionsService,
    pub cascade: CascadeDeleter,
}

impl AgoraCore {
    pub async fn start() -> Result<Self, StartupError> {
        let config = config::get_or_init().await?;
        telemetry::init_tracing(&config.log_filter);
        info!("starting agora core");

        // DB + migrations
        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        Ok(Self::from_connection(config, db))
    }

    /// Wires the services over an existing, already migrated connection.
    pub fn from_connection(config: config::AgoraConfig, db: DatabaseConnection) -> Self {
        Self {
            groups: GroupsService::new(db.clone()),
            forums: ForumsService::new(db.clone()),
            discussions: DiscussionsService::new(db.clone()),
            classrooms: ClassroomsService::new(db.clone()),
            roles: RolesService::new(db.clone()),
            permissions: PermissionsService::new(db.clone()),
            cascade: CascadeDeleter::new(db.clone()),
            config,
            db,
        }
    }

    pub async fn shutdown(self) -> Result<(), DbErr> {
        self.db.close().await
    }
}

pub mod prelude {
    pub use super::ids;
    pub use super::entity;
    pub use super::models;

    pub use super::service;
    pub use super::service::discussions::{Container, NewAttachment, NewThread, PostRemoval};
    pub use super::service::groups::GroupVariant;
    pub use super::service::roles::DeleteOutcome;

    pub use super::context::RequestContext;
    pub use super::error::{CoreError, CoreResult};

    pub use super::config;

    pub use super::AgoraCore;
}
