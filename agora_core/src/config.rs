use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::StartupError;

static DATA_DIR_NAME: &str = "agora";
static AGORA_DB_NAME: &str = "agora_db.sqlite";
static CONFIG_FILE_NAME: &str = "config.json";
static DATABASE_URL_ENV: &str = "AGORA_DATABASE_URL";

// data_dir_path
// |- agora
//    |- agora_db.sqlite
//    |- config.json

fn default_log_filter() -> String {
    "info,sqlx=warn".to_string()
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AgoraConfig {
    /// Any SeaORM connection string. Defaults to a SQLite file next to the config.
    pub database_url: String,

    /// `tracing_subscriber::EnvFilter` directives. `RUST_LOG` wins when set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl AgoraConfig {
    fn new(data_dir: &Path) -> Self {
        let database_path = data_dir.join(AGORA_DB_NAME);

        AgoraConfig {
            database_url: format!("sqlite://{}?mode=rwc", database_path.display()),
            log_filter: default_log_filter(),
        }
    }

    fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.database_url = url;
            }
        }
        self
    }
}

/// Gets the existing config or initializes a new one under the platform data directory.
pub async fn get_or_init() -> Result<AgoraConfig, StartupError> {
    let data_dir = dirs::data_dir().ok_or(StartupError::NoDataDir)?;
    load_or_create(&data_dir.join(DATA_DIR_NAME)).await
}

pub(crate) async fn load_or_create(agora_dir: &Path) -> Result<AgoraConfig, StartupError> {
    let config_path: PathBuf = agora_dir.join(CONFIG_FILE_NAME);

    fs::create_dir_all(agora_dir).await?;

    let config = if fs::try_exists(&config_path).await? {
        let mut file = fs::File::open(&config_path).await?;
        let mut contents = String::new();
        file.read_to_string(&mut contents).await?;

        serde_json::from_str::<AgoraConfig>(&contents)?
    } else {
        let config = AgoraConfig::new(agora_dir);

        let json = serde_json::to_string_pretty(&config)?;
        let mut file = fs::File::create(&config_path).await?;
        file.write_all(json.as_bytes()).await?;

        config
    };

    Ok(config.apply_env())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("agora-config-{name}-{}", uuid::Uuid::now_v7()))
    }

    #[tokio::test]
    async fn test_creates_then_reloads_config() {
        let dir = scratch_dir("roundtrip");

        let created = load_or_create(&dir).await.unwrap();
        assert!(dir.join(CONFIG_FILE_NAME).exists());
        assert!(created.database_url.starts_with("sqlite://"));

        let reloaded = load_or_create(&dir).await.unwrap();
        assert_eq!(created.log_filter, reloaded.log_filter);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_missing_log_filter_uses_default() {
        let dir = scratch_dir("defaults");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CONFIG_FILE_NAME),
            r#"{ "database_url": "sqlite::memory:" }"#,
        )
        .unwrap();

        let config = load_or_create(&dir).await.unwrap();
        assert_eq!(config.log_filter, default_log_filter());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_malformed_config_is_an_error() {
        let dir = scratch_dir("malformed");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(CONFIG_FILE_NAME), "{ nope").unwrap();

        let result = load_or_create(&dir).await;
        assert!(matches!(result, Err(StartupError::ConfigJson(_))));

        std::fs::remove_dir_all(&dir).ok();
    }
}
