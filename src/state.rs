use crate::config::{AppConfig, ServerConfig};
use crate::records::controller::RecordCollectionController;
use crate::storage::{MemoryStore, PgRecordStore, RecordStore};
use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    /// Single writer: every command runs under this lock.
    pub controller: Arc<Mutex<RecordCollectionController>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let store = match config.database_url.as_deref() {
            Some(url) => {
                let pg = PgRecordStore::connect(url, config.db_max_connections).await?;

                sqlx::migrate!("./migrations")
                    .run(pg.pool())
                    .await
                    .context("run migrations")?;
                Arc::new(pg) as Arc<dyn RecordStore>
            }
            None => {
                tracing::warn!("DATABASE_URL not set; records live in memory only");
                Arc::new(MemoryStore::new()) as Arc<dyn RecordStore>
            }
        };

        let state = Self::from_parts(config, store);
        let count = state
            .controller
            .lock()
            .await
            .load()
            .await
            .context("initial record load")?
            .len();
        tracing::info!(count, "record collection ready");
        Ok(state)
    }

    pub fn from_parts(config: Arc<AppConfig>, store: Arc<dyn RecordStore>) -> Self {
        let controller = RecordCollectionController::new(store, config.store_timeout);
        Self {
            config,
            controller: Arc::new(Mutex::new(controller)),
        }
    }

    /// In-memory state for tests.
    pub fn fake() -> Self {
        let config = Arc::new(AppConfig {
            database_url: None,
            db_max_connections: 1,
            store_timeout: Duration::from_secs(1),
            server: ServerConfig {
                host: "127.0.0.1".into(),
                port: 0,
            },
        });
        Self::from_parts(config, Arc::new(MemoryStore::new()))
    }
}
