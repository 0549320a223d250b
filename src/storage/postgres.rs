use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::debug;

use super::{next_record_id, RecordStore};
use crate::records::{
    repo,
    repo_types::{NewRecord, Record},
};

#[derive(Clone)]
pub struct PgRecordStore {
    db: PgPool,
}

impl PgRecordStore {
    pub async fn connect(database_url: &str, max_connections: u32) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub fn pool(&self) -> &PgPool {
        &self.db
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Record>> {
        repo::list_all(&self.db).await
    }

    async fn create_one(&self, record: &NewRecord) -> anyhow::Result<String> {
        let record = record.clone().with_id(next_record_id());
        repo::insert(&self.db, &record).await?;
        Ok(record.id)
    }

    async fn replace_all(&self, records: &[Record]) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let removed = repo::delete_all_tx(&mut tx).await?;
        for record in records {
            repo::insert_tx(&mut tx, record).await?;
        }
        tx.commit().await.context("commit tx")?;
        debug!(removed, written = records.len(), "users replaced");
        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> anyhow::Result<()> {
        if ids.is_empty() {
            return Ok(());
        }
        let removed = repo::delete_by_ids(&self.db, ids).await?;
        debug!(requested = ids.len(), removed, "users deleted");
        Ok(())
    }
}
