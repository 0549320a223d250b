use std::{
    sync::atomic::{AtomicBool, AtomicU64, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{next_record_id, RecordStore};
use crate::records::repo_types::{NewRecord, Record};

/// Process-local record store. Used when no database is configured and as the
/// fake backend in tests, where reads and writes can be made to fail or stall.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    latency_ms: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Copy of what is currently persisted.
    pub async fn persisted(&self) -> Vec<Record> {
        self.records.lock().await.clone()
    }

    async fn stall(&self) {
        let ms = self.latency_ms.load(Ordering::SeqCst);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    fn check_write(&self, op: &str) -> anyhow::Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            anyhow::bail!("memory store: {op} rejected");
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_all(&self) -> anyhow::Result<Vec<Record>> {
        self.stall().await;
        if self.fail_reads.load(Ordering::SeqCst) {
            anyhow::bail!("memory store: load_all rejected");
        }
        Ok(self.records.lock().await.clone())
    }

    async fn create_one(&self, record: &NewRecord) -> anyhow::Result<String> {
        self.stall().await;
        self.check_write("create_one")?;
        let record = record.clone().with_id(next_record_id());
        let id = record.id.clone();
        self.records.lock().await.push(record);
        Ok(id)
    }

    async fn replace_all(&self, records: &[Record]) -> anyhow::Result<()> {
        self.stall().await;
        self.check_write("replace_all")?;
        *self.records.lock().await = records.to_vec();
        Ok(())
    }

    async fn delete_many(&self, ids: &[String]) -> anyhow::Result<()> {
        self.stall().await;
        self.check_write("delete_many")?;
        self.records.lock().await.retain(|r| !ids.contains(&r.id));
        Ok(())
    }
}
