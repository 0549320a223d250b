use async_trait::async_trait;

use crate::records::repo_types::{NewRecord, Record};

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgRecordStore;

/// Persistence boundary for user records.
///
/// The controller never sees schema shape, key generation or batch semantics;
/// everything store-specific stays behind this trait.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record, in arrival order.
    async fn load_all(&self) -> anyhow::Result<Vec<Record>>;
    /// Persist a new record and return the id the store assigned to it.
    async fn create_one(&self, record: &NewRecord) -> anyhow::Result<String>;
    /// Overwrite the whole collection with `records`.
    async fn replace_all(&self, records: &[Record]) -> anyhow::Result<()>;
    async fn delete_many(&self, ids: &[String]) -> anyhow::Result<()>;
}

/// Time-ordered record id, so sorting by id gives arrival order.
pub(crate) fn next_record_id() -> String {
    uuid::Uuid::now_v7().to_string()
}
