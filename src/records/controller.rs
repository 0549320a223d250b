use std::{future::Future, sync::Arc, time::Duration};

use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::{
    auth::{
        dto::{AuthFailure, LoginDraft, RegistrationDraft},
        session::SessionManager,
    },
    error::ControllerError,
    records::{
        dto::{BulkOutcome, Snapshot},
        repo_types::{NewRecord, Record, RecordStatus},
        selection::SelectionSet,
    },
    storage::RecordStore,
};

/// Owns the authoritative record collection together with the selection and
/// the session, and keeps the three consistent across store mutations.
///
/// In-memory state changes only after the store call it depends on has
/// succeeded. Callers must serialize access (the HTTP layer keeps it behind a
/// single mutex): block and unblock are read-modify-write over the whole
/// collection, and concurrent callers would silently overwrite each other.
pub struct RecordCollectionController {
    store: Arc<dyn RecordStore>,
    store_timeout: Duration,
    records: Vec<Record>,
    selection: SelectionSet,
    session: SessionManager,
}

impl RecordCollectionController {
    pub fn new(store: Arc<dyn RecordStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            store_timeout,
            records: Vec::new(),
            selection: SelectionSet::new(),
            session: SessionManager::new(),
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn current_user(&self) -> Option<&Record> {
        self.session.current()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            records: self.records.clone(),
            selected: self.selection.ids().to_vec(),
            session: self.session.current().cloned(),
        }
    }

    /// Replace the collection with whatever the store holds.
    ///
    /// On failure the collection is left empty rather than stale.
    pub async fn load(&mut self) -> Result<&[Record], ControllerError> {
        let loaded = bounded(self.store_timeout, "load_all", self.store.load_all()).await;
        let records = match loaded {
            Ok(records) => records,
            Err(e) => {
                self.records.clear();
                self.selection.clear();
                return Err(ControllerError::StoreUnavailable(e));
            }
        };

        self.records = records;
        let records = &self.records;
        self.selection
            .retain(|id| records.iter().any(|r| r.id == id));
        if let Some(current) = self.session.current() {
            if !records.iter().any(|r| r.id == current.id) {
                warn!(record_id = %current.id, "session record vanished from store; logging out");
                self.session.clear();
            }
        }

        info!(count = self.records.len(), "records loaded");
        Ok(&self.records)
    }

    pub async fn register(
        &mut self,
        draft: &mut RegistrationDraft,
    ) -> Result<Record, ControllerError> {
        if draft.is_empty() {
            return Err(ControllerError::InvalidDraft("registration draft"));
        }

        let new = NewRecord {
            name: draft.name.clone(),
            email: draft.email.clone(),
            password: draft.password.clone(),
            registration_date: today(),
            status: RecordStatus::Active,
        };
        let id = bounded(self.store_timeout, "create_one", self.store.create_one(&new))
            .await
            .map_err(ControllerError::StoreWriteFailure)?;

        let record = new.with_id(id);
        self.records.push(record.clone());
        draft.clear();

        info!(record_id = %record.id, email = %record.email, "record registered");
        Ok(record)
    }

    /// Match credentials against the loaded collection, not the store, so a
    /// record blocked by another client still logs in until the next load.
    pub fn login(&mut self, draft: &LoginDraft) -> Result<Record, AuthFailure> {
        let Some(found) = self
            .records
            .iter()
            .find(|r| r.email == draft.email && r.password == draft.password)
        else {
            warn!(email = %draft.email, "login unknown credentials");
            return Err(AuthFailure::not_found());
        };

        if found.is_blocked() {
            warn!(record_id = %found.id, "login refused for blocked record");
            return Err(AuthFailure::blocked());
        }

        // The stamp lives on the session copy only; it is never written back.
        let session = Record {
            last_login: Some(today()),
            ..found.clone()
        };
        self.session.establish(session.clone());

        info!(record_id = %session.id, name = %session.name, "logged in");
        Ok(session)
    }

    pub fn logout(&mut self) {
        self.selection.clear();
        if let Some(ended) = self.session.clear() {
            info!(record_id = %ended.id, "logged out");
        }
    }

    /// Returns whether `id` is selected afterwards.
    pub fn toggle_selection(&mut self, id: &str) -> Result<bool, ControllerError> {
        if !self.records.iter().any(|r| r.id == id) {
            return Err(ControllerError::UnknownRecord(id.to_string()));
        }
        Ok(self.selection.toggle(id))
    }

    /// Select every record, or clear the selection if everything already is.
    pub fn select_all(&mut self) -> usize {
        if self.selection.size() == self.records.len() {
            self.selection.clear();
        } else {
            self.selection
                .select_all(self.records.iter().map(|r| r.id.as_str()));
        }
        self.selection.size()
    }

    pub fn deselect_all(&mut self) {
        self.selection.clear();
    }

    /// Block every selected record, then end the session whoever was blocked.
    pub async fn block_selected(&mut self) -> Result<BulkOutcome, ControllerError> {
        let affected = self.set_selected_status(RecordStatus::Blocked).await?;
        let logged_out = self.session.is_logged_in();
        self.logout();
        info!(affected, "records blocked");
        Ok(BulkOutcome {
            affected,
            logged_out,
        })
    }

    pub async fn unblock_selected(&mut self) -> Result<BulkOutcome, ControllerError> {
        let affected = self.set_selected_status(RecordStatus::Active).await?;
        info!(affected, "records unblocked");
        Ok(BulkOutcome {
            affected,
            logged_out: false,
        })
    }

    pub async fn delete_selected(&mut self) -> Result<BulkOutcome, ControllerError> {
        let ids = self.selection.ids().to_vec();
        bounded(self.store_timeout, "delete_many", self.store.delete_many(&ids))
            .await
            .map_err(ControllerError::StoreWriteFailure)?;

        let before = self.records.len();
        self.records.retain(|r| !ids.contains(&r.id));
        self.selection.clear();

        let logged_out = ids.iter().any(|id| self.session.is_current(id));
        if logged_out {
            self.logout();
        }

        let affected = before - self.records.len();
        info!(affected, logged_out, "records deleted");
        Ok(BulkOutcome {
            affected,
            logged_out,
        })
    }

    /// Rewrites the whole collection with the new status applied to the
    /// selection. Commits to memory only once the store accepted it.
    async fn set_selected_status(&mut self, status: RecordStatus) -> Result<usize, ControllerError> {
        let mut updated = self.records.clone();
        let mut affected = 0;
        for record in updated
            .iter_mut()
            .filter(|r| self.selection.contains(&r.id))
        {
            record.status = status;
            affected += 1;
        }

        bounded(self.store_timeout, "replace_all", self.store.replace_all(&updated))
            .await
            .map_err(ControllerError::StoreWriteFailure)?;

        debug!(%status, affected, total = updated.len(), "collection replaced");
        self.records = updated;
        self.selection.clear();
        Ok(affected)
    }
}

fn today() -> time::Date {
    OffsetDateTime::now_utc().date()
}

/// Runs a store call under the configured timeout. Expiry is reported like
/// any other store error.
///
/// A timed-out write may still have committed in the store while memory stays
/// as it was; a `load()` brings the two back in line.
async fn bounded<T>(
    limit: Duration,
    op: &'static str,
    call: impl Future<Output = anyhow::Result<T>>,
) -> anyhow::Result<T> {
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result.map_err(|e| e.context(op)),
        Err(_) => Err(anyhow::anyhow!("{op} timed out after {limit:?}")),
    }
}
