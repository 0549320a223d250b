use crate::records::repo_types::Record;

/// The single authenticated identity, if any.
///
/// Holds its own copy of the record taken at login time, so later edits to the
/// collection do not show through until the session is re-established.
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<Record>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Record> {
        self.current.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_current(&self, id: &str) -> bool {
        self.current.as_ref().is_some_and(|r| r.id == id)
    }

    /// Replaces any existing session.
    pub fn establish(&mut self, record: Record) {
        self.current = Some(record);
    }

    /// Returns the session that was dropped.
    pub fn clear(&mut self) -> Option<Record> {
        self.current.take()
    }
}
