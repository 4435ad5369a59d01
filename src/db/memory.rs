use anyhow::Result;
use std::cell::Cell;

use super::Datasource;
use crate::models::Entry;

/// In-memory datasource for exercising the screens without SQLite.
///
/// Counts every call so tests can assert that the datasource was (or was
/// not) touched, and can be switched into a failing mode.
#[derive(Default)]
pub(crate) struct MemoryStore {
    entries: Vec<Entry>,
    next_id: i64,
    pub(crate) calls: Cell<usize>,
    pub(crate) fail: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_entries(entries: Vec<Entry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry);
        }
        store
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    fn insert(&mut self, mut entry: Entry) -> i64 {
        self.next_id += 1;
        entry.id = self.next_id;
        self.entries.push(entry);
        self.next_id
    }

    fn touch(&self) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            anyhow::bail!("datasource unavailable");
        }
        Ok(())
    }
}

impl Datasource for MemoryStore {
    fn load(&self, id: i64) -> Result<Option<Entry>> {
        self.touch()?;
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    fn save(&mut self, entry: &Entry) -> Result<i64> {
        self.touch()?;
        if entry.is_new() {
            return Ok(self.insert(entry.clone()));
        }
        if let Some(existing) = self.entries.iter_mut().find(|e| e.id == entry.id) {
            *existing = entry.clone();
        }
        Ok(entry.id)
    }

    fn delete(&mut self, entry: &Entry) -> Result<()> {
        self.touch()?;
        self.entries.retain(|e| e.id != entry.id);
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        self.touch()?;
        let mut all = self.entries.clone();
        all.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        Ok(all)
    }
}
