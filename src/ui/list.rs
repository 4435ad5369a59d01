use crate::db::Datasource;
use crate::ledger::Totals;
use crate::models::Entry;

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ListState {
    pub(crate) loading: bool,
    pub(crate) load_failed: bool,
    pub(crate) entries: Vec<Entry>,
}

/// State behind the entry list screen.
#[derive(Default)]
pub(crate) struct EntryList {
    state: ListState,
}

impl EntryList {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> &ListState {
        &self.state
    }

    pub(crate) fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    /// Reload every entry. A failure keeps the previous entries and raises
    /// `load_failed`; calling `load` again is the retry.
    pub(crate) fn load(&mut self, ds: &dyn Datasource) {
        self.state = ListState {
            loading: true,
            load_failed: false,
            ..self.state.clone()
        };

        self.state = match ds.list_all() {
            Ok(entries) => {
                tracing::debug!(count = entries.len(), "entries loaded");
                ListState {
                    loading: false,
                    load_failed: false,
                    entries,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load entries");
                ListState {
                    loading: false,
                    load_failed: true,
                    ..self.state.clone()
                }
            }
        };
    }

    pub(crate) fn totals(&self) -> Totals {
        Totals::of(&self.state.entries)
    }
}
