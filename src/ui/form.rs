use chrono::NaiveDate;

use crate::db::Datasource;
use crate::models::{Entry, EntryType};
use crate::validate::{validate_amount, validate_description, validate_entry_fields, ValidationError};

/// A text field and the reason it was last rejected, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct FormField {
    pub(crate) value: String,
    pub(crate) error: Option<ValidationError>,
}

impl FormField {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            error: None,
        }
    }

    pub(crate) fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.has_error()
    }
}

/// Snapshot of the entry form. Handlers never mutate a snapshot in place;
/// they build the next one and swap it in.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FormState {
    pub(crate) entry_id: i64,
    pub(crate) loading: bool,
    pub(crate) entry: Entry,
    pub(crate) load_failed: bool,
    pub(crate) saving: bool,
    pub(crate) show_delete_confirm: bool,
    pub(crate) deleting: bool,
    pub(crate) persisted_or_removed: bool,
    pub(crate) message: Option<String>,
    pub(crate) description: FormField,
    pub(crate) amount: FormField,
    pub(crate) date: NaiveDate,
    pub(crate) paid: bool,
    pub(crate) entry_type: EntryType,
}

impl FormState {
    pub(crate) fn new(entry_id: i64) -> Self {
        let entry = Entry::new();
        Self {
            entry_id,
            loading: false,
            load_failed: false,
            saving: false,
            show_delete_confirm: false,
            deleting: false,
            persisted_or_removed: false,
            message: None,
            description: FormField::default(),
            amount: FormField::default(),
            date: entry.date,
            paid: entry.paid,
            entry_type: entry.entry_type,
            entry,
        }
    }

    pub(crate) fn is_new(&self) -> bool {
        self.entry_id <= 0
    }

    /// Date, paid and type come from closed sets, so only the text fields
    /// can make the form invalid.
    pub(crate) fn is_valid(&self) -> bool {
        self.description.is_valid() && self.amount.is_valid()
    }
}

pub(crate) struct EntryForm {
    state: FormState,
}

impl EntryForm {
    pub(crate) fn new(entry_id: i64) -> Self {
        Self {
            state: FormState::new(entry_id),
        }
    }

    /// Open the form for `entry_id`, loading it when it refers to a stored entry.
    pub(crate) fn open(entry_id: i64, ds: &dyn Datasource) -> Self {
        let mut form = Self::new(entry_id);
        if !form.state.is_new() {
            form.load(ds);
        }
        form
    }

    pub(crate) fn state(&self) -> &FormState {
        &self.state
    }

    fn set(&mut self, next: FormState) {
        self.state = next;
    }

    pub(crate) fn load(&mut self, ds: &dyn Datasource) {
        self.set(FormState {
            loading: true,
            load_failed: false,
            ..self.state.clone()
        });

        let loaded = match ds.load(self.state.entry_id) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!(id = self.state.entry_id, error = %e, "failed to load entry");
                None
            }
        };

        let next = match loaded {
            None => FormState {
                loading: false,
                load_failed: true,
                ..self.state.clone()
            },
            Some(entry) => FormState {
                loading: false,
                description: FormField::new(entry.description.clone()),
                amount: FormField::new(entry.amount.to_string()),
                date: entry.date,
                paid: entry.paid,
                entry_type: entry.entry_type,
                entry,
                ..self.state.clone()
            },
        };
        self.set(next);
    }

    pub(crate) fn on_description_changed(&mut self, text: &str) {
        if self.state.description.value == text {
            return;
        }
        self.set(FormState {
            description: FormField {
                value: text.to_string(),
                error: validate_description(text).err(),
            },
            ..self.state.clone()
        });
    }

    pub(crate) fn on_amount_changed(&mut self, text: &str) {
        if self.state.amount.value == text {
            return;
        }
        self.set(FormState {
            amount: FormField {
                value: text.to_string(),
                error: validate_amount(text).err(),
            },
            ..self.state.clone()
        });
    }

    pub(crate) fn on_date_changed(&mut self, date: NaiveDate) {
        if self.state.date != date {
            self.set(FormState {
                date,
                ..self.state.clone()
            });
        }
    }

    pub(crate) fn on_paid_changed(&mut self, paid: bool) {
        if self.state.paid != paid {
            self.set(FormState {
                paid,
                ..self.state.clone()
            });
        }
    }

    pub(crate) fn on_type_changed(&mut self, entry_type: EntryType) {
        if self.state.entry_type != entry_type {
            self.set(FormState {
                entry_type,
                ..self.state.clone()
            });
        }
    }

    /// Validate every field and persist the entry. Returns `true` once the
    /// entry has been written; an invalid form never reaches the datasource.
    pub(crate) fn save(&mut self, ds: &mut dyn Datasource) -> bool {
        // Without the stored entry an update would turn into an insert.
        if self.state.load_failed || self.state.loading {
            return false;
        }
        if !self.validate_all() {
            return false;
        }
        let amount = match validate_entry_fields(
            &self.state.description.value,
            &self.state.amount.value,
        ) {
            Ok(amount) => amount,
            Err(_) => return false,
        };

        self.set(FormState {
            saving: true,
            ..self.state.clone()
        });

        let entry = Entry {
            description: self.state.description.value.clone(),
            date: self.state.date,
            amount,
            entry_type: self.state.entry_type,
            paid: self.state.paid,
            ..self.state.entry.clone()
        };

        let next = match ds.save(&entry) {
            Ok(id) => {
                tracing::info!(id, new = entry.is_new(), "entry saved");
                FormState {
                    entry_id: id,
                    entry: Entry { id, ..entry },
                    saving: false,
                    persisted_or_removed: true,
                    message: Some("Entry saved".into()),
                    ..self.state.clone()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to save entry");
                FormState {
                    saving: false,
                    message: Some(format!("Could not save entry: {e}")),
                    ..self.state.clone()
                }
            }
        };
        let saved = next.persisted_or_removed;
        self.set(next);
        saved
    }

    fn validate_all(&mut self) -> bool {
        let description_error = validate_description(&self.state.description.value).err();
        let amount_error = validate_amount(&self.state.amount.value).err();
        self.set(FormState {
            description: FormField {
                error: description_error,
                ..self.state.description.clone()
            },
            amount: FormField {
                error: amount_error,
                ..self.state.amount.clone()
            },
            ..self.state.clone()
        });
        self.state.is_valid()
    }

    pub(crate) fn show_delete_confirm(&mut self) {
        self.set(FormState {
            show_delete_confirm: true,
            ..self.state.clone()
        });
    }

    pub(crate) fn hide_delete_confirm(&mut self) {
        self.set(FormState {
            show_delete_confirm: false,
            ..self.state.clone()
        });
    }

    /// Delete the loaded entry. An entry that was never stored, or failed to
    /// load, has nothing to delete, so the datasource is left alone.
    pub(crate) fn remove(&mut self, ds: &mut dyn Datasource) -> bool {
        if self.state.is_new() || self.state.load_failed || self.state.entry.is_new() {
            self.hide_delete_confirm();
            return false;
        }

        self.set(FormState {
            show_delete_confirm: false,
            deleting: true,
            ..self.state.clone()
        });

        let next = match ds.delete(&self.state.entry) {
            Ok(()) => {
                tracing::info!(id = self.state.entry.id, "entry removed");
                FormState {
                    deleting: false,
                    persisted_or_removed: true,
                    message: Some("Entry deleted".into()),
                    ..self.state.clone()
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to delete entry");
                FormState {
                    deleting: false,
                    message: Some(format!("Could not delete entry: {e}")),
                    ..self.state.clone()
                }
            }
        };
        let removed = next.persisted_or_removed;
        self.set(next);
        removed
    }

    pub(crate) fn on_message_shown(&mut self) {
        self.set(FormState {
            message: None,
            ..self.state.clone()
        });
    }
}
