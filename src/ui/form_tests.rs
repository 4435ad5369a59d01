#![allow(clippy::unwrap_used)]

use chrono::{Local, NaiveDate};
use rust_decimal_macros::dec;

use super::form::*;
use crate::db::{Datasource, MemoryStore};
use crate::models::{Entry, EntryType};
use crate::validate::ValidationError;

fn stored_rent() -> (MemoryStore, i64) {
    let rent = Entry {
        id: 0,
        description: "Aluguel".into(),
        date: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
        amount: dec!(1500.0),
        entry_type: EntryType::Expense,
        paid: true,
    };
    let mut store = MemoryStore::new();
    let id = store.save(&rent).unwrap();
    store.calls.set(0);
    (store, id)
}

fn fill_valid(form: &mut EntryForm) {
    form.on_description_changed("Salário");
    form.on_amount_changed("5000,00");
}

// ── Defaults & loading ────────────────────────────────────────

#[test]
fn test_new_form_defaults() {
    let store = MemoryStore::new();
    let form = EntryForm::open(0, &store);
    let state = form.state();

    assert!(state.is_new());
    assert!(!state.loading);
    assert!(!state.load_failed);
    assert_eq!(state.description.value, "");
    assert_eq!(state.amount.value, "");
    assert_eq!(state.date, Local::now().date_naive());
    assert!(!state.paid);
    assert_eq!(state.entry_type, EntryType::Expense);
    assert_eq!(store.calls.get(), 0, "a new entry is not loaded");
}

#[test]
fn test_open_existing_fills_fields() {
    let (store, id) = stored_rent();
    let form = EntryForm::open(id, &store);
    let state = form.state();

    assert!(!state.is_new());
    assert!(!state.loading);
    assert!(!state.load_failed);
    assert_eq!(state.entry.id, id);
    assert_eq!(state.description.value, "Aluguel");
    assert_eq!(state.amount.value, "1500.0");
    assert_eq!(state.date, NaiveDate::from_ymd_opt(2024, 9, 10).unwrap());
    assert!(state.paid);
    assert_eq!(state.entry_type, EntryType::Expense);
    assert!(state.is_valid());
}

#[test]
fn test_open_missing_entry_is_load_failure() {
    let store = MemoryStore::new();
    let form = EntryForm::open(7, &store);
    assert!(form.state().load_failed);
    assert!(!form.state().loading);
}

#[test]
fn test_datasource_error_is_load_failure() {
    let store = MemoryStore::failing();
    let form = EntryForm::open(1, &store);
    assert!(form.state().load_failed);
}

#[test]
fn test_retry_after_load_failure() {
    let (mut store, id) = stored_rent();
    store.fail = true;
    let mut form = EntryForm::open(id, &store);
    assert!(form.state().load_failed);

    store.fail = false;
    form.load(&store);
    assert!(!form.state().load_failed);
    assert_eq!(form.state().description.value, "Aluguel");
}

#[test]
fn test_save_after_load_failure_does_not_insert() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::open(7, &store);
    fill_valid(&mut form);
    store.calls.set(0);

    assert!(!form.save(&mut store));
    assert_eq!(store.calls.get(), 0);
    assert_eq!(store.len(), 0);
    assert!(!form.state().persisted_or_removed);
}

#[test]
fn test_remove_after_load_failure_is_noop() {
    let (mut store, id) = stored_rent();
    store.fail = true;
    let mut form = EntryForm::open(id, &store);
    store.fail = false;
    store.calls.set(0);

    form.show_delete_confirm();
    assert!(!form.remove(&mut store));
    assert_eq!(store.calls.get(), 0);
    assert_eq!(store.len(), 1);
    assert!(form.state().message.is_none());
    assert!(!form.state().show_delete_confirm);
}

// ── Field updates ─────────────────────────────────────────────

#[test]
fn test_description_change_validates() {
    let mut form = EntryForm::new(0);
    form.on_description_changed("   ");
    assert_eq!(
        form.state().description.error,
        Some(ValidationError::EmptyDescription)
    );
    form.on_description_changed("Rent");
    assert_eq!(form.state().description.value, "Rent");
    assert!(form.state().description.is_valid());
}

#[test]
fn test_amount_change_validates() {
    let mut form = EntryForm::new(0);
    form.on_amount_changed("abc");
    assert_eq!(form.state().amount.error, Some(ValidationError::InvalidAmount));
    form.on_amount_changed("-1");
    assert_eq!(form.state().amount.error, Some(ValidationError::InvalidAmount));
    form.on_amount_changed("");
    assert_eq!(form.state().amount.error, Some(ValidationError::EmptyAmount));
    form.on_amount_changed("12,34");
    assert!(form.state().amount.is_valid());
}

#[test]
fn test_unchanged_value_keeps_snapshot() {
    let mut form = EntryForm::new(0);
    let before = form.state().clone();
    // Same (empty) value: no validation error gets attached.
    form.on_description_changed("");
    form.on_amount_changed("");
    assert_eq!(*form.state(), before);
    assert!(form.state().description.error.is_none());
}

#[test]
fn test_closed_set_fields() {
    let mut form = EntryForm::new(0);
    let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    form.on_date_changed(date);
    form.on_paid_changed(true);
    form.on_type_changed(EntryType::Income);
    let state = form.state();
    assert_eq!(state.date, date);
    assert!(state.paid);
    assert_eq!(state.entry_type, EntryType::Income);
}

// ── Saving ────────────────────────────────────────────────────

#[test]
fn test_save_new_entry_persists() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::open(0, &store);
    fill_valid(&mut form);
    form.on_type_changed(EntryType::Income);
    form.on_paid_changed(true);

    assert!(form.save(&mut store));
    let state = form.state();
    assert!(state.persisted_or_removed);
    assert!(!state.saving);
    assert!(!state.is_new());
    assert_eq!(state.entry.id, state.entry_id);

    let saved = store.load(state.entry_id).unwrap().unwrap();
    assert_eq!(saved.description, "Salário");
    assert_eq!(saved.amount, dec!(5000.00));
    assert_eq!(saved.entry_type, EntryType::Income);
    assert!(saved.paid);
}

#[test]
fn test_save_invalid_does_not_touch_datasource() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::new(0);
    form.on_amount_changed("12");

    assert!(!form.save(&mut store));
    assert_eq!(store.calls.get(), 0);
    assert_eq!(store.len(), 0);
    assert!(!form.state().persisted_or_removed);
    assert_eq!(
        form.state().description.error,
        Some(ValidationError::EmptyDescription)
    );
}

#[test]
fn test_save_untouched_form_flags_both_fields() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::new(0);

    assert!(!form.save(&mut store));
    assert_eq!(
        form.state().description.error,
        Some(ValidationError::EmptyDescription)
    );
    assert_eq!(form.state().amount.error, Some(ValidationError::EmptyAmount));
    assert_eq!(store.calls.get(), 0);
}

#[test]
fn test_save_existing_updates_in_place() {
    let (mut store, id) = stored_rent();
    let mut form = EntryForm::open(id, &store);
    form.on_amount_changed("1550");
    form.on_paid_changed(false);

    assert!(form.save(&mut store));
    assert_eq!(form.state().entry_id, id);
    assert_eq!(store.len(), 1);
    let updated = store.load(id).unwrap().unwrap();
    assert_eq!(updated.amount, dec!(1550));
    assert!(!updated.paid);
    assert_eq!(updated.description, "Aluguel");
}

#[test]
fn test_save_failure_reports_message() {
    let mut store = MemoryStore::failing();
    let mut form = EntryForm::new(0);
    fill_valid(&mut form);

    assert!(!form.save(&mut store));
    let state = form.state();
    assert!(!state.saving);
    assert!(!state.persisted_or_removed);
    assert!(state
        .message
        .as_deref()
        .is_some_and(|m| m.starts_with("Could not save entry")));
}

// ── Deleting ──────────────────────────────────────────────────

#[test]
fn test_delete_confirm_toggle() {
    let mut form = EntryForm::new(3);
    form.show_delete_confirm();
    assert!(form.state().show_delete_confirm);
    form.hide_delete_confirm();
    assert!(!form.state().show_delete_confirm);
}

#[test]
fn test_remove_existing() {
    let (mut store, id) = stored_rent();
    let mut form = EntryForm::open(id, &store);
    form.show_delete_confirm();

    assert!(form.remove(&mut store));
    let state = form.state();
    assert!(state.persisted_or_removed);
    assert!(!state.deleting);
    assert!(!state.show_delete_confirm);
    assert!(store.load(id).unwrap().is_none());
}

#[test]
fn test_remove_new_entry_is_noop() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::new(0);
    assert!(!form.remove(&mut store));
    assert_eq!(store.calls.get(), 0);
    assert!(!form.state().persisted_or_removed);
}

#[test]
fn test_message_shown_clears_message() {
    let mut store = MemoryStore::new();
    let mut form = EntryForm::new(0);
    fill_valid(&mut form);
    form.save(&mut store);
    assert!(form.state().message.is_some());
    form.on_message_shown();
    assert!(form.state().message.is_none());
}
