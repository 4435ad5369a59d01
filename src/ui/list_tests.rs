#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::list::*;
use crate::db::MemoryStore;
use crate::models::{Entry, EntryType};

fn entry(day: u32, entry_type: EntryType, amount: Decimal, paid: bool) -> Entry {
    Entry {
        id: 0,
        description: format!("Entry {day}"),
        date: NaiveDate::from_ymd_opt(2024, 9, day).unwrap(),
        amount,
        entry_type,
        paid,
    }
}

#[test]
fn test_new_list_is_empty() {
    let list = EntryList::new();
    assert!(list.entries().is_empty());
    assert!(!list.state().loading);
    assert!(!list.state().load_failed);
    assert_eq!(list.totals().balance, Decimal::ZERO);
}

#[test]
fn test_load_sorted_with_totals() {
    let store = MemoryStore::with_entries(vec![
        entry(15, EntryType::Expense, dec!(20), false),
        entry(5, EntryType::Income, dec!(100), true),
        entry(10, EntryType::Expense, dec!(40), true),
    ]);
    let mut list = EntryList::new();
    list.load(&store);

    let days: Vec<String> = list.entries().iter().map(|e| e.description.clone()).collect();
    assert_eq!(days, vec!["Entry 5", "Entry 10", "Entry 15"]);
    let totals = list.totals();
    assert_eq!(totals.balance, dec!(60));
    assert_eq!(totals.projection, dec!(40));
}

#[test]
fn test_load_failure_then_retry() {
    let mut store = MemoryStore::with_entries(vec![entry(1, EntryType::Income, dec!(1), true)]);
    store.fail = true;
    let mut list = EntryList::new();
    list.load(&store);
    assert!(list.state().load_failed);
    assert!(!list.state().loading);
    assert!(list.entries().is_empty());

    store.fail = false;
    list.load(&store);
    assert!(!list.state().load_failed);
    assert_eq!(list.entries().len(), 1);
}

#[test]
fn test_failed_reload_keeps_previous_entries() {
    let mut store = MemoryStore::with_entries(vec![entry(1, EntryType::Income, dec!(1), true)]);
    let mut list = EntryList::new();
    list.load(&store);
    store.fail = true;
    list.load(&store);
    assert!(list.state().load_failed);
    assert_eq!(list.entries().len(), 1);
}
