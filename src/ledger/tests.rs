#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::EntryType;

fn entry(entry_type: EntryType, amount: Decimal, paid: bool) -> Entry {
    Entry {
        id: 0,
        description: "Test".into(),
        date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        amount,
        entry_type,
        paid,
    }
}

fn sample() -> Vec<Entry> {
    vec![
        entry(EntryType::Income, dec!(100), true),
        entry(EntryType::Expense, dec!(40), true),
        entry(EntryType::Expense, dec!(20), false),
    ]
}

#[test]
fn test_empty_collection() {
    assert_eq!(compute_balance(&[]), Decimal::ZERO);
    assert_eq!(compute_projection(&[]), Decimal::ZERO);
    assert_eq!(Totals::of(&[]), Totals::default());
}

#[test]
fn test_balance_counts_only_paid() {
    assert_eq!(compute_balance(&sample()), dec!(60));
}

#[test]
fn test_projection_counts_everything() {
    assert_eq!(compute_projection(&sample()), dec!(40));
}

#[test]
fn test_nothing_paid_means_zero_balance() {
    let entries = vec![
        entry(EntryType::Income, dec!(5000), false),
        entry(EntryType::Expense, dec!(1500), false),
    ];
    assert_eq!(compute_balance(&entries), Decimal::ZERO);
    assert_eq!(compute_projection(&entries), dec!(3500));
}

#[test]
fn test_negative_totals() {
    let entries = vec![
        entry(EntryType::Income, dec!(10), true),
        entry(EntryType::Expense, dec!(25.50), true),
        entry(EntryType::Expense, dec!(4.50), false),
    ];
    assert_eq!(compute_balance(&entries), dec!(-15.50));
    assert_eq!(compute_projection(&entries), dec!(-20));
}

#[test]
fn test_salary_rent_condo() {
    let entries = vec![
        entry(EntryType::Income, dec!(5000.0), true),
        entry(EntryType::Expense, dec!(1500.0), true),
        entry(EntryType::Expense, dec!(200.0), false),
    ];
    let totals = Totals::of(&entries);
    assert_eq!(totals.balance, dec!(3500));
    assert_eq!(totals.projection, dec!(3300));
    assert_eq!(totals.pending(), dec!(-200));
}

#[test]
fn test_overflow_saturates() {
    let entries = vec![
        entry(EntryType::Income, Decimal::MAX, true),
        entry(EntryType::Income, Decimal::MAX, true),
    ];
    assert_eq!(compute_balance(&entries), Decimal::MAX);
}

#[test]
fn test_saturated_sum_ignores_order() {
    let mut entries = vec![
        entry(EntryType::Income, Decimal::MAX, true),
        entry(EntryType::Income, Decimal::MAX, true),
        entry(EntryType::Expense, Decimal::MAX, true),
    ];
    let before = compute_balance(&entries);
    entries.rotate_left(2);
    assert_eq!(compute_balance(&entries), before);
    assert_eq!(before, Decimal::ZERO);
}

fn arb_huge_entry() -> impl Strategy<Value = Entry> {
    (
        prop_oneof![Just(Decimal::MAX), Just(Decimal::MAX / dec!(2)), Just(dec!(1))],
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(|(amount, income, paid)| {
            let entry_type = if income {
                EntryType::Income
            } else {
                EntryType::Expense
            };
            entry(entry_type, amount, paid)
        })
}

fn arb_entry() -> impl Strategy<Value = Entry> {
    (0i64..10_000_000, any::<bool>(), any::<bool>()).prop_map(|(cents, income, paid)| {
        let entry_type = if income {
            EntryType::Income
        } else {
            EntryType::Expense
        };
        entry(entry_type, Decimal::new(cents, 2), paid)
    })
}

proptest! {
    #[test]
    fn prop_order_independent(entries in prop::collection::vec(arb_entry(), 0..30)) {
        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(entries.len() / 2);
        }

        let totals = Totals::of(&entries);
        prop_assert_eq!(Totals::of(&reversed), totals);
        prop_assert_eq!(Totals::of(&rotated), totals);
    }

    #[test]
    fn prop_order_independent_near_overflow(entries in prop::collection::vec(arb_huge_entry(), 0..12)) {
        let mut reversed = entries.clone();
        reversed.reverse();
        let mut rotated = entries.clone();
        if !rotated.is_empty() {
            rotated.rotate_left(entries.len() / 3);
        }

        let totals = Totals::of(&entries);
        prop_assert_eq!(Totals::of(&reversed), totals);
        prop_assert_eq!(Totals::of(&rotated), totals);
    }

    #[test]
    fn prop_balance_equals_projection_of_paid(entries in prop::collection::vec(arb_entry(), 0..30)) {
        let paid: Vec<Entry> = entries.iter().filter(|e| e.paid).cloned().collect();
        prop_assert_eq!(compute_balance(&entries), compute_projection(&paid));
    }

    #[test]
    fn prop_all_paid_balance_equals_projection(entries in prop::collection::vec(arb_entry(), 0..30)) {
        let all_paid: Vec<Entry> = entries
            .into_iter()
            .map(|e| Entry { paid: true, ..e })
            .collect();
        prop_assert_eq!(compute_balance(&all_paid), compute_projection(&all_paid));
    }
}
