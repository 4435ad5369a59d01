use rust_decimal::Decimal;

use crate::models::Entry;

/// Sum of signed amounts over entries already marked as paid.
pub fn compute_balance(entries: &[Entry]) -> Decimal {
    signed_sum(entries.iter().filter(|e| e.paid))
}

/// Sum of signed amounts over every entry, paid or not.
pub fn compute_projection(entries: &[Entry]) -> Decimal {
    signed_sum(entries.iter())
}

// Incomes and expenses are summed apart so saturation cannot make the
// result depend on entry order.
fn signed_sum<'a>(entries: impl Iterator<Item = &'a Entry>) -> Decimal {
    let (income, expense) = entries.fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), e| {
        if e.is_income() {
            (inc.saturating_add(e.amount), exp)
        } else {
            (inc, exp.saturating_add(e.amount))
        }
    });
    income.saturating_sub(expense)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub balance: Decimal,
    pub projection: Decimal,
}

impl Totals {
    pub fn of(entries: &[Entry]) -> Self {
        Self {
            balance: compute_balance(entries),
            projection: compute_projection(entries),
        }
    }

    /// Amount still pending: what the projection adds on top of the balance.
    pub fn pending(&self) -> Decimal {
        self.projection.saturating_sub(self.balance)
    }
}

#[cfg(test)]
mod tests;
