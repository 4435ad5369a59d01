use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryType {
    Income,
    Expense,
}

impl EntryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Lenient parse used for stored values and CLI flags. Anything that is
    /// not recognizably income is treated as an expense.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" | "in" | "+" => Self::Income,
            _ => Self::Expense,
        }
    }

    pub fn all() -> &'static [EntryType] {
        &[Self::Expense, Self::Income]
    }

    /// Sign applied to the amount when aggregating.
    pub fn sign(&self) -> Decimal {
        match self {
            Self::Income => Decimal::ONE,
            Self::Expense => Decimal::NEGATIVE_ONE,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Income => Self::Expense,
            Self::Expense => Self::Income,
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single income or expense record.
///
/// `amount` is always a non-negative magnitude; the sign comes from
/// `entry_type`. An `id` of zero or less marks an entry that has not been
/// persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub id: i64,
    pub description: String,
    pub date: NaiveDate,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub paid: bool,
}

impl Entry {
    pub fn new() -> Self {
        Self {
            id: 0,
            description: String::new(),
            date: Local::now().date_naive(),
            amount: Decimal::ZERO,
            entry_type: EntryType::Expense,
            paid: false,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id <= 0
    }

    pub fn is_income(&self) -> bool {
        self.entry_type == EntryType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.entry_type == EntryType::Expense
    }

    pub fn signed_amount(&self) -> Decimal {
        self.amount * self.entry_type.sign()
    }
}

impl Default for Entry {
    fn default() -> Self {
        Self::new()
    }
}
