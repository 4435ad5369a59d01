//! Field validation for entry forms.
//!
//! Both validators are total: every input string maps to either a value or a
//! [`ValidationError`], never a panic.

use rust_decimal::Decimal;
use thiserror::Error;

/// Why a form field was rejected. The message is shown under the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description is required")]
    EmptyDescription,
    #[error("Amount is required")]
    EmptyAmount,
    #[error("Amount must be a non-negative number")]
    InvalidAmount,
}

pub fn validate_description(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        Err(ValidationError::EmptyDescription)
    } else {
        Ok(())
    }
}

/// Validate an amount typed by the user and return its parsed magnitude.
///
/// `,` is accepted as the decimal separator and is rewritten to `.` before
/// parsing, so `"10,5"` and `"10.5"` are equivalent. Since every comma
/// becomes a point, grouped input such as `"1.000,50"` is rejected. Digit
/// separators (`_`) and input that would need rounding are rejected too.
pub fn validate_amount(text: &str) -> Result<Decimal, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyAmount);
    }

    let normalized = trimmed.replace(',', ".");
    if normalized.contains('_') {
        return Err(ValidationError::InvalidAmount);
    }
    let parsed =
        Decimal::from_str_exact(&normalized).map_err(|_| ValidationError::InvalidAmount)?;
    if parsed < Decimal::ZERO {
        return Err(ValidationError::InvalidAmount);
    }
    Ok(parsed.abs())
}

/// Check both text fields of an entry form, description first.
pub fn validate_entry_fields(
    description: &str,
    amount: &str,
) -> Result<Decimal, ValidationError> {
    validate_description(description)?;
    validate_amount(amount)
}
