//! # Amount Input
//!
//! Transaction amounts are whole units of local currency. User input must
//! consist of ASCII digits only (surrounding whitespace is ignored).

use crate::error::{RulesError, RulesResult};

/// Parse a user-supplied amount.
///
/// # Errors
///
/// - [`RulesError::EmptyAmount`] for empty or whitespace-only input.
/// - [`RulesError::InvalidAmount`] for signs, decimals, separators, or
///   values that overflow `u64`.
pub fn validate_amount(input: &str) -> RulesResult<u64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(RulesError::EmptyAmount);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RulesError::InvalidAmount(input.to_string()));
    }
    trimmed
        .parse::<u64>()
        .map_err(|_| RulesError::InvalidAmount(input.to_string()))
}

/// Format an amount with comma thousands separators: `1234567` → `1,234,567`.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
