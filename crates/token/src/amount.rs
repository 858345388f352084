//! Conversion between human-readable token amounts and smallest units.
//!
//! Display and parsing both use a fixed [`DISPLAY_DECIMALS`] of 18, whatever
//! the contract's `decimals()` reports.

use alloy_primitives::{
    utils::{parse_units, ParseUnits, Unit, UnitsError},
    U256,
};
use thiserror::Error;

/// Decimal places assumed when scaling amounts.
pub const DISPLAY_DECIMALS: u8 = 18;

const DISPLAY_UNIT: Unit = Unit::ETHER;

#[derive(Error, Debug)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,

    #[error("amount must not be negative: {0}")]
    Negative(String),

    /// Not a decimal number, or too large for uint256
    #[error("invalid amount {amount}: {source}")]
    Invalid {
        amount: String,
        #[source]
        source: UnitsError,
    },

    /// Positive input that truncates to zero smallest units, or a literal zero
    #[error("amount must be greater than zero")]
    Zero,
}

/// Parse a whole-token decimal amount into smallest units.
///
/// Digits below `10^-18` are truncated, never rounded.
pub fn parse_token_amount(amount: &str) -> Result<U256, AmountError> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(AmountError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(AmountError::Negative(trimmed.to_string()));
    }

    parse_units(trimmed, DISPLAY_DECIMALS)
        .map(ParseUnits::get_absolute)
        .map_err(|source| AmountError::Invalid {
            amount: trimmed.to_string(),
            source,
        })
}

/// Format smallest units as whole tokens with trailing zeros trimmed.
///
/// At least one fractional digit is kept, so `5000 * 10^18` renders as
/// `5000.0`.
pub fn format_token_amount(value: U256) -> String {
    let formatted = ParseUnits::U256(value).format_units(DISPLAY_UNIT);
    let trimmed = formatted.trim_end_matches('0');

    if trimmed.ends_with('.') {
        format!("{trimmed}0")
    } else {
        trimmed.to_string()
    }
}
