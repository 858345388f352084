//! EIP-55 checksum normalization for user supplied addresses.

use alloy_primitives::Address;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// Not 40 hex digits after the optional `0x` prefix
    #[error("expected 40 hex digits, got {0}")]
    InvalidLength(usize),

    /// Contains characters outside `[0-9a-fA-F]`
    #[error("not a hex address: {0}")]
    InvalidHex(String),

    /// Mixed-case input whose casing is not the EIP-55 checksum
    #[error("checksum mismatch: {0}")]
    ChecksumMismatch(String),
}

/// Parse an address and validate its checksum.
///
/// Single-case input (all lowercase or all uppercase) carries no checksum and
/// is accepted as is. Mixed-case input must be correctly checksummed.
pub fn normalize_address(input: &str) -> Result<Address, AddressError> {
    let trimmed = input.trim();
    let hex = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if hex.len() != 40 {
        return Err(AddressError::InvalidLength(hex.len()));
    }

    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(AddressError::InvalidHex(trimmed.to_string()));
    }

    let has_lower = hex.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hex.bytes().any(|b| b.is_ascii_uppercase());

    if has_lower && has_upper {
        return Address::parse_checksummed(format!("0x{hex}"), None)
            .map_err(|_| AddressError::ChecksumMismatch(trimmed.to_string()));
    }

    hex.parse::<Address>()
        .map_err(|_| AddressError::InvalidHex(trimmed.to_string()))
}
