//! Configuration types for the token client.
//!
//! This crate provides:
//! - The environment variable names the client is configured from
//! - Checksum normalization for contract and account addresses
//! - A redacting wrapper for the signing key
//! - Known network metadata

pub mod address;
pub mod network;

pub use address::{normalize_address, AddressError};
pub use network::NetworkConfig;

use alloy_primitives::Address;
use std::{convert::Infallible, fmt, str::FromStr};
use thiserror::Error;

/// Node endpoint url.
pub const ENV_RPC_URL: &str = "SEPOLIA_RPC_URL";
/// Token contract address.
pub const ENV_CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
/// Caller account address.
pub const ENV_WALLET_ADDRESS: &str = "WALLET_ADDRESS";
/// Hex encoded private key of the caller account.
pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";

#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required setting is absent or blank
    #[error("missing required setting {0}")]
    Missing(&'static str),

    /// An address setting failed normalization
    #[error("invalid {name}: {source}")]
    InvalidAddress {
        name: &'static str,
        #[source]
        source: AddressError,
    },
}

/// A private key that never shows up in logs or debug output.
#[derive(Clone)]
pub struct SecretKey(String);

impl SecretKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the raw key. Only signer construction should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl FromStr for SecretKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey(<redacted>)")
    }
}

impl fmt::Display for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

/// Validated client configuration.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Node RPC endpoint url
    pub rpc_url: String,
    /// Token contract address
    pub contract: Address,
    /// Caller account address
    pub account: Address,
    /// Caller signing key
    pub private_key: SecretKey,
}

impl TokenConfig {
    /// Validate raw settings.
    ///
    /// Blank values are reported as missing. Both addresses are checksum
    /// validated; the url and key are checked when the provider and signer
    /// are built.
    pub fn new(
        rpc_url: &str,
        contract: &str,
        account: &str,
        private_key: SecretKey,
    ) -> Result<Self, ConfigError> {
        let rpc_url = required(ENV_RPC_URL, rpc_url)?;
        let contract = parse_address(ENV_CONTRACT_ADDRESS, contract)?;
        let account = parse_address(ENV_WALLET_ADDRESS, account)?;
        required(ENV_PRIVATE_KEY, private_key.expose())?;

        Ok(Self {
            rpc_url: rpc_url.to_string(),
            contract,
            account,
            private_key,
        })
    }
}

fn required<'a>(name: &'static str, value: &'a str) -> Result<&'a str, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ConfigError::Missing(name));
    }
    Ok(value)
}

fn parse_address(name: &'static str, value: &str) -> Result<Address, ConfigError> {
    let value = required(name, value)?;
    normalize_address(value).map_err(|source| ConfigError::InvalidAddress { name, source })
}
