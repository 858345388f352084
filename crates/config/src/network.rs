//! Known networks.
//!
//! The node's chain id is probed at startup. When it matches one of the
//! networks below, output can name the network and link to its explorer.

use alloy_primitives::TxHash;

/// Display metadata for a known chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Human-readable name
    pub name: &'static str,
    /// Block explorer base url, without trailing slash
    pub explorer_url: &'static str,
}

impl NetworkConfig {
    /// Ethereum mainnet configuration.
    pub const fn mainnet() -> Self {
        Self {
            chain_id: 1,
            name: "Ethereum Mainnet",
            explorer_url: "https://etherscan.io",
        }
    }

    /// Ethereum Sepolia testnet configuration.
    pub const fn sepolia() -> Self {
        Self {
            chain_id: 11155111,
            name: "Sepolia",
            explorer_url: "https://sepolia.etherscan.io",
        }
    }

    /// Look up a known network by chain id.
    pub const fn from_chain_id(chain_id: u64) -> Option<Self> {
        match chain_id {
            1 => Some(Self::mainnet()),
            11155111 => Some(Self::sepolia()),
            _ => None,
        }
    }

    /// Explorer page for a transaction.
    pub fn tx_url(&self, tx_hash: &TxHash) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}
