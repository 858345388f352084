use clap::Args;
use client::ReceiptWait;
use config::{
    ConfigError, SecretKey, TokenConfig, ENV_CONTRACT_ADDRESS, ENV_PRIVATE_KEY, ENV_RPC_URL,
    ENV_WALLET_ADDRESS,
};
use std::time::Duration;

/// Connection, account and receipt-wait settings shared by every command.
///
/// Each flag falls back to an environment variable, which may itself come
/// from a `.env` file.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Node RPC endpoint url
    #[arg(long, env = ENV_RPC_URL)]
    pub rpc_url: String,

    /// Token contract address
    #[arg(long, env = ENV_CONTRACT_ADDRESS)]
    pub contract_address: String,

    /// Caller account address
    #[arg(long, env = ENV_WALLET_ADDRESS)]
    pub wallet_address: String,

    /// Private key for signing transactions (hex string, with or without 0x prefix)
    #[arg(long, env = ENV_PRIVATE_KEY, hide_env_values = true)]
    pub private_key: SecretKey,

    /// Give up waiting for a receipt after this many seconds
    #[arg(long, env = "RECEIPT_TIMEOUT_SECS", default_value_t = 120)]
    pub receipt_timeout_secs: u64,

    /// Delay between receipt polls, in milliseconds
    #[arg(long, env = "RECEIPT_POLL_INTERVAL_MS", default_value_t = 1000)]
    pub poll_interval_ms: u64,
}

impl Settings {
    /// Validate and normalize the raw settings.
    pub fn token_config(&self) -> Result<TokenConfig, ConfigError> {
        TokenConfig::new(
            &self.rpc_url,
            &self.contract_address,
            &self.wallet_address,
            self.private_key.clone(),
        )
    }

    pub const fn receipt_wait(&self) -> ReceiptWait {
        ReceiptWait {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            timeout: Duration::from_secs(self.receipt_timeout_secs),
        }
    }
}
