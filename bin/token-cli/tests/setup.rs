//! Common test setup utilities shared across integration tests.
#![allow(dead_code)] // not every test file uses every helper

use alloy_primitives::{address, Address, Bytes, U256, U64};
use alloy_provider::Provider;
use alloy_sol_types::SolValue;
use client::test_utils::{mocked_provider, Asserter};
use config::{SecretKey, ENV_CONTRACT_ADDRESS, ENV_PRIVATE_KEY, ENV_RPC_URL, ENV_WALLET_ADDRESS};
use token::TokenClient;
use token_cli::settings::Settings;

// Well-known development key (anvil account #0) and its address
pub const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
pub const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub const SEPOLIA_CHAIN_ID: u64 = 11155111;

/// ABI-encode a single value the way `eth_call` returns it.
pub fn returns<T: SolValue>(value: T) -> Bytes {
    (value,).abi_encode_params().into()
}

/// 10^18 smallest units per whole token.
pub fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::from(10u8).pow(U256::from(18))
}

/// A client connected to a mocked node reporting `chain_id`.
///
/// Queue further responses on the returned asserter.
pub async fn mocked_client(chain_id: u64) -> (TokenClient<impl Provider + Clone>, Asserter) {
    let asserter = Asserter::new();
    asserter.push_success(&U64::from(chain_id));

    let client = TokenClient::connect(mocked_provider(asserter.clone()), TOKEN, ACCOUNT)
        .await
        .expect("Failed to connect mocked client");

    (client, asserter)
}

/// Settings pointing at `rpc_url`, using the development account.
pub fn settings(rpc_url: &str) -> Settings {
    Settings {
        rpc_url: rpc_url.to_string(),
        contract_address: TOKEN.to_string(),
        wallet_address: ACCOUNT.to_string(),
        private_key: SecretKey::new(KEY),
        receipt_timeout_secs: 5,
        poll_interval_ms: 100,
    }
}

/// Settings for a live node, read from the same variables the binary uses.
///
/// Returns None if any of them is missing.
pub fn settings_from_env() -> Option<Settings> {
    dotenvy::dotenv().ok();

    let var = |name: &str| match std::env::var(name) {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("⚠ {name} not set");
            None
        }
    };

    Some(Settings {
        rpc_url: var(ENV_RPC_URL)?,
        contract_address: var(ENV_CONTRACT_ADDRESS)?,
        wallet_address: var(ENV_WALLET_ADDRESS)?,
        private_key: SecretKey::new(var(ENV_PRIVATE_KEY)?),
        receipt_timeout_secs: 120,
        poll_interval_ms: 1000,
    })
}
