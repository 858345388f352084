//! ERC20 token client.
//!
//! [`TokenClient`] binds the `IERC20` interface to one contract and one caller
//! account. Read-only calls go straight to `eth_call`. State-changing calls are
//! expressed as [`Action`]s and go through a single pipeline: fetch nonce,
//! fetch gas price, sign locally, broadcast, then wait (bounded) for the
//! receipt.

pub mod action;
pub mod amount;
mod info;

pub use action::{Action, Approve, Transfer};
pub use amount::{format_token_amount, parse_token_amount, AmountError, DISPLAY_DECIMALS};
pub use info::TokenInfo;

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, TxHash};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use binding::token::IERC20;
use client::{ClientError, ReceiptWait, SignerFn};
use config::{AddressError, NetworkConfig};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Gas limit attached to every state-changing call.
pub const TX_GAS_LIMIT: u64 = 200_000;

/// Read path failure.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("{function}() call failed: {message}")]
    Call {
        function: &'static str,
        message: String,
    },
}

/// Write path failure.
#[derive(Error, Debug)]
pub enum TransferError {
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// Mined, but execution failed
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
}

/// Result of a mined state-changing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutcome {
    /// Transaction hash
    pub tx_hash: TxHash,
    /// Block number where transaction was included
    pub block_number: Option<u64>,
    /// Gas used
    pub gas_used: u64,
}

/// Client for one token contract, acting as one account.
pub struct TokenClient<P> {
    provider: P,
    token: Address,
    account: Address,
    chain_id: u64,
    receipt_wait: ReceiptWait,
    /// Held from nonce fetch until broadcast
    submit_lock: Mutex<()>,
}

impl<P> TokenClient<P>
where
    P: Provider + Clone,
{
    /// Probe the node, then bind the token interface to `token`.
    ///
    /// Fails before any contract call when the node is unreachable.
    pub async fn connect(
        provider: P,
        token: Address,
        account: Address,
    ) -> Result<Self, ClientError> {
        let chain_id = client::ensure_connected(&provider).await?;

        Ok(Self {
            provider,
            token,
            account,
            chain_id,
            receipt_wait: ReceiptWait::default(),
            submit_lock: Mutex::new(()),
        })
    }

    pub const fn with_receipt_wait(mut self, receipt_wait: ReceiptWait) -> Self {
        self.receipt_wait = receipt_wait;
        self
    }

    pub const fn token(&self) -> Address {
        self.token
    }

    pub const fn account(&self) -> Address {
        self.account
    }

    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Known network metadata for the connected chain, if any.
    pub const fn network(&self) -> Option<NetworkConfig> {
        NetworkConfig::from_chain_id(self.chain_id)
    }

    fn contract(&self) -> IERC20::IERC20Instance<&P> {
        IERC20::new(self.token, &self.provider)
    }

    /// Submit a state-changing call and wait for it to be mined.
    pub async fn submit<A: Action>(
        &self,
        action: &A,
        signer: &SignerFn,
    ) -> Result<TxOutcome, TransferError> {
        info!(action = %action.description(), "Submitting transaction");

        let tx = TransactionRequest::default()
            .with_to(self.token)
            .with_input(action.call_data())
            .with_gas_limit(TX_GAS_LIMIT);

        let tx_hash = {
            let _guard = self.submit_lock.lock().await;
            let tx = client::fill_transaction(tx, &self.provider, self.account, self.chain_id)
                .await?;
            let raw_tx = client::sign_transaction(signer, tx).await?;
            client::broadcast(&self.provider, &raw_tx).await?
        };
        info!(%tx_hash, "Transaction submitted");

        let receipt = client::wait_for_receipt(&self.provider, tx_hash, self.receipt_wait).await?;
        if !receipt.status() {
            return Err(TransferError::Reverted {
                tx_hash: receipt.transaction_hash,
            });
        }

        info!(
            tx_hash = %receipt.transaction_hash,
            block_number = receipt.block_number,
            gas_used = receipt.gas_used,
            "Transaction mined"
        );

        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
        })
    }

    /// Transfer `amount` whole tokens to `recipient`.
    ///
    /// Both inputs are validated before anything is sent to the node.
    pub async fn transfer(
        &self,
        recipient: &str,
        amount: &str,
        signer: &SignerFn,
    ) -> Result<TxOutcome, TransferError> {
        let transfer = Transfer::new(recipient, amount)?;
        debug!(recipient = %transfer.recipient, amount = %transfer.amount, "Transfer validated");
        self.submit(&transfer, signer).await
    }

    /// Allow `spender` to move up to `amount` whole tokens of the caller.
    pub async fn approve(
        &self,
        spender: &str,
        amount: &str,
        signer: &SignerFn,
    ) -> Result<TxOutcome, TransferError> {
        let approve = Approve::new(spender, amount)?;
        self.submit(&approve, signer).await
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use alloy_primitives::{address, Address, Bytes, U64};
    use alloy_sol_types::SolValue;
    use client::test_utils::Asserter;

    // Well-known development key (anvil account #0)
    pub const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    pub const ACCOUNT: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    pub const TOKEN: Address = address!("5FbDB2315678afecb367f032d93F642f64180aa3");
    pub const RECIPIENT: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

    /// ABI-encode a single return value as `eth_call` would return it.
    pub fn returns<T: SolValue>(value: T) -> Bytes {
        (value,).abi_encode_params().into()
    }

    /// Asserter with the connectivity probe already answered.
    pub fn connected_asserter(chain_id: u64) -> Asserter {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(chain_id));
        asserter
    }
}
