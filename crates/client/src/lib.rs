mod receipt;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use alloy_consensus::TxEnvelope;
use alloy_network::{eip2718::Encodable2718, EthereumWallet, TransactionBuilder};
use alloy_primitives::{Address, Bytes, TxHash};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
pub use receipt::{wait_for_receipt, ReceiptWait};
use std::{future::Future, pin::Pin, sync::Arc, time::Duration};
use thiserror::Error;
use tracing::debug;

/// A function that signs a fully filled transaction request and returns the
/// EIP-2718 encoded bytes.
///
/// The key is moved into the closure when it is built and is not reachable
/// from anywhere else afterwards.
pub type SignerFn = Arc<
    dyn Fn(TransactionRequest) -> Pin<Box<dyn Future<Output = eyre::Result<Bytes>> + Send>>
        + Send
        + Sync,
>;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Error parsing or validating URLs
    #[error("Invalid RPC URL: {0}")]
    InvalidUrl(String),

    /// The node did not answer the connectivity probe
    #[error("Connection error: {0}")]
    Connection(String),

    /// Error with private key
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Fetching the sender's transaction count failed
    #[error("Failed to fetch nonce: {0}")]
    Nonce(String),

    /// Fetching the current gas price failed
    #[error("Failed to fetch gas price: {0}")]
    GasPrice(String),

    /// Local signing failed
    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    /// The node rejected the raw transaction
    #[error("Failed to submit transaction: {0}")]
    Submission(String),

    /// Polling for the receipt failed
    #[error("Failed to fetch receipt for {tx_hash}: {message}")]
    Receipt { tx_hash: TxHash, message: String },

    /// The transaction was not mined within the configured wait
    #[error("Transaction {tx_hash} not mined within {timeout:?}")]
    ReceiptTimeout { tx_hash: TxHash, timeout: Duration },
}

/// Convenience function to create an ethereum rpc provider from url.
///
/// Recommended fillers are disabled: callers fill nonce, gas and chain id
/// explicitly with [`fill_transaction`].
pub fn create_provider(rpc_url: &str) -> Result<impl Provider + Clone, ClientError> {
    let url = rpc_url
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidUrl(format!("{}", e)))?;
    let provider = ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_http(url);

    Ok(provider)
}

/// Probe the node and return its chain id.
pub async fn ensure_connected<P>(provider: &P) -> Result<u64, ClientError>
where
    P: Provider,
{
    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Connection(e.to_string()))?;
    debug!(chain_id, "Node reachable");

    Ok(chain_id)
}

/// Parse a private key into a local signer.
fn parse_signer(private_key: &str) -> Result<PrivateKeySigner, ClientError> {
    private_key
        .trim()
        .parse()
        .map_err(|e| ClientError::InvalidPrivateKey(format!("{}", e)))
}

/// Address controlled by a private key.
pub fn signer_address(private_key: &str) -> Result<Address, ClientError> {
    Ok(parse_signer(private_key)?.address())
}

/// Create a SignerFn from a local private key.
///
/// The returned function only signs; every field (including the chain id used
/// for EIP-155 replay protection) must already be set on the request.
pub fn local_signer_fn(private_key: &str) -> Result<SignerFn, ClientError> {
    let wallet = EthereumWallet::from(parse_signer(private_key)?);

    Ok(Arc::new(move |tx: TransactionRequest| {
        let wallet = wallet.clone();
        Box::pin(async move {
            let tx_envelope: TxEnvelope = tx
                .build(&wallet)
                .await
                .map_err(|e| eyre::eyre!("{}", e))?;

            // Encode to EIP-2718 bytes
            let mut encoded = Vec::new();
            tx_envelope.encode_2718(&mut encoded);
            Ok(Bytes::from(encoded))
        })
    }))
}

/// Fill missing transaction fields using the provider.
///
/// The nonce is fetched first and the gas price second, both immediately
/// before signing. A legacy gas price is used; the gas limit is left to the
/// caller.
pub async fn fill_transaction<P>(
    mut tx: TransactionRequest,
    provider: &P,
    from: Address,
    chain_id: u64,
) -> Result<TransactionRequest, ClientError>
where
    P: Provider,
{
    if tx.from.is_none() {
        tx.from = Some(from);
    }

    if tx.chain_id.is_none() {
        tx.chain_id = Some(chain_id);
    }

    if tx.nonce.is_none() {
        let nonce = provider
            .get_transaction_count(from)
            .pending()
            .await
            .map_err(|e| ClientError::Nonce(e.to_string()))?;
        debug!(%from, nonce, "Fetched nonce");
        tx.nonce = Some(nonce);
    }

    if tx.gas_price.is_none() {
        let gas_price = provider
            .get_gas_price()
            .await
            .map_err(|e| ClientError::GasPrice(e.to_string()))?;
        debug!(gas_price, "Fetched gas price");
        tx.gas_price = Some(gas_price);
    }

    Ok(tx)
}

/// Sign a filled request with `signer`.
pub async fn sign_transaction(
    signer: &SignerFn,
    tx: TransactionRequest,
) -> Result<Bytes, ClientError> {
    signer(tx)
        .await
        .map_err(|e| ClientError::Signing(e.to_string()))
}

/// Submit a signed transaction and return its hash.
///
/// The hash only means the node accepted the transaction into its pool.
pub async fn broadcast<P>(provider: &P, raw_tx: &Bytes) -> Result<TxHash, ClientError>
where
    P: Provider,
{
    let pending = provider
        .send_raw_transaction(raw_tx)
        .await
        .map_err(|e| ClientError::Submission(e.to_string()))?;

    Ok(*pending.tx_hash())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mocked_provider, Asserter};
    use alloy_network::eip2718::Decodable2718;
    use alloy_primitives::{address, b256, U128, U256, U64};

    // Well-known development key (anvil account #0)
    const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_ADDRESS: Address = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    #[test]
    fn test_invalid_url() {
        let result = create_provider("not a url");
        assert!(matches!(result, Err(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn test_signer_address() {
        assert_eq!(signer_address(KEY).unwrap(), KEY_ADDRESS);
        assert_eq!(signer_address(&KEY[2..]).unwrap(), KEY_ADDRESS);
    }

    #[test]
    fn test_invalid_private_key() {
        assert!(matches!(
            signer_address("0x1234"),
            Err(ClientError::InvalidPrivateKey(_))
        ));
        assert!(local_signer_fn("not a key").is_err());
    }

    #[test]
    fn test_private_key_not_in_error() {
        let bad = "0xzz0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
        let err = signer_address(bad).unwrap_err();
        assert!(!err.to_string().contains(&bad[4..]));
    }

    #[tokio::test]
    async fn test_ensure_connected() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(11155111u64));
        let provider = mocked_provider(asserter);

        assert_eq!(ensure_connected(&provider).await.unwrap(), 11155111);
    }

    #[tokio::test]
    async fn test_ensure_connected_failure() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("connection refused");
        let provider = mocked_provider(asserter);

        let err = ensure_connected(&provider).await.unwrap_err();
        assert!(matches!(err, ClientError::Connection(_)));
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_fill_transaction() {
        let asserter = Asserter::new();
        asserter.push_success(&U64::from(7u64));
        asserter.push_success(&U128::from(2_000_000_000u64));
        let provider = mocked_provider(asserter);

        let tx = TransactionRequest::default().with_gas_limit(200_000);
        let filled = fill_transaction(tx, &provider, KEY_ADDRESS, 1)
            .await
            .unwrap();

        assert_eq!(filled.from, Some(KEY_ADDRESS));
        assert_eq!(filled.chain_id, Some(1));
        assert_eq!(filled.nonce, Some(7));
        assert_eq!(filled.gas_price, Some(2_000_000_000));
        assert_eq!(filled.gas, Some(200_000));
    }

    #[tokio::test]
    async fn test_fill_transaction_nonce_failure() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("nonce unavailable");
        let provider = mocked_provider(asserter);

        let err = fill_transaction(TransactionRequest::default(), &provider, KEY_ADDRESS, 1)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Nonce(_)));
        assert!(err.to_string().contains("nonce unavailable"));
    }

    #[tokio::test]
    async fn test_local_signer_produces_legacy_tx() {
        let signer = local_signer_fn(KEY).unwrap();
        let tx = TransactionRequest::default()
            .with_from(KEY_ADDRESS)
            .with_to(address!("5FbDB2315678afecb367f032d93F642f64180aa3"))
            .with_nonce(3)
            .with_gas_limit(200_000)
            .with_gas_price(1_000_000_000)
            .with_chain_id(11155111)
            .with_value(U256::ZERO);

        let raw = sign_transaction(&signer, tx).await.unwrap();
        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();

        match envelope {
            TxEnvelope::Legacy(signed) => {
                assert_eq!(signed.tx().nonce, 3);
                assert_eq!(signed.tx().gas_limit, 200_000);
                assert_eq!(signed.tx().chain_id, Some(11155111));
            }
            other => panic!("expected legacy transaction, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_broadcast_returns_hash() {
        let hash = b256!("0x2222222222222222222222222222222222222222222222222222222222222222");
        let asserter = Asserter::new();
        asserter.push_success(&hash);
        let provider = mocked_provider(asserter);

        let tx_hash = broadcast(&provider, &Bytes::from_static(&[0xc0]))
            .await
            .unwrap();
        assert_eq!(tx_hash, hash);
    }

    #[tokio::test]
    async fn test_broadcast_rejected() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("nonce too low");
        let provider = mocked_provider(asserter);

        let err = broadcast(&provider, &Bytes::from_static(&[0xc0]))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Submission(_)));
        assert!(err.to_string().contains("nonce too low"));
    }
}
