//! Bounded wait for a transaction receipt.

use crate::ClientError;
use alloy_primitives::TxHash;
use alloy_provider::Provider;
use alloy_rpc_types::TransactionReceipt;
use std::time::Duration;
use tokio_retry::{strategy::FixedInterval, RetryIf};
use tracing::debug;

/// How often and how long to poll for a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceiptWait {
    pub poll_interval: Duration,
    pub timeout: Duration,
}

impl Default for ReceiptWait {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            timeout: Duration::from_secs(120),
        }
    }
}

enum Poll {
    Pending,
    Failed(String),
}

/// Poll `eth_getTransactionReceipt` until the transaction is mined.
///
/// A missing receipt is retried every `poll_interval`; an RPC error ends the
/// wait immediately. Gives up with [`ClientError::ReceiptTimeout`] once
/// `timeout` has elapsed.
pub async fn wait_for_receipt<P>(
    provider: &P,
    tx_hash: TxHash,
    wait: ReceiptWait,
) -> Result<TransactionReceipt, ClientError>
where
    P: Provider,
{
    let poll = move || async move {
        match provider.get_transaction_receipt(tx_hash).await {
            Ok(Some(receipt)) => Ok(receipt),
            Ok(None) => {
                debug!(%tx_hash, "Transaction pending");
                Err(Poll::Pending)
            }
            Err(e) => Err(Poll::Failed(e.to_string())),
        }
    };

    let retry = RetryIf::spawn(FixedInterval::new(wait.poll_interval), poll, |e: &Poll| {
        matches!(e, Poll::Pending)
    });

    match tokio::time::timeout(wait.timeout, retry).await {
        Ok(Ok(receipt)) => Ok(receipt),
        Ok(Err(Poll::Failed(message))) => Err(ClientError::Receipt { tx_hash, message }),
        Ok(Err(Poll::Pending)) | Err(_) => Err(ClientError::ReceiptTimeout {
            tx_hash,
            timeout: wait.timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mocked_provider, receipt_json, Asserter};
    use alloy_primitives::{address, b256};

    const HASH: TxHash =
        b256!("0x3333333333333333333333333333333333333333333333333333333333333333");

    fn fast_wait(timeout_ms: u64) -> ReceiptWait {
        ReceiptWait {
            poll_interval: Duration::from_millis(10),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_after_pending_polls() {
        let from = address!("f39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let to = address!("5FbDB2315678afecb367f032d93F642f64180aa3");

        let asserter = Asserter::new();
        asserter.push_success(&serde_json::Value::Null);
        asserter.push_success(&serde_json::Value::Null);
        asserter.push_success(&receipt_json(HASH, from, to, true));
        let provider = mocked_provider(asserter);

        let receipt = wait_for_receipt(&provider, HASH, fast_wait(1_000))
            .await
            .unwrap();
        assert_eq!(receipt.transaction_hash, HASH);
        assert!(receipt.status());
    }

    #[tokio::test(start_paused = true)]
    async fn test_receipt_timeout() {
        let asserter = Asserter::new();
        for _ in 0..64 {
            asserter.push_success(&serde_json::Value::Null);
        }
        let provider = mocked_provider(asserter);

        let err = wait_for_receipt(&provider, HASH, fast_wait(100))
            .await
            .unwrap_err();
        match err {
            ClientError::ReceiptTimeout { tx_hash, timeout } => {
                assert_eq!(tx_hash, HASH);
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_receipt_rpc_failure_is_not_retried() {
        let asserter = Asserter::new();
        asserter.push_failure_msg("header not found");
        let provider = mocked_provider(asserter);

        let err = wait_for_receipt(&provider, HASH, fast_wait(1_000))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Receipt { .. }));
        assert!(err.to_string().contains("header not found"));
    }
}
