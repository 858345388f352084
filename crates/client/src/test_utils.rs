//! Helpers for running code against alloy's mocked transport.
//!
//! Responses are queued on an [`Asserter`] and served in order, one per
//! JSON-RPC request.

use alloy_primitives::{Address, TxHash};
use alloy_provider::{Provider, ProviderBuilder};
pub use alloy_transport::mock::Asserter;
use serde_json::{json, Value};

/// A provider whose requests are answered from `asserter`.
pub fn mocked_provider(asserter: Asserter) -> impl Provider + Clone {
    ProviderBuilder::new()
        .disable_recommended_fillers()
        .connect_mocked_client(asserter)
}

/// A mined legacy transaction receipt as returned by `eth_getTransactionReceipt`.
pub fn receipt_json(tx_hash: TxHash, from: Address, to: Address, success: bool) -> Value {
    json!({
        "type": "0x0",
        "status": if success { "0x1" } else { "0x0" },
        "cumulativeGasUsed": "0xc350",
        "logs": [],
        "logsBloom": format!("0x{}", "0".repeat(512)),
        "transactionHash": tx_hash,
        "transactionIndex": "0x0",
        "blockHash": "0x4444444444444444444444444444444444444444444444444444444444444444",
        "blockNumber": "0x10",
        "gasUsed": "0xc350",
        "effectiveGasPrice": "0x3b9aca00",
        "from": from,
        "to": to,
        "contractAddress": null
    })
}
