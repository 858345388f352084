use crate::{amount::format_token_amount, TokenClient, TokenError};
use alloy_primitives::{Address, U256};
use alloy_provider::Provider;
use serde::{Serialize, Serializer};
use tracing::debug;

/// Token metadata and the caller's balance.
///
/// Quantities are raw smallest units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenInfo {
    #[serde(serialize_with = "checksummed")]
    pub token: Address,
    #[serde(serialize_with = "checksummed")]
    pub account: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(serialize_with = "decimal")]
    pub total_supply: U256,
    #[serde(serialize_with = "decimal")]
    pub balance: U256,
}

impl TokenInfo {
    /// Total supply scaled by the fixed display decimals.
    pub fn display_total_supply(&self) -> String {
        format_token_amount(self.total_supply)
    }

    /// Caller balance scaled by the fixed display decimals.
    pub fn display_balance(&self) -> String {
        format_token_amount(self.balance)
    }
}

fn checksummed<S: Serializer>(value: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.to_checksum(None))
}

fn decimal<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn call_error(function: &'static str, err: alloy_contract::Error) -> TokenError {
    TokenError::Call {
        function,
        message: err.to_string(),
    }
}

impl<P> TokenClient<P>
where
    P: Provider + Clone,
{
    pub async fn name(&self) -> Result<String, TokenError> {
        debug!(token = %self.token, "Querying name");
        self.contract()
            .name()
            .call()
            .await
            .map_err(|e| call_error("name", e))
    }

    pub async fn symbol(&self) -> Result<String, TokenError> {
        debug!(token = %self.token, "Querying symbol");
        self.contract()
            .symbol()
            .call()
            .await
            .map_err(|e| call_error("symbol", e))
    }

    pub async fn decimals(&self) -> Result<u8, TokenError> {
        debug!(token = %self.token, "Querying decimals");
        self.contract()
            .decimals()
            .call()
            .await
            .map_err(|e| call_error("decimals", e))
    }

    pub async fn total_supply(&self) -> Result<U256, TokenError> {
        debug!(token = %self.token, "Querying totalSupply");
        self.contract()
            .totalSupply()
            .call()
            .await
            .map_err(|e| call_error("totalSupply", e))
    }

    /// Balance of the caller account.
    pub async fn balance(&self) -> Result<U256, TokenError> {
        self.balance_of(self.account).await
    }

    pub async fn balance_of(&self, holder: Address) -> Result<U256, TokenError> {
        debug!(token = %self.token, %holder, "Querying balanceOf");
        self.contract()
            .balanceOf(holder)
            .call()
            .await
            .map_err(|e| call_error("balanceOf", e))
    }

    /// Allowance the caller granted to `spender`.
    pub async fn allowance(&self, spender: Address) -> Result<U256, TokenError> {
        debug!(token = %self.token, owner = %self.account, %spender, "Querying allowance");
        self.contract()
            .allowance(self.account, spender)
            .call()
            .await
            .map_err(|e| call_error("allowance", e))
    }

    /// Query name, symbol, decimals, total supply and the caller balance, in
    /// that order. The first failing call aborts the rest.
    pub async fn token_info(&self) -> Result<TokenInfo, TokenError> {
        Ok(TokenInfo {
            token: self.token,
            account: self.account,
            name: self.name().await?,
            symbol: self.symbol().await?,
            decimals: self.decimals().await?,
            total_supply: self.total_supply().await?,
            balance: self.balance().await?,
        })
    }
}
