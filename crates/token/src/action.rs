//! State-changing token calls.

use crate::{
    amount::{format_token_amount, parse_token_amount, AmountError},
    TransferError,
};
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolCall;
use binding::token::IERC20;
use config::normalize_address;

/// A state-changing call on the token contract.
///
/// Inputs are validated when the action is constructed, so an action that
/// exists is ready to be submitted without further checks.
pub trait Action {
    /// ABI-encoded calldata for the call.
    fn call_data(&self) -> Bytes;

    /// Get a human-readable description of this action.
    fn description(&self) -> String;
}

/// `transfer(recipient, amount)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub recipient: Address,
    /// Amount in smallest units
    pub amount: U256,
}

impl Transfer {
    /// Validate a recipient address and a whole-token amount.
    ///
    /// Rejects amounts that are zero after truncation to smallest units.
    pub fn new(recipient: &str, amount: &str) -> Result<Self, TransferError> {
        let recipient = normalize_address(recipient)?;
        let amount = parse_token_amount(amount)?;

        if amount.is_zero() {
            return Err(AmountError::Zero.into());
        }

        Ok(Self { recipient, amount })
    }
}

impl Action for Transfer {
    fn call_data(&self) -> Bytes {
        IERC20::transferCall {
            recipient: self.recipient,
            amount: self.amount,
        }
        .abi_encode()
        .into()
    }

    fn description(&self) -> String {
        format!(
            "Transfer {} tokens to {}",
            format_token_amount(self.amount),
            self.recipient
        )
    }
}

/// `approve(spender, amount)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approve {
    pub spender: Address,
    /// Allowance in smallest units
    pub amount: U256,
}

impl Approve {
    /// Validate a spender address and a whole-token allowance.
    ///
    /// Zero is accepted: approving zero revokes the allowance.
    pub fn new(spender: &str, amount: &str) -> Result<Self, TransferError> {
        let spender = normalize_address(spender)?;
        let amount = parse_token_amount(amount)?;

        Ok(Self { spender, amount })
    }
}

impl Action for Approve {
    fn call_data(&self) -> Bytes {
        IERC20::approveCall {
            spender: self.spender,
            amount: self.amount,
        }
        .abi_encode()
        .into()
    }

    fn description(&self) -> String {
        format!(
            "Approve {} to spend {} tokens",
            self.spender,
            format_token_amount(self.amount)
        )
    }
}
