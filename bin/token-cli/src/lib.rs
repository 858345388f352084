//! Command implementations for `token-cli`.
//!
//! Reports are written to a caller-supplied [`Write`] so the binary prints to
//! stdout while logs stay on stderr.

pub mod settings;

use alloy_primitives::hex;
use alloy_provider::Provider;
use binding::token::{find_function, FunctionDescriptor, ERC20_INTERFACE};
use client::SignerFn;
use config::{normalize_address, NetworkConfig};
use settings::Settings;
use std::io::{self, Write};
use token::{format_token_amount, TokenClient, TransferError, TxOutcome};
use tracing::{info, warn};

/// A connected token client and the signer for its caller account.
pub struct Session<P> {
    pub client: TokenClient<P>,
    pub signer: SignerFn,
}

/// Validate settings, build the signer and connect to the node.
///
/// Nothing is queried from the token contract until this succeeds.
pub async fn startup(settings: &Settings) -> eyre::Result<Session<impl Provider + Clone>> {
    let config = settings.token_config()?;

    info!("Loaded config:");
    info!("  Token: {}", config.contract);
    info!("  Account: {}", config.account);

    let key_address = client::signer_address(config.private_key.expose())?;
    if key_address != config.account {
        warn!(
            %key_address,
            account = %config.account,
            "Private key does not belong to the configured account, signing will fail"
        );
    }
    let signer = client::local_signer_fn(config.private_key.expose())?;

    let provider = client::create_provider(&config.rpc_url)?;
    let client = TokenClient::connect(provider, config.contract, config.account)
        .await?
        .with_receipt_wait(settings.receipt_wait());

    match client.network() {
        Some(network) => info!(chain_id = client.chain_id(), network = network.name, "Connected"),
        None => info!(chain_id = client.chain_id(), "Connected to unknown network"),
    }

    Ok(Session { client, signer })
}

/// Print name, symbol, decimals, total supply and the caller balance.
///
/// Each line is written as soon as its call returns; a failed call stops the
/// report and is returned.
pub async fn report_token_info<P, W>(client: &TokenClient<P>, out: &mut W) -> eyre::Result<()>
where
    P: Provider + Clone,
    W: Write,
{
    writeln!(out, "=== Token Info ===")?;
    writeln!(out, "Name: {}", client.name().await?)?;
    writeln!(out, "Symbol: {}", client.symbol().await?)?;
    writeln!(out, "Decimals: {}", client.decimals().await?)?;
    writeln!(
        out,
        "Total Supply: {}",
        format_token_amount(client.total_supply().await?)
    )?;
    writeln!(
        out,
        "Account Balance: {}",
        format_token_amount(client.balance().await?)
    )?;

    Ok(())
}

/// Print the token info as a single JSON object.
pub async fn report_token_info_json<P, W>(client: &TokenClient<P>, out: &mut W) -> eyre::Result<()>
where
    P: Provider + Clone,
    W: Write,
{
    let info = client.token_info().await?;
    serde_json::to_writer_pretty(&mut *out, &info)?;
    writeln!(out)?;

    Ok(())
}

/// Print how much `spender` may move on behalf of the caller.
pub async fn report_allowance<P, W>(
    client: &TokenClient<P>,
    spender: &str,
    out: &mut W,
) -> eyre::Result<()>
where
    P: Provider + Clone,
    W: Write,
{
    let spender = normalize_address(spender)?;
    let allowance = client.allowance(spender).await?;

    writeln!(out, "Owner: {}", client.account())?;
    writeln!(out, "Spender: {spender}")?;
    writeln!(out, "Allowance: {}", format_token_amount(allowance))?;

    Ok(())
}

/// Send `amount` tokens to `to` and report the outcome.
///
/// A failed transfer is written to `out` and yields `Ok(None)`. Only output
/// errors are returned.
pub async fn transfer_tokens<P, W>(
    client: &TokenClient<P>,
    signer: &SignerFn,
    to: &str,
    amount: &str,
    out: &mut W,
) -> io::Result<Option<TxOutcome>>
where
    P: Provider + Clone,
    W: Write,
{
    let result = client.transfer(to, amount, signer).await;
    report_outcome(out, "Transfer", result, client.network())
}

/// Approve `spender` for `amount` tokens and report the outcome, like
/// [`transfer_tokens`].
pub async fn approve_tokens<P, W>(
    client: &TokenClient<P>,
    signer: &SignerFn,
    spender: &str,
    amount: &str,
    out: &mut W,
) -> io::Result<Option<TxOutcome>>
where
    P: Provider + Clone,
    W: Write,
{
    let result = client.approve(spender, amount, signer).await;
    report_outcome(out, "Approval", result, client.network())
}

fn report_outcome<W: Write>(
    out: &mut W,
    label: &str,
    result: Result<TxOutcome, TransferError>,
    network: Option<NetworkConfig>,
) -> io::Result<Option<TxOutcome>> {
    match result {
        Ok(outcome) => {
            writeln!(out, "{label} succeeded!")?;
            writeln!(out, "Transaction hash: {}", outcome.tx_hash)?;
            if let Some(network) = network {
                writeln!(out, "Explorer: {}", network.tx_url(&outcome.tx_hash))?;
            }
            Ok(Some(outcome))
        }
        Err(err) => {
            warn!(error = %err, "{label} failed");
            writeln!(out, "{label} failed: {err}")?;
            Ok(None)
        }
    }
}

/// List the token functions with their selectors, read-only ones first.
///
/// With `name`, only that function is printed.
pub fn write_interface<W: Write>(out: &mut W, name: Option<&str>) -> eyre::Result<()> {
    if let Some(name) = name {
        let function = find_function(name)
            .ok_or_else(|| eyre::eyre!("unknown token function: {name}"))?;
        write_function(out, function)?;
        return Ok(());
    }

    let (read_only, state_changing): (Vec<_>, Vec<_>) =
        ERC20_INTERFACE.iter().partition(|f| f.is_read_only());

    writeln!(out, "=== Contract Interface ===")?;
    writeln!(out, "Read-only:")?;
    for function in read_only {
        write_function(out, function)?;
    }
    writeln!(out, "State-changing:")?;
    for function in state_changing {
        write_function(out, function)?;
    }

    Ok(())
}

fn write_function<W: Write>(out: &mut W, function: &FunctionDescriptor) -> io::Result<()> {
    writeln!(
        out,
        "  0x{}  {} -> ({}) [{}]",
        hex::encode(function.selector()),
        function.signature(),
        function.outputs.join(","),
        function.mutability
    )
}
