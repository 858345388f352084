//! CLI for inspecting an ERC20 token and sending transfers.
//!
//! Commands:
//! - `info`: Print token metadata and the caller balance (default)
//! - `transfer`: Send tokens from the caller account
//! - `allowance`: Print the allowance granted to a spender
//! - `approve`: Set the allowance of a spender
//! - `interface`: List the contract functions

use clap::{Parser, Subcommand};
use token_cli::{
    approve_tokens, report_allowance, report_token_info, report_token_info_json, settings::Settings,
    startup, transfer_tokens, write_interface,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "token-cli")]
#[command(about = "Inspect an ERC20 token and send transfers")]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Emit logs as JSON
    #[arg(long, env = "LOG_JSON")]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print token metadata and the caller balance
    Info {
        /// Print a single JSON object with raw quantities
        #[arg(long)]
        json: bool,
    },

    /// Send tokens from the caller account
    Transfer {
        /// Recipient address
        #[arg(long)]
        to: String,

        /// Amount in whole tokens, e.g. 1.5
        #[arg(long)]
        amount: String,
    },

    /// Print the allowance granted to a spender
    Allowance {
        #[arg(long)]
        spender: String,
    },

    /// Set the allowance of a spender
    Approve {
        #[arg(long)]
        spender: String,

        /// Allowance in whole tokens
        #[arg(long)]
        amount: String,
    },

    /// List the contract functions and their selectors
    Interface {
        /// Only show this function, e.g. transfer
        name: Option<String>,
    },
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // A missing .env file is fine, the variables may already be set
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let mut out = std::io::stdout().lock();

    let command = cli.command.unwrap_or(Command::Info { json: false });
    if let Command::Interface { name } = &command {
        // no node needed, but bad settings are still reported
        cli.settings.token_config()?;
        write_interface(&mut out, name.as_deref())?;
        return Ok(());
    }

    let session = startup(&cli.settings).await?;
    let client = &session.client;

    match command {
        Command::Info { json: false } => report_token_info(client, &mut out).await?,
        Command::Info { json: true } => report_token_info_json(client, &mut out).await?,
        Command::Allowance { spender } => report_allowance(client, &spender, &mut out).await?,
        Command::Transfer { to, amount } => {
            info!("Running: transfer");
            transfer_tokens(client, &session.signer, &to, &amount, &mut out).await?;
        }
        Command::Approve { spender, amount } => {
            info!("Running: approve");
            approve_tokens(client, &session.signer, &spender, &amount, &mut out).await?;
        }
        Command::Interface { name } => write_interface(&mut out, name.as_deref())?,
    }

    Ok(())
}
