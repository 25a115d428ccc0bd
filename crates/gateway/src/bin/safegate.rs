use std::sync::Arc;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use safegate::Gateway;
use safegate_primitives::{Cursor, DEFAULT_PAGE_SIZE};
use safegate_tx_service::TransactionService;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "safegate", about = "Read-side gateway for Safe transaction services", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pending transactions, grouped by conflicting nonce
    Queue {
        /// Safe address
        safe: String,
        #[arg(long, default_value_t = 1)]
        chain_id: u64,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u64,
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },
    /// Executed transactions and transfers, grouped by day
    History {
        /// Safe address
        safe: String,
        #[arg(long, default_value_t = 1)]
        chain_id: u64,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        limit: u64,
        #[arg(long, default_value_t = 0)]
        offset: u64,
        /// Timezone offset in milliseconds applied to day boundaries
        #[arg(long, default_value_t = 0)]
        timezone_offset: i64,
    },
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let service = Arc::new(TransactionService::new());
    let gateway = Gateway::new(service.clone(), service.clone(), service)?;

    match cli.command {
        Command::Queue {
            safe,
            chain_id,
            limit,
            offset,
        } => {
            let safe: Address = safe.parse()?;
            let page = gateway
                .queued_page(chain_id, safe, Cursor::new(limit, offset))
                .await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
        Command::History {
            safe,
            chain_id,
            limit,
            offset,
            timezone_offset,
        } => {
            let safe: Address = safe.parse()?;
            let page = gateway
                .history_page(chain_id, safe, Cursor::new(limit, offset), timezone_offset)
                .await?;
            println!("{}", serde_json::to_string_pretty(&page)?);
        }
    }

    Ok(())
}
