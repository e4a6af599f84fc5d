//! Mint submission CLI.
//!
//! Vouches for one mint request with the encoder key and submits it to the
//! mint contract with the owner key. The process is one-shot: it performs a
//! single submission, prints the inclusion block number, and exits;
//! any failure terminates with a non-zero status and a logged cause.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, U256};
use clap::Parser;
use nodemint_pipeline::{
    HttpChainClient, LocalKeyProvider, MintError, MintPipeline, PipelineConfig,
};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "mintctl")]
#[command(about = "Submit one vouched mint request to the mint contract")]
#[command(version)]
struct Args {
    /// Chain endpoint URL
    #[arg(long, default_value = "http://127.0.0.1:8545")]
    rpc_url: String,

    /// Chain ID used for replay-protected transaction signatures
    #[arg(long, default_value_t = 1)]
    chain_id: u64,

    /// Mint contract address (0x...)
    #[arg(long)]
    contract: String,

    /// Encoder private key (0x... or hex); vouches for the request
    #[arg(long)]
    encoder_private_key: String,

    /// Owner private key (0x... or hex); pays gas and submits
    #[arg(long)]
    owner_private_key: String,

    /// Node identifier the mint is vouched for
    #[arg(long)]
    node_id: String,

    /// Content URI associated with the mint
    #[arg(long)]
    uri: String,

    /// Content size in bytes (decimal, up to 256 bits)
    #[arg(long)]
    size: String,

    /// Gas limit for the mint transaction
    #[arg(long, default_value_t = 300_000)]
    gas_limit: u64,

    /// HTTP timeout for individual RPC calls
    #[arg(long, default_value_t = 3000)]
    request_timeout_ms: u64,

    /// Upper bound on the wait for transaction inclusion
    #[arg(long, default_value_t = 180)]
    inclusion_timeout_secs: u64,

    /// Interval between receipt polls while waiting for inclusion
    #[arg(long, default_value_t = 2000)]
    receipt_poll_ms: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(&args.log_level);

    if let Err(err) = run(args).await {
        tracing::error!("mint failed: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt().with_env_filter(filter).init();
}

async fn run(args: Args) -> Result<(), MintError> {
    let contract = Address::from_str(&args.contract)
        .map_err(|e| MintError::Config(format!("invalid contract address: {e}")))?;
    let size = parse_size(&args.size)?;

    let mut config = PipelineConfig::new(args.rpc_url, args.chain_id, contract);
    config.gas_limit = args.gas_limit;
    config.request_timeout = Duration::from_millis(args.request_timeout_ms);
    config.inclusion_timeout = Duration::from_secs(args.inclusion_timeout_secs);
    config.receipt_poll_interval = Duration::from_millis(args.receipt_poll_ms);

    let encoder = Arc::new(LocalKeyProvider::from_hex(&args.encoder_private_key)?);
    let owner = Arc::new(LocalKeyProvider::from_hex(&args.owner_private_key)?);
    let client = Arc::new(HttpChainClient::new(
        config.rpc_url.clone(),
        config.request_timeout,
    )?);

    let pipeline = MintPipeline::new(config, client, encoder, owner)?;
    let receipt = pipeline.run(&args.node_id, &args.uri, size).await?;

    if !receipt.success {
        return Err(MintError::Submission(format!(
            "transaction {:#x} reverted in block {}",
            receipt.tx_hash, receipt.block_number
        )));
    }

    println!("{}", receipt.block_number);
    Ok(())
}

/// Parse a decimal size, rejecting values that do not fit in 256 bits.
fn parse_size(input: &str) -> Result<U256, MintError> {
    if input.is_empty() {
        return Err(MintError::Encoding("size must not be empty".to_string()));
    }
    U256::from_str_radix(input, 10)
        .map_err(|e| MintError::Encoding(format!("invalid size '{input}': {e}")))
}
