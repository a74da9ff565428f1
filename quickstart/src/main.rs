mod config;
mod steps;

use std::path::PathBuf;

use alloy_primitives::{B256, U256};
use clap::{Parser, Subcommand};
use common::{default_out_dir, default_srs_dir, quickstart_dir, ArtifactPaths};
use log::info;
use storage_proof_controller::RpcClient;
use storage_proof_sdk::HttpRelay;

pub(crate) const QUICKSTART: &str = "QUICKSTART";

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// compilation output dir. defaults to `$HOME/circuitOut/storage-proof-app`.
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// where to cache the srs. defaults to `$HOME/kzgsrs`.
    #[arg(long, global = true)]
    srs: Option<PathBuf>,

    /// quickstart config. defaults to `quickstart/quickstart.toml`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compiles the circuit and runs the one-time setup.
    Compile,

    /// Proves a storage slot of the configured contract and submits the
    /// proof request.
    ///
    /// depends on `compile`.
    Prove {
        /// slot to look up, as up to 64 hex digits (`0x3` is slot 3).
        #[arg(long, value_parser = parse_slot)]
        slot: B256,

        /// block number to look up.
        #[arg(long, default_value_t = 0)]
        block: u64,
    },
}

/// Parses a slot the way `HexToHash` does, left-padding short input.
fn parse_slot(s: &str) -> Result<B256, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    if digits.is_empty() || digits.len() > 64 {
        return Err(format!("expected 1 to 64 hex digits, got {s:?}"));
    }

    U256::from_str_radix(digits, 16)
        .map(B256::from)
        .map_err(|e| format!("invalid slot {s:?}: {e}"))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let paths = ArtifactPaths::new(cli.out.unwrap_or_else(default_out_dir));
    let srs_dir = cli.srs.unwrap_or_else(default_srs_dir);
    let config_path = cli
        .config
        .unwrap_or_else(|| quickstart_dir().join("quickstart.toml"));
    let config = config::read_config(&config_path)?;

    match cli.command {
        Commands::Compile => {
            let vk = steps::compile_circuit(&config, &paths, &srs_dir)?;

            println!("compilation/setup complete");
            println!("vk hash {}", vk.hash());
        }

        Commands::Prove { slot, block } => {
            let provider = RpcClient::new(&config.rpc_url);
            let relay = HttpRelay::new(&config.relay_url);

            let outcome =
                steps::prove_slot(&config, &paths, &provider, &relay, slot, block).await?;

            info!(target: QUICKSTART, "proof written to {}", outcome.proof_path.display());
            println!("calldata {}", hex::encode(&outcome.prepared.calldata));
            println!("feeValue {}", outcome.prepared.fee);
            println!("requestId {}", outcome.prepared.request_id);
            println!("relay status {}", outcome.receipt.status);
        }
    }

    Ok(())
}
