use std::{env, fs, path::Path};

use alloy_primitives::{Address, B256};
use anyhow::anyhow;
use log::info;
use serde::{Deserialize, Serialize};
use storage_proof_core::consts;
use storage_proof_sdk::{FeeSchedule, StorageData};

use crate::QUICKSTART;

pub const ETH_RPC_URL: &str = "ETH_RPC_URL";
pub const RELAY_URL: &str = "RELAY_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleSlot {
    pub block_num: u64,
    pub key: B256,
    pub value: B256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickstartConfig {
    pub contract_address: Address,
    pub app_contract: Address,
    pub refundee: Address,
    pub src_chain_id: u64,
    pub dst_chain_id: u64,
    #[serde(default)]
    pub nonce: u64,
    pub rpc_url: String,
    pub relay_url: String,
    pub compile_sample: SampleSlot,
    #[serde(default)]
    pub fees: FeeSchedule,
}

impl Default for QuickstartConfig {
    fn default() -> Self {
        Self {
            contract_address: consts::CONTRACT_ADDRESS,
            app_contract: consts::APP_CONTRACT,
            refundee: consts::REFUNDEE,
            src_chain_id: consts::SRC_CHAIN_ID,
            dst_chain_id: consts::DST_CHAIN_ID,
            nonce: 0,
            rpc_url: "http://localhost:8545".to_string(),
            relay_url: "http://localhost:8080".to_string(),
            compile_sample: SampleSlot {
                block_num: consts::SAMPLE_BLOCK,
                key: consts::SAMPLE_SLOT_KEY,
                value: consts::SAMPLE_SLOT_VALUE,
            },
            fees: FeeSchedule::default(),
        }
    }
}

impl QuickstartConfig {
    /// The sample slot as circuit data for the configured contract.
    pub fn sample_storage(&self) -> StorageData {
        StorageData {
            block_num: self.compile_sample.block_num,
            address: self.contract_address,
            key: self.compile_sample.key,
            value: self.compile_sample.value,
        }
    }

    pub fn apply_overrides(&mut self, rpc_url: Option<String>, relay_url: Option<String>) {
        if let Some(url) = rpc_url {
            self.rpc_url = url;
        }
        if let Some(url) = relay_url {
            self.relay_url = url;
        }
    }
}

/// Reads the TOML config at `path`, then applies environment overrides.
pub fn read_config(path: &Path) -> anyhow::Result<QuickstartConfig> {
    info!(target: QUICKSTART, "reading config from {}...", path.display());

    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config {}: {e}", path.display()))?;
    let mut config: QuickstartConfig = toml::from_str(&content)?;

    config.apply_overrides(env::var(ETH_RPC_URL).ok(), env::var(RELAY_URL).ok());

    info!(target: QUICKSTART, "rpc {}, relay {}", config.rpc_url, config.relay_url);

    Ok(config)
}
