use std::path::Path;

use alloy_primitives::{keccak256, B256};
use alloy_sol_types::SolValue;
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    api::OutputKind,
    compile::CompiledCircuit,
    error::Result,
    srs::{self, Srs, SrsCache},
};

const SETUP: &str = "SETUP";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyingKey {
    pub circuit_digest: B256,
    pub srs_digest: B256,
    pub log_size: u32,
    pub num_public: usize,
    pub outputs: Vec<OutputKind>,
}

impl VerifyingKey {
    /// The hash an application contract pins to accept proofs of this circuit.
    pub fn hash(&self) -> B256 {
        keccak256(
            (
                self.circuit_digest,
                self.srs_digest,
                self.log_size,
                self.num_public as u64,
            )
                .abi_encode(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvingKey {
    pub vk: VerifyingKey,
    pub srs: Srs,
}

/// One-time key generation for a compiled circuit. The SRS is loaded from
/// (or generated into) `srs_dir`.
pub fn setup(
    circuit: &CompiledCircuit,
    srs_dir: impl AsRef<Path>,
) -> Result<(ProvingKey, VerifyingKey)> {
    // one row per constraint plus one per public input
    let rows = circuit.cs.len() + circuit.num_public();
    let log_size = srs::log_size_for(rows)?;
    let srs = SrsCache::new(srs_dir).load_or_generate(log_size)?;

    let vk = VerifyingKey {
        circuit_digest: circuit.digest(),
        srs_digest: srs.digest,
        log_size,
        num_public: circuit.num_public(),
        outputs: circuit.outputs.clone(),
    };

    info!(target: SETUP, "setup complete, vk hash {}", vk.hash());

    let pk = ProvingKey {
        vk: vk.clone(),
        srs,
    };

    Ok((pk, vk))
}
