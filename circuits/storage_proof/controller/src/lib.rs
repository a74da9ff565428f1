//! Off-chain data fetcher.
//!
//! Turns a [`ProveInputs`] request into a [`StorageData`] item for the
//! circuit: the state root of the requested block and an `eth_getProof`
//! response are fetched from a [`StateProvider`], the proof is checked to
//! address the requested contract and slot, and verified against the root
//! before its value is trusted.

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::EIP1186AccountProofResponse;
use anyhow::ensure;
use async_trait::async_trait;
use log::info;
use storage_proof_core::{proof::verify_storage_proof, ProveInputs};
use storage_proof_sdk::StorageData;

mod rpc;

pub use rpc::RpcClient;

pub(crate) const CONTROLLER: &str = "CONTROLLER";

/// Source of historical Ethereum state.
#[async_trait]
pub trait StateProvider: Send + Sync {
    async fn state_root(&self, block: u64) -> anyhow::Result<B256>;

    async fn get_proof(
        &self,
        address: Address,
        keys: Vec<B256>,
        block: u64,
    ) -> anyhow::Result<EIP1186AccountProofResponse>;
}

pub async fn get_storage_data<P: StateProvider + ?Sized>(
    provider: &P,
    inputs: &ProveInputs,
) -> anyhow::Result<StorageData> {
    let ProveInputs {
        contract,
        slot,
        block,
    } = *inputs;

    let root = provider.state_root(block).await?;
    info!(target: CONTROLLER, "state root at block {block}: {root}");

    let proof = provider.get_proof(contract, vec![slot], block).await?;
    ensure!(
        proof.address == contract,
        "proof is for account {}, requested {contract}",
        proof.address
    );
    ensure!(
        proof.storage_proof.len() == 1,
        "expected a single storage proof, got {}",
        proof.storage_proof.len()
    );

    let storage = &proof.storage_proof[0];
    ensure!(
        storage.key.as_b256() == slot,
        "proof is for slot {}, requested {slot}",
        storage.key.as_b256()
    );

    verify_storage_proof(root, &proof)?;

    let value = B256::from(storage.value);
    info!(target: CONTROLLER, "verified {contract}[{slot}] = {value} at block {block}");

    Ok(StorageData {
        block_num: block,
        address: contract,
        key: slot,
        value,
    })
}
