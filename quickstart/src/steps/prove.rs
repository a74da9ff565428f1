use std::path::PathBuf;

use alloy_primitives::B256;
use anyhow::ensure;
use common::ArtifactPaths;
use log::info;
use storage_proof_circuit::StorageSlotCircuit;
use storage_proof_controller::{get_storage_data, StateProvider};
use storage_proof_core::ProveInputs;
use storage_proof_sdk::{
    new_full_witness, prove, read_circuit_from, read_pk_from, read_vk_from, verify, write_to,
    App, PreparedRequest, Relay, SubmissionReceipt,
};

use crate::{config::QuickstartConfig, QUICKSTART};

#[derive(Debug)]
pub struct ProveOutcome {
    pub proof_path: PathBuf,
    pub prepared: PreparedRequest,
    pub receipt: SubmissionReceipt,
}

/// Proves `contract.storage[slot]` at `block` with the compiled artifacts,
/// prepares the request and submits the proof to the relay.
pub async fn prove_slot<P, R>(
    config: &QuickstartConfig,
    paths: &ArtifactPaths,
    provider: &P,
    relay: &R,
    slot: B256,
    block: u64,
) -> anyhow::Result<ProveOutcome>
where
    P: StateProvider + ?Sized,
    R: Relay + ?Sized,
{
    ensure!(block != 0, "--block is required");

    info!(target: QUICKSTART, "reading circuit, pk and vk from {}", paths.out_dir.display());
    let compiled = read_circuit_from(paths.compiled_circuit())?;
    let pk = read_pk_from(paths.pk())?;
    let vk = read_vk_from(paths.vk())?;

    let inputs = ProveInputs {
        contract: config.contract_address,
        slot,
        block,
    };
    let data = get_storage_data(provider, &inputs).await?;

    let circuit = StorageSlotCircuit;
    let mut app = App::new()
        .with_nonce(config.nonce)
        .with_fee_schedule(config.fees.clone());
    app.add_storage(data);

    info!(target: QUICKSTART, "proving slot {slot} at block {block}");
    let input = app.build_circuit_input(&circuit)?;
    let (witness, public) = new_full_witness(&circuit, &input)?;
    let proof = prove(&compiled, &pk, &witness)?;

    let proof_path = paths.proof(&slot.to_string());
    write_to(&proof, &proof_path)?;

    verify(&vk, &public, &proof)?;
    info!(target: QUICKSTART, "proof verified locally");

    let prepared = app.prepare_request(
        &vk,
        config.src_chain_id,
        config.dst_chain_id,
        config.refundee,
        config.app_contract,
    )?;

    info!(target: QUICKSTART, "submitting proof for request {}", prepared.request_id);
    let receipt = app.submit_proof(relay, &proof).await?;

    Ok(ProveOutcome {
        proof_path,
        prepared,
        receipt,
    })
}
