use std::path::Path;

use common::ArtifactPaths;
use log::info;
use storage_proof_circuit::StorageSlotCircuit;
use storage_proof_sdk::{compile, setup, write_to, App, VerifyingKey};

use crate::{config::QuickstartConfig, QUICKSTART};

/// Compiles the circuit against the sample slot, runs the setup and writes
/// the circuit and both keys to `paths`.
pub fn compile_circuit(
    config: &QuickstartConfig,
    paths: &ArtifactPaths,
    srs_dir: &Path,
) -> anyhow::Result<VerifyingKey> {
    let circuit = StorageSlotCircuit;

    let mut app = App::new();
    app.add_storage(config.sample_storage());
    let input = app.build_circuit_input(&circuit)?;

    let compiled = compile(&circuit, &input)?;
    write_to(&compiled, paths.compiled_circuit())?;

    info!(target: QUICKSTART, "running setup with srs cache {}...", srs_dir.display());
    let (pk, vk) = setup(&compiled, srs_dir)?;
    write_to(&pk, paths.pk())?;
    write_to(&vk, paths.vk())?;

    info!(target: QUICKSTART, "artifacts written to {}", paths.out_dir.display());

    Ok(vk)
}
