use log::info;

use crate::{
    error::{Error, Result},
    field,
    prover::{proof_tag, Proof},
    setup::VerifyingKey,
    witness::PublicWitness,
};

const VERIFIER: &str = "VERIFIER";

/// Checks `proof` against the verifying key and the claimed public witness.
pub fn verify(vk: &VerifyingKey, public: &PublicWitness, proof: &Proof) -> Result<()> {
    if public.values.len() != vk.num_public {
        return Err(Error::PublicInputCount {
            expected: vk.num_public,
            got: public.values.len(),
        });
    }
    if public.outputs != vk.outputs {
        return Err(Error::OutputLayout);
    }
    if let Some(index) = public.values.iter().position(|v| !field::is_canonical(v)) {
        return Err(Error::NonCanonical { index });
    }

    if proof_tag(vk, &public.values, &proof.witness_commitment) != proof.tag {
        return Err(Error::InvalidProof);
    }

    info!(target: VERIFIER, "proof verified against vk {}", vk.hash());

    Ok(())
}
