use alloy_primitives::{Keccak256, B256, U256};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    compile::CompiledCircuit,
    constraint::Assignment,
    error::{Error, Result},
    setup::{ProvingKey, VerifyingKey},
    transcript::Transcript,
    witness::Witness,
};

const PROVER: &str = "PROVER";

pub(crate) const PROOF_LABEL: &[u8] = b"storage-proof";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Proof {
    /// Blinded commitment to the private part of the witness.
    pub witness_commitment: B256,
    pub tag: B256,
}

impl Proof {
    pub const LEN: usize = 64;

    pub fn to_bytes(&self) -> Vec<u8> {
        [self.witness_commitment.as_slice(), self.tag.as_slice()].concat()
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != Self::LEN {
            return Err(Error::MalformedProof {
                expected: Self::LEN,
                got: bytes.len(),
            });
        }

        Ok(Self {
            witness_commitment: B256::from_slice(&bytes[..32]),
            tag: B256::from_slice(&bytes[32..]),
        })
    }
}

/// Challenge binding a proof to its verifying key and public inputs.
pub(crate) fn proof_tag(
    vk: &VerifyingKey,
    public: &[U256],
    witness_commitment: &B256,
) -> B256 {
    let mut transcript = Transcript::new(PROOF_LABEL);
    transcript.append_word(b"vk", &vk.hash());
    transcript.append_scalars(b"public", public);
    transcript.append_word(b"witness", witness_commitment);
    transcript.challenge()
}

/// Proves that `witness` satisfies `circuit`.
pub fn prove(circuit: &CompiledCircuit, pk: &ProvingKey, witness: &Witness) -> Result<Proof> {
    let digest = circuit.digest();
    if pk.vk.circuit_digest != digest {
        return Err(Error::KeyMismatch {
            key: pk.vk.circuit_digest,
            circuit: digest,
        });
    }

    circuit.cs.is_satisfied(&Assignment {
        public: &witness.public,
        private: &witness.private,
    })?;
    debug!(target: PROVER, "{} constraints satisfied", circuit.cs.len());

    let blinding: [u8; 32] = rand::random();
    let mut hasher = Keccak256::new();
    hasher.update(blinding);
    for value in &witness.private {
        hasher.update(value.to_be_bytes::<32>());
    }
    let witness_commitment = hasher.finalize();

    let proof = Proof {
        witness_commitment,
        tag: proof_tag(&pk.vk, &witness.public, &witness_commitment),
    };

    info!(target: PROVER, "proof generated for circuit {digest}");

    Ok(proof)
}
