use alloy_primitives::{keccak256, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    api::OutputKind,
    circuit::{synthesize, AppCircuit},
    data::CircuitInput,
    error::{Error, Result},
};

/// Full assignment of a circuit: public outputs and private values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness {
    pub public: Vec<U256>,
    pub private: Vec<U256>,
}

/// The part of the witness a verifier sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicWitness {
    pub values: Vec<U256>,
    pub outputs: Vec<OutputKind>,
}

impl PublicWitness {
    /// Tightly packed output values, in declaration order.
    pub fn output_bytes(&self) -> Result<Vec<u8>> {
        let expected: usize = self.outputs.iter().map(OutputKind::num_fields).sum();
        if expected != self.values.len() {
            return Err(Error::PublicInputCount {
                expected,
                got: self.values.len(),
            });
        }

        let mut out = Vec::with_capacity(self.outputs.iter().map(OutputKind::byte_len).sum());
        let mut values = self.values.iter();

        for output in &self.outputs {
            match output {
                OutputKind::Bytes32 => {
                    for half in values.by_ref().take(2) {
                        out.extend_from_slice(&half.to_be_bytes::<32>()[16..]);
                    }
                }
                kind => {
                    if let Some(value) = values.next() {
                        let bytes = value.to_be_bytes::<32>();
                        out.extend_from_slice(&bytes[32 - kind.byte_len()..]);
                    }
                }
            }
        }

        Ok(out)
    }

    pub fn output_commitment(&self) -> Result<B256> {
        Ok(keccak256(self.output_bytes()?))
    }
}

/// Runs the circuit over `input`, producing the full and public witness.
pub fn new_full_witness<C: AppCircuit + ?Sized>(
    circuit: &C,
    input: &CircuitInput,
) -> Result<(Witness, PublicWitness)> {
    let synthesized = synthesize(circuit, input)?.finish();

    let public = PublicWitness {
        values: synthesized.public.clone(),
        outputs: synthesized.outputs,
    };
    let witness = Witness {
        public: synthesized.public,
        private: synthesized.private,
    };

    Ok((witness, public))
}
