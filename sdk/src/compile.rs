use alloy_primitives::{Keccak256, B256};
use log::info;
use serde::{Deserialize, Serialize};

use crate::{
    api::OutputKind,
    circuit::{synthesize, AppCircuit},
    constraint::ConstraintSystem,
    data::{Allocation, CircuitInput},
    error::Result,
};

const COMPILER: &str = "COMPILER";

/// The constraint system of a circuit together with its output layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledCircuit {
    pub allocation: Allocation,
    pub cs: ConstraintSystem,
    pub outputs: Vec<OutputKind>,
}

impl CompiledCircuit {
    /// Identifies the circuit; keys and proofs are only valid for the digest
    /// they were produced under.
    pub fn digest(&self) -> B256 {
        let mut hasher = Keccak256::new();
        hasher.update(self.cs.digest());
        hasher.update((self.allocation.max_receipts as u64).to_be_bytes());
        hasher.update((self.allocation.max_storage as u64).to_be_bytes());
        hasher.update((self.allocation.max_transactions as u64).to_be_bytes());
        for output in &self.outputs {
            let (tag, width) = match output {
                OutputKind::Uint(bits) => (0u8, *bits),
                OutputKind::Address => (1, 160),
                OutputKind::Bytes32 => (2, 256),
                OutputKind::Bool => (3, 1),
            };
            hasher.update([tag]);
            hasher.update(width.to_be_bytes());
        }
        hasher.finalize()
    }

    pub fn num_public(&self) -> usize {
        self.cs.num_public
    }
}

/// Compiles `circuit` into a constraint system. The input only provides the
/// witness shape; the result is independent of the values it carries.
pub fn compile<C: AppCircuit + ?Sized>(
    circuit: &C,
    input: &CircuitInput,
) -> Result<CompiledCircuit> {
    let synthesized = synthesize(circuit, input)?.finish();

    let compiled = CompiledCircuit {
        allocation: input.allocation,
        cs: synthesized.cs,
        outputs: synthesized.outputs,
    };

    info!(
        target: COMPILER,
        "compiled circuit {}: {} constraints, {} public / {} private variables",
        compiled.digest(),
        compiled.cs.len(),
        compiled.cs.num_public,
        compiled.cs.num_private,
    );

    Ok(compiled)
}
