//! Helpers for unit-testing application circuits.

use crate::{
    circuit::AppCircuit,
    compile::compile,
    constraint::Assignment,
    data::CircuitInput,
    error::Result,
    witness::new_full_witness,
};

/// Compiles `circuit`, assigns `input` and checks every constraint holds.
pub fn prover_succeeded<C: AppCircuit + ?Sized>(circuit: &C, input: &CircuitInput) -> Result<()> {
    let compiled = compile(circuit, input)?;
    let (witness, _) = new_full_witness(circuit, input)?;

    compiled.cs.is_satisfied(&Assignment {
        public: &witness.public,
        private: &witness.private,
    })
}
