mod compile;
mod prove;

pub use compile::compile_circuit;
pub use prove::{prove_slot, ProveOutcome};
