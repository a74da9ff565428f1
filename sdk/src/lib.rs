//! Storage-proof circuit pipeline.
//!
//! The pipeline mirrors the lifecycle of a proof request:
//! - collect [`StorageData`] into an [`App`] and build a [`CircuitInput`]
//! - [`compile`] an [`AppCircuit`] into a [`CompiledCircuit`]
//! - run the one-time [`setup`] against a cached structured reference string
//! - [`prove`] a witness and [`verify`] the result locally
//! - prepare the cross-chain request and submit the proof to a [`Relay`]
//!
//! The proving backend is a transparent mock: constraint satisfaction is
//! checked for real and proofs are bound to the verifying key and public
//! outputs, but proofs are neither succinct nor sound against a dishonest
//! prover.

pub mod api;
pub mod app;
pub mod circuit;
pub mod compile;
pub mod constraint;
pub mod data;
pub mod error;
pub mod field;
pub mod io;
pub mod prover;
pub mod relay;
pub mod request;
pub mod setup;
pub mod srs;
pub mod testing;
pub mod transcript;
pub mod verifier;
pub mod witness;

pub use api::{Bytes32, CircuitApi, OutputKind};
pub use app::{App, PreparedRequest};
pub use circuit::AppCircuit;
pub use compile::{compile, CompiledCircuit};
pub use constraint::{ConstraintSystem, LinearCombination, Variable};
pub use data::{
    Allocation, CircuitInput, DataInput, DataKind, DataPoints, DataStream, StorageData,
    StorageSlot,
};
pub use error::{Error, Result};
pub use io::{read_circuit_from, read_from, read_pk_from, read_proof_from, read_vk_from, write_to};
pub use prover::{prove, Proof};
pub use relay::{HttpRelay, ProofSubmission, Relay, SubmissionReceipt};
pub use request::{FeeSchedule, Request};
pub use setup::{setup, ProvingKey, VerifyingKey};
pub use srs::{Srs, SrsCache};
pub use verifier::verify;
pub use witness::{new_full_witness, PublicWitness, Witness};
