use std::{io, path::PathBuf};

use alloy_primitives::B256;
use thiserror::Error;

use crate::{data::DataKind, io::ArtifactKind};

#[derive(Debug, Error)]
pub enum Error {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] bincode::Error),
    #[error("relay error: {0}")]
    Relay(#[from] reqwest::Error),
    #[error("relay rejected the submission: {0}")]
    RelayRejected(String),

    #[error("{kind} data count {got} exceeds the allocated maximum of {max}")]
    TooManyItems {
        kind: DataKind,
        got: usize,
        max: usize,
    },
    #[error("circuit allocates no data")]
    EmptyAllocation,
    #[error("{0} data is not supported by this pipeline")]
    UnsupportedDataKind(DataKind),
    #[error("circuit input was built for allocation {input:?}, circuit allocates {circuit:?}")]
    AllocationMismatch {
        input: crate::data::Allocation,
        circuit: crate::data::Allocation,
    },
    #[error("data stream index {index} out of bounds (len {len})")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("unsupported bit width {0}")]
    InvalidBitWidth(usize),

    #[error("constraint {index} is not satisfied")]
    Unsatisfied { index: usize },
    #[error(
        "witness shape mismatch: expected {expected_public} public / {expected_private} private values, got {public} / {private}"
    )]
    WitnessShape {
        expected_public: usize,
        expected_private: usize,
        public: usize,
        private: usize,
    },
    #[error("proving key was generated for circuit {key}, not {circuit}")]
    KeyMismatch { key: B256, circuit: B256 },
    #[error("circuit needs 2^{0} rows, above the supported maximum")]
    CircuitTooLarge(u32),

    #[error("expected {expected} public inputs, got {got}")]
    PublicInputCount { expected: usize, got: usize },
    #[error("output layout does not match the verifying key")]
    OutputLayout,
    #[error("public input {index} is not a canonical field element")]
    NonCanonical { index: usize },
    #[error("proof verification failed")]
    InvalidProof,
    #[error("malformed proof: expected {expected} bytes, got {got}")]
    MalformedProof { expected: usize, got: usize },

    #[error("{}: not an artifact file", .0.display())]
    BadMagic(PathBuf),
    #[error("{}: expected {expected:?} artifact, found {found:?}", .path.display())]
    WrongArtifact {
        path: PathBuf,
        expected: ArtifactKind,
        found: ArtifactKind,
    },
    #[error("{}: unsupported artifact version {version}", .path.display())]
    ArtifactVersion { path: PathBuf, version: u16 },

    #[error("circuit input has not been built")]
    InputNotBuilt,
    #[error("no request has been prepared")]
    RequestNotPrepared,
}

pub type Result<T> = core::result::Result<T, Error>;
