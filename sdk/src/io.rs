//! On-disk artifacts: compiled circuits, keys, proofs and SRS files.
//!
//! Each file starts with a small header (magic, format version, artifact
//! kind) followed by the bincode body, so that e.g. a proving key is never
//! silently read back as a verifying key.

use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write as _},
    path::Path,
};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    compile::CompiledCircuit,
    error::{Error, Result},
    prover::Proof,
    setup::{ProvingKey, VerifyingKey},
    srs::Srs,
};

const MAGIC: [u8; 4] = *b"SPRF";
const VERSION: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArtifactKind {
    CompiledCircuit,
    ProvingKey,
    VerifyingKey,
    Proof,
    Srs,
}

pub trait Artifact: Serialize + DeserializeOwned {
    const KIND: ArtifactKind;
}

impl Artifact for CompiledCircuit {
    const KIND: ArtifactKind = ArtifactKind::CompiledCircuit;
}

impl Artifact for ProvingKey {
    const KIND: ArtifactKind = ArtifactKind::ProvingKey;
}

impl Artifact for VerifyingKey {
    const KIND: ArtifactKind = ArtifactKind::VerifyingKey;
}

impl Artifact for Proof {
    const KIND: ArtifactKind = ArtifactKind::Proof;
}

impl Artifact for Srs {
    const KIND: ArtifactKind = ArtifactKind::Srs;
}

/// Serializes `artifact` to `path`, creating parent directories as needed.
pub fn write_to<T: Artifact>(artifact: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(&mut writer, &(MAGIC, VERSION, T::KIND))?;
    bincode::serialize_into(&mut writer, artifact)?;
    writer.flush()?;

    Ok(())
}

pub fn read_from<T: Artifact>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let mut reader = BufReader::new(File::open(path)?);

    let (magic, version, kind): ([u8; 4], u16, ArtifactKind) =
        bincode::deserialize_from(&mut reader).map_err(|_| Error::BadMagic(path.into()))?;

    if magic != MAGIC {
        return Err(Error::BadMagic(path.into()));
    }
    if version != VERSION {
        return Err(Error::ArtifactVersion {
            path: path.into(),
            version,
        });
    }
    if kind != T::KIND {
        return Err(Error::WrongArtifact {
            path: path.into(),
            expected: T::KIND,
            found: kind,
        });
    }

    Ok(bincode::deserialize_from(&mut reader)?)
}

pub fn read_circuit_from(path: impl AsRef<Path>) -> Result<CompiledCircuit> {
    read_from(path)
}

pub fn read_pk_from(path: impl AsRef<Path>) -> Result<ProvingKey> {
    read_from(path)
}

pub fn read_vk_from(path: impl AsRef<Path>) -> Result<VerifyingKey> {
    read_from(path)
}

pub fn read_proof_from(path: impl AsRef<Path>) -> Result<Proof> {
    read_from(path)
}

#[cfg(test)]
mod tests {
    use alloy_primitives::B256;

    use super::*;

    #[test]
    fn artifacts_round_trip_through_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("proof");
        let proof = Proof {
            witness_commitment: B256::repeat_byte(1),
            tag: B256::repeat_byte(2),
        };

        write_to(&proof, &path).unwrap();

        assert_eq!(read_proof_from(&path).unwrap(), proof);
    }

    #[test]
    fn kind_mismatch_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("proof");
        let proof = Proof {
            witness_commitment: B256::ZERO,
            tag: B256::ZERO,
        };
        write_to(&proof, &path).unwrap();

        let err = read_vk_from(&path).unwrap_err();
        assert!(matches!(
            err,
            Error::WrongArtifact {
                expected: ArtifactKind::VerifyingKey,
                found: ArtifactKind::Proof,
                ..
            }
        ));
    }

    #[test]
    fn foreign_files_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage");
        fs::write(&path, b"definitely not an artifact").unwrap();

        assert!(matches!(read_pk_from(&path), Err(Error::BadMagic(_))));
    }
}
