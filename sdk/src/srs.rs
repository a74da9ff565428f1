//! Structured reference string and its on-disk cache.

use std::path::{Path, PathBuf};

use alloy_primitives::{keccak256, Keccak256, B256};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    io,
};

const SRS: &str = "SRS";

pub const MIN_LOG_SIZE: u32 = 4;
pub const MAX_LOG_SIZE: u32 = 26;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Srs {
    pub log_size: u32,
    pub elements: Vec<B256>,
    pub digest: B256,
}

impl Srs {
    /// Deterministically derives `2^log_size` elements.
    pub fn generate(log_size: u32) -> Self {
        let size = 1usize << log_size;
        let mut elements = Vec::with_capacity(size);

        let seed = [
            b"storage-proof-srs".as_slice(),
            log_size.to_be_bytes().as_slice(),
        ]
        .concat();
        let mut current = keccak256(seed);
        for _ in 0..size {
            elements.push(current);
            current = keccak256(current);
        }

        let digest = Self::compute_digest(log_size, &elements);
        Self {
            log_size,
            elements,
            digest,
        }
    }

    fn compute_digest(log_size: u32, elements: &[B256]) -> B256 {
        let mut hasher = Keccak256::new();
        hasher.update(log_size.to_be_bytes());
        for element in elements {
            hasher.update(element);
        }
        hasher.finalize()
    }

    pub fn size(&self) -> usize {
        self.elements.len()
    }

    pub fn is_intact(&self) -> bool {
        self.elements.len() == 1usize << self.log_size
            && Self::compute_digest(self.log_size, &self.elements) == self.digest
    }
}

/// Smallest log2 size whose domain holds `rows` rows.
pub fn log_size_for(rows: usize) -> Result<u32> {
    let log_size = rows
        .max(1)
        .next_power_of_two()
        .trailing_zeros()
        .max(MIN_LOG_SIZE);

    if log_size > MAX_LOG_SIZE {
        return Err(Error::CircuitTooLarge(log_size));
    }
    Ok(log_size)
}

/// Directory of previously generated SRS files, one per size.
#[derive(Debug, Clone)]
pub struct SrsCache {
    dir: PathBuf,
}

impl SrsCache {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self, log_size: u32) -> PathBuf {
        self.dir.join(format!("srs_{log_size}"))
    }

    pub fn load_or_generate(&self, log_size: u32) -> Result<Srs> {
        let path = self.path(log_size);

        if path.is_file() {
            match io::read_from::<Srs>(&path) {
                Ok(srs) if srs.log_size == log_size && srs.is_intact() => {
                    info!(target: SRS, "loaded srs 2^{log_size} from {}", path.display());
                    return Ok(srs);
                }
                Ok(_) => warn!(target: SRS, "cached srs at {} is corrupt, regenerating", path.display()),
                Err(e) => warn!(target: SRS, "failed to read cached srs at {}: {e}, regenerating", path.display()),
            }
        }

        info!(target: SRS, "generating srs 2^{log_size}...");
        let srs = Srs::generate(log_size);
        io::write_to(&srs, &path)?;
        info!(target: SRS, "cached srs at {}", path.display());

        Ok(srs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_round_up_to_powers_of_two() {
        assert_eq!(log_size_for(0).unwrap(), MIN_LOG_SIZE);
        assert_eq!(log_size_for(16).unwrap(), 4);
        assert_eq!(log_size_for(17).unwrap(), 5);
        assert_eq!(log_size_for(1500).unwrap(), 11);
        assert!(matches!(
            log_size_for((1 << MAX_LOG_SIZE) + 1),
            Err(Error::CircuitTooLarge(27))
        ));
    }

    #[test]
    fn generation_is_deterministic() {
        let a = Srs::generate(4);
        let b = Srs::generate(4);

        assert_eq!(a, b);
        assert_eq!(a.size(), 16);
        assert!(a.is_intact());
        assert_ne!(a.digest, Srs::generate(5).digest);
    }

    #[test]
    fn cache_reuses_and_repairs_files() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SrsCache::new(dir.path());

        let srs = cache.load_or_generate(5).unwrap();
        assert!(cache.path(5).is_file());
        assert_eq!(cache.load_or_generate(5).unwrap(), srs);

        let mut tampered = srs.clone();
        tampered.elements[3] = B256::ZERO;
        io::write_to(&tampered, cache.path(5)).unwrap();

        assert_eq!(cache.load_or_generate(5).unwrap(), srs);
    }
}
