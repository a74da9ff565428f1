//! Keccak-based Fiat-Shamir transcript.

use alloy_primitives::{Keccak256, B256, U256};

pub struct Transcript {
    hasher: Keccak256,
}

impl Transcript {
    pub fn new(label: &[u8]) -> Self {
        let mut hasher = Keccak256::new();
        hasher.update((label.len() as u64).to_be_bytes());
        hasher.update(label);
        Self { hasher }
    }

    pub fn append_bytes(&mut self, label: &[u8], bytes: &[u8]) {
        self.hasher.update(label);
        self.hasher.update((bytes.len() as u64).to_be_bytes());
        self.hasher.update(bytes);
    }

    pub fn append_word(&mut self, label: &[u8], word: &B256) {
        self.append_bytes(label, word.as_slice());
    }

    pub fn append_scalars(&mut self, label: &[u8], scalars: &[U256]) {
        self.hasher.update(label);
        self.hasher.update((scalars.len() as u64).to_be_bytes());
        for scalar in scalars {
            self.hasher.update(scalar.to_be_bytes::<32>());
        }
    }

    pub fn challenge(self) -> B256 {
        self.hasher.finalize()
    }
}
