use std::{
    env,
    path::{Path, PathBuf},
};

pub const COMPILED_CIRCUIT_FILE: &str = "compiledCircuit";
pub const PK_FILE: &str = "pk";
pub const VK_FILE: &str = "vk";
pub const PROOF_FILE_PREFIX: &str = "proof-";

pub const APP_NAME: &str = "storage-proof-app";

pub fn home_dir() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `$HOME/circuitOut/storage-proof-app`
pub fn default_out_dir() -> PathBuf {
    home_dir().join("circuitOut").join(APP_NAME)
}

/// `$HOME/kzgsrs`
pub fn default_srs_dir() -> PathBuf {
    home_dir().join("kzgsrs")
}

pub fn workspace_dir() -> PathBuf {
    let manifest = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest.to_path_buf())
}

pub fn quickstart_dir() -> PathBuf {
    workspace_dir().join("quickstart")
}

/// Locations of the compile and prove outputs under one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub out_dir: PathBuf,
}

impl ArtifactPaths {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
        }
    }

    pub fn compiled_circuit(&self) -> PathBuf {
        self.out_dir.join(COMPILED_CIRCUIT_FILE)
    }

    pub fn pk(&self) -> PathBuf {
        self.out_dir.join(PK_FILE)
    }

    pub fn vk(&self) -> PathBuf {
        self.out_dir.join(VK_FILE)
    }

    /// Proof file for a slot, named after its 0x-prefixed 64-digit hex form.
    pub fn proof(&self, slot: &str) -> PathBuf {
        self.out_dir.join(format!("{PROOF_FILE_PREFIX}{slot}"))
    }
}
