use alloy_primitives::{Address, B256};
use serde::{Deserialize, Serialize};

pub mod consts;
pub mod proof;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

/// A storage slot to fetch and prove.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProveInputs {
    pub contract: Address,
    pub slot: B256,
    pub block: u64,
}
