use alloy_primitives::{keccak256, Address, B256, U256};
use alloy_rlp::RlpEncodable;
use alloy_rpc_types_eth::EIP1186AccountProofResponse;
use alloy_sol_types::SolValue;
use alloy_trie::{proof::verify_proof, Nibbles};
use anyhow::anyhow;

use crate::consts::{EMPTY_ROOT, KECCAK_EMPTY};

/// Storage key of `mapping[holder]` for a mapping declared at `slot_index`.
pub fn mapping_slot_key(holder: Address, slot_index: u64) -> B256 {
    keccak256((holder, U256::from(slot_index)).abi_encode())
}

/// Account as stored in the state trie leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, RlpEncodable)]
pub struct AccountLeaf {
    pub nonce: u64,
    pub balance: U256,
    pub storage_root: B256,
    pub code_hash: B256,
}

impl AccountLeaf {
    pub fn from_proof(proof: &EIP1186AccountProofResponse) -> Self {
        Self {
            nonce: proof.nonce,
            balance: proof.balance,
            storage_root: proof.storage_hash,
            code_hash: proof.code_hash,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nonce == 0
            && self.balance.is_zero()
            && self.storage_root == EMPTY_ROOT
            && self.code_hash == KECCAK_EMPTY
    }
}

/// Expected trie leaf value for a storage word; zero words are absent.
pub fn storage_leaf_value(value: U256) -> Option<Vec<u8>> {
    (!value.is_zero()).then(|| alloy_rlp::encode(value))
}

/// Verifies an `eth_getProof` response against `state_root`: the account
/// proof first, then each storage proof against the account's storage root.
pub fn verify_storage_proof(
    state_root: B256,
    proof: &EIP1186AccountProofResponse,
) -> anyhow::Result<()> {
    let account = AccountLeaf::from_proof(proof);
    let expected = (!account.is_empty()).then(|| alloy_rlp::encode(account));

    verify_proof(
        state_root,
        Nibbles::unpack(keccak256(proof.address)),
        expected,
        &proof.account_proof,
    )
    .map_err(|e| anyhow!("invalid account proof for {}: {e:?}", proof.address))?;

    for slot in &proof.storage_proof {
        let key = slot.key.as_b256();

        verify_proof(
            proof.storage_hash,
            Nibbles::unpack(keccak256(key)),
            storage_leaf_value(slot.value),
            &slot.proof,
        )
        .map_err(|e| anyhow!("invalid storage proof for slot {key}: {e:?}"))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloy_primitives::address;

    use super::*;

    #[test]
    fn mapping_key_matches_solidity_layout() {
        let holder = address!("0000000000000000000000000000000000000001");

        let mut preimage = [0u8; 64];
        preimage[31] = 1;
        preimage[63] = 3;

        assert_eq!(mapping_slot_key(holder, 3), keccak256(preimage));
        assert_ne!(mapping_slot_key(holder, 3), mapping_slot_key(holder, 4));
    }

    #[test]
    fn empty_account_is_detected() {
        let account = AccountLeaf {
            nonce: 0,
            balance: U256::ZERO,
            storage_root: EMPTY_ROOT,
            code_hash: KECCAK_EMPTY,
        };
        assert!(account.is_empty());
        assert!(!AccountLeaf { nonce: 1, ..account }.is_empty());
    }

    #[test]
    fn zero_words_have_no_leaf() {
        assert_eq!(storage_leaf_value(U256::ZERO), None);
        assert_eq!(storage_leaf_value(U256::from(0x42)), Some(vec![0x42]));
        assert_eq!(
            storage_leaf_value(U256::from(0x1234)),
            Some(vec![0x82, 0x12, 0x34])
        );
    }

    #[test]
    fn empty_roots_are_well_known() {
        assert_eq!(keccak256(b""), KECCAK_EMPTY);
        assert_eq!(keccak256([0x80u8]), EMPTY_ROOT);
    }
}
