//! Builders for synthetic `eth_getProof` responses backed by single-leaf tries.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_rlp::{Encodable, Header};
use alloy_rpc_types_eth::{EIP1186AccountProofResponse, EIP1186StorageProof};
use alloy_serde::JsonStorageKey;

use crate::{
    consts::{EMPTY_ROOT, KECCAK_EMPTY},
    proof::{storage_leaf_value, AccountLeaf},
};

/// Leaf node holding the whole hashed path of `key`.
pub fn leaf_node(key: &[u8], value: &[u8]) -> Bytes {
    // hex-prefix flag for an even-length leaf path
    let path = [&[0x20u8][..], keccak256(key).as_slice()].concat();

    let payload_length = path.as_slice().length() + value.length();
    let mut out = Vec::with_capacity(payload_length + 3);
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    path.as_slice().encode(&mut out);
    value.encode(&mut out);

    out.into()
}

/// Root and proof of a trie containing only `key -> value`.
pub fn single_leaf_trie(key: &[u8], value: &[u8]) -> (B256, Vec<Bytes>) {
    let node = leaf_node(key, value);
    (keccak256(&node), vec![node])
}

/// A valid proof of `address.storage[slot] == value`, together with the state
/// root it verifies against.
pub fn single_slot_proof(
    address: Address,
    slot: B256,
    value: U256,
) -> (B256, EIP1186AccountProofResponse) {
    let (storage_hash, storage_nodes) = match storage_leaf_value(value) {
        Some(leaf) => single_leaf_trie(slot.as_slice(), &leaf),
        None => (EMPTY_ROOT, vec![]),
    };

    let account = AccountLeaf {
        nonce: 1,
        balance: U256::ZERO,
        storage_root: storage_hash,
        code_hash: KECCAK_EMPTY,
    };
    let (state_root, account_proof) =
        single_leaf_trie(address.as_slice(), &alloy_rlp::encode(account));

    let response = EIP1186AccountProofResponse {
        address,
        balance: account.balance,
        code_hash: account.code_hash,
        nonce: account.nonce,
        storage_hash,
        account_proof,
        storage_proof: vec![EIP1186StorageProof {
            key: JsonStorageKey::from(slot),
            value,
            proof: storage_nodes,
        }],
    };

    (state_root, response)
}
