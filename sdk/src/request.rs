//! Cross-chain proof requests.

use alloy_primitives::{keccak256, Address, Bytes, B256, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use serde::{Deserialize, Serialize};

use crate::data::{CircuitInput, DataKind};

sol! {
    function sendRequest(
        bytes32 requestId,
        uint64 nonce,
        address refundee,
        address callback,
        bytes32 vkHash,
        uint64 dstChainId
    ) external payable;
}

/// Relay fees, in wei.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeSchedule {
    pub base_fee: U256,
    pub per_receipt: U256,
    pub per_storage: U256,
    pub per_transaction: U256,
}

impl FeeSchedule {
    /// Padding items are free; only real items are charged.
    pub fn fee(&self, input: &CircuitInput) -> U256 {
        [
            (self.per_receipt, DataKind::Receipt),
            (self.per_storage, DataKind::Storage),
            (self.per_transaction, DataKind::Transaction),
        ]
        .into_iter()
        .fold(self.base_fee, |acc, (price, kind)| {
            acc.saturating_add(price.saturating_mul(U256::from(input.count(kind))))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub request_id: B256,
    pub verifying_key_hash: B256,
    pub output_commitment: B256,
    pub src_chain_id: u64,
    pub dst_chain_id: u64,
    pub refundee: Address,
    pub callback: Address,
    pub nonce: u64,
    pub fee: U256,
}

impl Request {
    pub fn compute_request_id(
        verifying_key_hash: B256,
        output_commitment: B256,
        src_chain_id: u64,
        dst_chain_id: u64,
        nonce: u64,
    ) -> B256 {
        keccak256(
            (
                verifying_key_hash,
                output_commitment,
                src_chain_id,
                dst_chain_id,
                nonce,
            )
                .abi_encode(),
        )
    }

    /// Calldata for the on-chain `sendRequest` entry point.
    pub fn calldata(&self) -> Bytes {
        sendRequestCall {
            requestId: self.request_id,
            nonce: self.nonce,
            refundee: self.refundee,
            callback: self.callback,
            vkHash: self.verifying_key_hash,
            dstChainId: self.dst_chain_id,
        }
        .abi_encode()
        .into()
    }
}
