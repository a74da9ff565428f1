//! Circuit proving the value of one storage slot at a block height.
//!
//! The application contract receives the outputs packed as
//! `block_num (8) || contract (20) || key (32) || value (32)`.

use alloy_primitives::{Address, B256};
use storage_proof_sdk::{
    Allocation, AppCircuit, CircuitApi, DataInput, DataStream, Error, Result,
};

/// Length of the packed public outputs.
pub const OUTPUT_LEN: usize = 8 + 20 + 32 + 32;

#[derive(Debug, Clone, Copy, Default)]
pub struct StorageSlotCircuit;

impl AppCircuit for StorageSlotCircuit {
    fn allocate(&self) -> Allocation {
        // one storage slot per proof, nothing else
        Allocation::new(0, 1, 0)
    }

    fn define(&self, api: &mut CircuitApi, input: &DataInput) -> Result<()> {
        let slots = DataStream::new(&input.storage_slots);
        let slot = slots.get(0)?;

        api.output_uint(64, slot.block_num)?;
        api.output_address(slot.contract)?;
        api.output_bytes32(slot.key)?;
        api.output_bytes32(slot.value)?;

        Ok(())
    }
}

/// Outputs of [`StorageSlotCircuit`], as seen by the application contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOutput {
    pub block_num: u64,
    pub contract: Address,
    pub key: B256,
    pub value: B256,
}

pub fn decode_output(bytes: &[u8]) -> Result<SlotOutput> {
    if bytes.len() != OUTPUT_LEN {
        return Err(Error::OutputLayout);
    }

    let mut block_num = [0u8; 8];
    block_num.copy_from_slice(&bytes[..8]);

    Ok(SlotOutput {
        block_num: u64::from_be_bytes(block_num),
        contract: Address::from_slice(&bytes[8..28]),
        key: B256::from_slice(&bytes[28..60]),
        value: B256::from_slice(&bytes[60..]),
    })
}
