//! Witness data: the raw records fed into a circuit and their in-circuit views.

use core::fmt;

use alloy_primitives::{Address, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    api::{Bytes32, CircuitApi},
    constraint::Variable,
    error::{Error, Result},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataKind {
    Receipt,
    Storage,
    Transaction,
}

impl fmt::Display for DataKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataKind::Receipt => write!(f, "receipt"),
            DataKind::Storage => write!(f, "storage"),
            DataKind::Transaction => write!(f, "transaction"),
        }
    }
}

/// A storage slot value at a given block height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageData {
    pub block_num: u64,
    pub address: Address,
    pub key: B256,
    pub value: B256,
}

/// Upper bounds on the number of items of each kind a circuit consumes.
/// Fixed at compile time; it determines the constraint-system shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub max_receipts: usize,
    pub max_storage: usize,
    pub max_transactions: usize,
}

impl Allocation {
    pub fn new(max_receipts: usize, max_storage: usize, max_transactions: usize) -> Self {
        Self {
            max_receipts,
            max_storage,
            max_transactions,
        }
    }

    pub fn max(&self, kind: DataKind) -> usize {
        match kind {
            DataKind::Receipt => self.max_receipts,
            DataKind::Storage => self.max_storage,
            DataKind::Transaction => self.max_transactions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.max_receipts == 0 && self.max_storage == 0 && self.max_transactions == 0
    }
}

/// Concrete circuit input, padded to the allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitInput {
    pub allocation: Allocation,
    pub storage: Vec<StorageData>,
    /// `true` for real items, `false` for padding.
    pub storage_toggles: Vec<bool>,
}

impl CircuitInput {
    pub fn new(allocation: Allocation, storage: Vec<StorageData>) -> Result<Self> {
        if allocation.is_empty() {
            return Err(Error::EmptyAllocation);
        }
        for kind in [DataKind::Receipt, DataKind::Transaction] {
            if allocation.max(kind) > 0 {
                return Err(Error::UnsupportedDataKind(kind));
            }
        }
        if storage.len() > allocation.max_storage {
            return Err(Error::TooManyItems {
                kind: DataKind::Storage,
                got: storage.len(),
                max: allocation.max_storage,
            });
        }

        let mut storage_toggles = vec![true; storage.len()];
        storage_toggles.resize(allocation.max_storage, false);

        let mut storage = storage;
        storage.resize(allocation.max_storage, StorageData::default());

        Ok(Self {
            allocation,
            storage,
            storage_toggles,
        })
    }

    pub fn count(&self, kind: DataKind) -> usize {
        match kind {
            DataKind::Storage => self.storage_toggles.iter().filter(|t| **t).count(),
            DataKind::Receipt | DataKind::Transaction => 0,
        }
    }
}

/// In-circuit view of a [`StorageData`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageSlot {
    pub block_num: Variable,
    pub contract: Variable,
    pub key: Bytes32,
    pub value: Bytes32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPoints<T> {
    pub raw: Vec<T>,
    pub toggles: Vec<Variable>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInput {
    pub storage_slots: DataPoints<StorageSlot>,
}

/// Splits a word into its high and low 128-bit halves.
pub fn split_word(word: &B256) -> (U256, U256) {
    (
        U256::from_be_slice(&word[..16]),
        U256::from_be_slice(&word[16..]),
    )
}

fn alloc_bytes32(api: &mut CircuitApi, word: &B256) -> Result<Bytes32> {
    let (hi, lo) = split_word(word);
    let hi = api.alloc_private(hi);
    let lo = api.alloc_private(lo);
    api.to_binary(hi, 128)?;
    api.to_binary(lo, 128)?;
    Ok(Bytes32 { hi, lo })
}

fn alloc_storage(api: &mut CircuitApi, data: &StorageData) -> Result<StorageSlot> {
    let block_num = api.alloc_private(U256::from(data.block_num));
    api.to_binary(block_num, 64)?;

    let contract = api.alloc_private(U256::from_be_slice(data.address.as_slice()));
    api.to_binary(contract, 160)?;

    Ok(StorageSlot {
        block_num,
        contract,
        key: alloc_bytes32(api, &data.key)?,
        value: alloc_bytes32(api, &data.value)?,
    })
}

impl DataInput {
    pub(crate) fn allocate(api: &mut CircuitApi, input: &CircuitInput) -> Result<Self> {
        let raw = input
            .storage
            .iter()
            .map(|data| alloc_storage(api, data))
            .collect::<Result<Vec<_>>>()?;

        let toggles = input
            .storage_toggles
            .iter()
            .map(|toggle| {
                let var = api.alloc_private(U256::from(*toggle as u8));
                api.assert_is_boolean(var);
                var
            })
            .collect();

        Ok(Self {
            storage_slots: DataPoints { raw, toggles },
        })
    }
}

/// Indexed access over a [`DataPoints`] collection.
pub struct DataStream<'a, T> {
    points: &'a DataPoints<T>,
}

impl<'a, T> DataStream<'a, T> {
    pub fn new(points: &'a DataPoints<T>) -> Self {
        Self { points }
    }

    pub fn get(&self, index: usize) -> Result<&'a T> {
        self.points.raw.get(index).ok_or(Error::IndexOutOfBounds {
            index,
            len: self.points.raw.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.points.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.raw.is_empty()
    }

    /// Items paired with their validity toggle.
    pub fn iter(&self) -> impl Iterator<Item = (&'a T, Variable)> + 'a {
        self.points
            .raw
            .iter()
            .zip(self.points.toggles.iter().copied())
    }

    /// Number of real (non-padding) items, as a circuit variable.
    pub fn count(&self, api: &mut CircuitApi) -> Variable {
        api.sum(&self.points.toggles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(block_num: u64) -> StorageData {
        StorageData {
            block_num,
            address: Address::repeat_byte(0x11),
            key: B256::repeat_byte(0x22),
            value: B256::with_last_byte(7),
        }
    }

    #[test]
    fn input_is_padded_to_the_allocation() {
        let input = CircuitInput::new(Allocation::new(0, 3, 0), vec![slot(1)]).unwrap();

        assert_eq!(input.storage.len(), 3);
        assert_eq!(input.storage_toggles, vec![true, false, false]);
        assert_eq!(input.storage[2], StorageData::default());
        assert_eq!(input.count(DataKind::Storage), 1);
    }

    #[test]
    fn bounds_are_enforced() {
        let err = CircuitInput::new(Allocation::new(0, 1, 0), vec![slot(1), slot(2)]).unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyItems {
                kind: DataKind::Storage,
                got: 2,
                max: 1
            }
        ));

        assert!(matches!(
            CircuitInput::new(Allocation::default(), vec![]),
            Err(Error::EmptyAllocation)
        ));
        assert!(matches!(
            CircuitInput::new(Allocation::new(2, 1, 0), vec![]),
            Err(Error::UnsupportedDataKind(DataKind::Receipt))
        ));
    }

    #[test]
    fn words_split_into_halves() {
        let mut word = B256::ZERO;
        word[15] = 1;
        word[31] = 2;

        assert_eq!(split_word(&word), (U256::from(1), U256::from(2)));
    }

    #[test]
    fn stream_access() {
        let mut api = CircuitApi::new();
        let input = CircuitInput::new(Allocation::new(0, 2, 0), vec![slot(5)]).unwrap();
        let data = DataInput::allocate(&mut api, &input).unwrap();
        let stream = DataStream::new(&data.storage_slots);

        assert_eq!(stream.len(), 2);
        let first = stream.get(0).unwrap();
        assert_eq!(api.value(first.block_num), U256::from(5));
        assert!(matches!(
            stream.get(2),
            Err(Error::IndexOutOfBounds { index: 2, len: 2 })
        ));

        let count = stream.count(&mut api);
        assert_eq!(api.value(count), U256::from(1));
    }
}
