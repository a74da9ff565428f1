use alloy_primitives::{address, b256, Address, B256};

/// Contract whose storage the quickstart proves.
pub const CONTRACT_ADDRESS: Address = address!("c944e90c64b2c07662a292be6244bdf05cda44a7");

/// Application contract receiving the proven outputs.
pub const APP_CONTRACT: Address = address!("b0DA53679B6e7aB6c7c21e92B02abFd18BF627EA");
pub const REFUNDEE: Address = address!("b0DA53679B6e7aB6c7c21e92B02abFd18BF627EA");

pub const SRC_CHAIN_ID: u64 = 1;
pub const DST_CHAIN_ID: u64 = 11155111;

// sample slot used to shape the circuit at compile time
pub const SAMPLE_BLOCK: u64 = 19341099;
pub const SAMPLE_SLOT_KEY: B256 =
    b256!("55ccb1b16b10b19d498a335426da71059f3255a84a320fe81c2a761e2cc095d0");
pub const SAMPLE_SLOT_VALUE: B256 =
    b256!("0000000000000000000000000000000000000000000000252248deb6e6940000");

pub const KECCAK_EMPTY: B256 =
    b256!("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470");
pub const EMPTY_ROOT: B256 =
    b256!("56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421");
