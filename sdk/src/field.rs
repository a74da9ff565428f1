//! Scalar field of BN254, carried in `U256`.

use alloy_primitives::U256;

/// `r = 0x30644e72e131a029b85045b68181585d2833e84879b9709143e1f593f0000001`
pub const MODULUS: U256 = U256::from_limbs([
    0x43e1f593f0000001,
    0x2833e84879b97091,
    0xb85045b68181585d,
    0x30644e72e131a029,
]);

/// Largest bit width that always fits below the modulus.
pub const CAPACITY_BITS: usize = 253;

pub fn reduce(a: U256) -> U256 {
    a.reduce_mod(MODULUS)
}

pub fn is_canonical(a: &U256) -> bool {
    *a < MODULUS
}

pub fn add(a: U256, b: U256) -> U256 {
    a.add_mod(b, MODULUS)
}

pub fn mul(a: U256, b: U256) -> U256 {
    a.mul_mod(b, MODULUS)
}

pub fn neg(a: U256) -> U256 {
    let a = reduce(a);
    if a.is_zero() {
        a
    } else {
        MODULUS - a
    }
}

pub fn sub(a: U256, b: U256) -> U256 {
    add(a, neg(b))
}
