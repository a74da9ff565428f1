//! Constraint-generation DSL handed to [`crate::AppCircuit::define`].
//!
//! Every operation both records constraints and computes the value of the
//! variables it allocates, so one pass over a circuit yields the constraint
//! system and a full assignment. The shape of the recorded system depends
//! only on the sequence of calls, never on the values flowing through them.

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use crate::{
    constraint::{Constraint, ConstraintSystem, LinearCombination, Variable},
    error::{Error, Result},
    field,
};

/// A 32-byte word split into two 128-bit halves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes32 {
    pub hi: Variable,
    pub lo: Variable,
}

/// Layout entry of the public outputs, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputKind {
    Uint(u16),
    Address,
    Bytes32,
    Bool,
}

impl OutputKind {
    /// Number of public field elements carrying the output.
    pub fn num_fields(&self) -> usize {
        match self {
            OutputKind::Bytes32 => 2,
            _ => 1,
        }
    }

    /// Width of the output in the packed output bytes.
    pub fn byte_len(&self) -> usize {
        match self {
            OutputKind::Uint(bits) => *bits as usize / 8,
            OutputKind::Address => 20,
            OutputKind::Bytes32 => 32,
            OutputKind::Bool => 1,
        }
    }
}

#[derive(Debug, Default)]
pub struct CircuitApi {
    cs: ConstraintSystem,
    public: Vec<U256>,
    private: Vec<U256>,
    outputs: Vec<OutputKind>,
}

pub(crate) struct Synthesized {
    pub cs: ConstraintSystem,
    pub public: Vec<U256>,
    pub private: Vec<U256>,
    pub outputs: Vec<OutputKind>,
}

impl CircuitApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn finish(self) -> Synthesized {
        Synthesized {
            cs: self.cs,
            public: self.public,
            private: self.private,
            outputs: self.outputs,
        }
    }

    /// Value currently assigned to `var`, which must come from this instance.
    pub(crate) fn value(&self, var: Variable) -> U256 {
        match var {
            Variable::One => U256::from(1),
            Variable::Public(i) => self.public[i],
            Variable::Private(i) => self.private[i],
        }
    }

    pub fn num_constraints(&self) -> usize {
        self.cs.len()
    }

    pub(crate) fn alloc_private(&mut self, value: U256) -> Variable {
        self.private.push(field::reduce(value));
        self.cs.num_private += 1;
        Variable::Private(self.private.len() - 1)
    }

    fn alloc_public(&mut self, value: U256) -> Variable {
        self.public.push(field::reduce(value));
        self.cs.num_public += 1;
        Variable::Public(self.public.len() - 1)
    }

    fn enforce(
        &mut self,
        a: impl Into<LinearCombination>,
        b: impl Into<LinearCombination>,
        c: impl Into<LinearCombination>,
    ) {
        self.cs.constraints.push(Constraint {
            a: a.into(),
            b: b.into(),
            c: c.into(),
        });
    }

    pub fn constant(&mut self, value: U256) -> Variable {
        let var = self.alloc_private(value);
        self.enforce(var, Variable::One, LinearCombination::constant(value));
        var
    }

    pub fn add(&mut self, a: Variable, b: Variable) -> Variable {
        let out = self.alloc_private(field::add(self.value(a), self.value(b)));
        let sum = LinearCombination::from(a).with_term(b, U256::from(1));
        self.enforce(sum, Variable::One, out);
        out
    }

    pub fn sub(&mut self, a: Variable, b: Variable) -> Variable {
        let out = self.alloc_private(field::sub(self.value(a), self.value(b)));
        let diff = LinearCombination::from(a).with_term(b, field::neg(U256::from(1)));
        self.enforce(diff, Variable::One, out);
        out
    }

    pub fn mul(&mut self, a: Variable, b: Variable) -> Variable {
        let out = self.alloc_private(field::mul(self.value(a), self.value(b)));
        self.enforce(a, b, out);
        out
    }

    /// `cond ? a : b`; `cond` must be boolean.
    pub fn select(&mut self, cond: Variable, a: Variable, b: Variable) -> Variable {
        self.assert_is_boolean(cond);

        let diff = field::sub(self.value(a), self.value(b));
        let t = self.alloc_private(field::mul(self.value(cond), diff));
        let a_minus_b = LinearCombination::from(a).with_term(b, field::neg(U256::from(1)));
        self.enforce(cond, a_minus_b, t);

        let out = self.alloc_private(field::add(self.value(b), self.value(t)));
        let b_plus_t = LinearCombination::from(b).with_term(t, U256::from(1));
        self.enforce(b_plus_t, Variable::One, out);
        out
    }

    pub fn assert_is_equal(&mut self, a: Variable, b: Variable) {
        let diff = LinearCombination::from(a).with_term(b, field::neg(U256::from(1)));
        self.enforce(diff, Variable::One, LinearCombination::zero());
    }

    pub fn assert_is_boolean(&mut self, a: Variable) {
        self.enforce(a, a, a);
    }

    /// Decomposes `v` into `n` little-endian bits. Doubles as a range check:
    /// the recomposition constraint only holds when `v < 2^n`.
    pub fn to_binary(&mut self, v: Variable, n: usize) -> Result<Vec<Variable>> {
        if n == 0 || n > field::CAPACITY_BITS {
            return Err(Error::InvalidBitWidth(n));
        }

        let value = self.value(v);
        let bits: Vec<Variable> = (0..n)
            .map(|i| {
                let bit = self.alloc_private(U256::from(value.bit(i) as u8));
                self.assert_is_boolean(bit);
                bit
            })
            .collect();

        let recomposed = bits
            .iter()
            .enumerate()
            .fold(LinearCombination::zero(), |lc, (i, bit)| {
                lc.with_term(*bit, U256::from(1) << i)
            });
        self.enforce(recomposed, Variable::One, v);

        Ok(bits)
    }

    pub fn from_binary(&mut self, bits: &[Variable]) -> Result<Variable> {
        if bits.is_empty() || bits.len() > field::CAPACITY_BITS {
            return Err(Error::InvalidBitWidth(bits.len()));
        }

        let value = bits
            .iter()
            .enumerate()
            .fold(U256::ZERO, |acc, (i, bit)| acc | (self.value(*bit) << i));
        let out = self.alloc_private(value);

        let recomposed = bits
            .iter()
            .enumerate()
            .fold(LinearCombination::zero(), |lc, (i, bit)| {
                lc.with_term(*bit, U256::from(1) << i)
            });
        self.enforce(recomposed, Variable::One, out);

        Ok(out)
    }

    /// Sum of `vars` as a single variable.
    pub fn sum(&mut self, vars: &[Variable]) -> Variable {
        let value = vars
            .iter()
            .fold(U256::ZERO, |acc, v| field::add(acc, self.value(*v)));
        let out = self.alloc_private(value);

        let lc = vars.iter().fold(LinearCombination::zero(), |lc, v| {
            lc.with_term(*v, U256::from(1))
        });
        self.enforce(lc, Variable::One, out);
        out
    }

    fn expose(&mut self, v: Variable) {
        let public = self.alloc_public(self.value(v));
        self.assert_is_equal(v, public);
    }

    /// Publishes an unsigned integer of `bits` width (a multiple of 8 up to 248).
    pub fn output_uint(&mut self, bits: usize, v: Variable) -> Result<()> {
        if bits == 0 || bits % 8 != 0 || bits > 248 {
            return Err(Error::InvalidBitWidth(bits));
        }

        self.to_binary(v, bits)?;
        self.expose(v);
        self.outputs.push(OutputKind::Uint(bits as u16));
        Ok(())
    }

    pub fn output_address(&mut self, v: Variable) -> Result<()> {
        self.to_binary(v, 160)?;
        self.expose(v);
        self.outputs.push(OutputKind::Address);
        Ok(())
    }

    pub fn output_bytes32(&mut self, v: Bytes32) -> Result<()> {
        self.to_binary(v.hi, 128)?;
        self.to_binary(v.lo, 128)?;
        self.expose(v.hi);
        self.expose(v.lo);
        self.outputs.push(OutputKind::Bytes32);
        Ok(())
    }

    pub fn output_bool(&mut self, v: Variable) -> Result<()> {
        self.assert_is_boolean(v);
        self.expose(v);
        self.outputs.push(OutputKind::Bool);
        Ok(())
    }
}
