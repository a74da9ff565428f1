//! Rank-1 constraint system produced by the compiler.

use alloy_primitives::{Keccak256, B256, U256};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    field,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// The constant `1` wire.
    One,
    Public(usize),
    Private(usize),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination(pub Vec<(Variable, U256)>);

impl LinearCombination {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn constant(value: U256) -> Self {
        Self(vec![(Variable::One, field::reduce(value))])
    }

    pub fn with_term(mut self, var: Variable, coeff: U256) -> Self {
        self.0.push((var, field::reduce(coeff)));
        self
    }

    pub fn evaluate(&self, assignment: &Assignment<'_>) -> Result<U256> {
        self.0.iter().try_fold(U256::ZERO, |acc, (var, coeff)| {
            Ok(field::add(acc, field::mul(*coeff, assignment.value(*var)?)))
        })
    }
}

impl From<Variable> for LinearCombination {
    fn from(var: Variable) -> Self {
        Self(vec![(var, U256::from(1))])
    }
}

/// `<a, w> * <b, w> = <c, w>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    pub a: LinearCombination,
    pub b: LinearCombination,
    pub c: LinearCombination,
}

/// Values for every public and private variable of a constraint system.
#[derive(Debug, Clone, Copy)]
pub struct Assignment<'a> {
    pub public: &'a [U256],
    pub private: &'a [U256],
}

impl Assignment<'_> {
    pub fn value(&self, var: Variable) -> Result<U256> {
        let value = match var {
            Variable::One => Some(U256::from(1)),
            Variable::Public(i) => self.public.get(i).copied(),
            Variable::Private(i) => self.private.get(i).copied(),
        };

        value.ok_or(Error::WitnessShape {
            expected_public: self.public.len(),
            expected_private: self.private.len(),
            public: self.public.len(),
            private: self.private.len(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintSystem {
    pub num_public: usize,
    pub num_private: usize,
    pub constraints: Vec<Constraint>,
}

impl ConstraintSystem {
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Fails with the index of the first violated constraint.
    pub fn is_satisfied(&self, assignment: &Assignment<'_>) -> Result<()> {
        if assignment.public.len() != self.num_public
            || assignment.private.len() != self.num_private
        {
            return Err(Error::WitnessShape {
                expected_public: self.num_public,
                expected_private: self.num_private,
                public: assignment.public.len(),
                private: assignment.private.len(),
            });
        }

        for (index, constraint) in self.constraints.iter().enumerate() {
            let a = constraint.a.evaluate(assignment)?;
            let b = constraint.b.evaluate(assignment)?;
            let c = constraint.c.evaluate(assignment)?;

            if field::mul(a, b) != c {
                return Err(Error::Unsatisfied { index });
            }
        }

        Ok(())
    }

    pub fn digest(&self) -> B256 {
        let mut hasher = Keccak256::new();

        hasher.update((self.num_public as u64).to_be_bytes());
        hasher.update((self.num_private as u64).to_be_bytes());
        hasher.update((self.constraints.len() as u64).to_be_bytes());

        for constraint in &self.constraints {
            for lc in [&constraint.a, &constraint.b, &constraint.c] {
                hasher.update((lc.0.len() as u64).to_be_bytes());
                for (var, coeff) in &lc.0 {
                    let (tag, index) = match var {
                        Variable::One => (0u8, 0usize),
                        Variable::Public(i) => (1, *i),
                        Variable::Private(i) => (2, *i),
                    };
                    hasher.update([tag]);
                    hasher.update((index as u64).to_be_bytes());
                    hasher.update(coeff.to_be_bytes::<32>());
                }
            }
        }

        hasher.finalize()
    }
}
