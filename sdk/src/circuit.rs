use crate::{
    api::CircuitApi,
    data::{Allocation, CircuitInput, DataInput},
    error::{Error, Result},
};

/// An application circuit.
///
/// `allocate` fixes how many items of each kind the circuit consumes and
/// `define` declares, through the [`CircuitApi`], how those items map to
/// public outputs.
pub trait AppCircuit {
    fn allocate(&self) -> Allocation;

    fn define(&self, api: &mut CircuitApi, input: &DataInput) -> Result<()>;
}

/// Runs `define` over a fresh api, returning the populated api.
pub(crate) fn synthesize<C: AppCircuit + ?Sized>(
    circuit: &C,
    input: &CircuitInput,
) -> Result<CircuitApi> {
    let allocation = circuit.allocate();
    if input.allocation != allocation {
        return Err(Error::AllocationMismatch {
            input: input.allocation,
            circuit: allocation,
        });
    }

    let mut api = CircuitApi::new();
    let data = DataInput::allocate(&mut api, input)?;
    circuit.define(&mut api, &data)?;

    Ok(api)
}
