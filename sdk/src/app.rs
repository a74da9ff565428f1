use alloy_primitives::{Address, Bytes, B256, U256};
use log::info;

use crate::{
    circuit::AppCircuit,
    data::{CircuitInput, StorageData},
    error::{Error, Result},
    prover::Proof,
    relay::{ProofSubmission, Relay, SubmissionReceipt},
    request::{FeeSchedule, Request},
    setup::VerifyingKey,
    witness::{new_full_witness, PublicWitness},
};

const APP: &str = "APP";

/// What the application needs to send on-chain to open a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedRequest {
    pub calldata: Bytes,
    pub request_id: B256,
    pub fee: U256,
}

#[derive(Debug, Clone)]
struct BuiltInput {
    input: CircuitInput,
    public: PublicWitness,
}

/// Collects the data of one proof request and drives it through to the relay.
#[derive(Debug, Clone, Default)]
pub struct App {
    storage: Vec<StorageData>,
    nonce: u64,
    fees: FeeSchedule,
    built: Option<BuiltInput>,
    request: Option<Request>,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fee_schedule(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = nonce;
        self
    }

    pub fn add_storage(&mut self, data: StorageData) {
        self.storage.push(data);
    }

    pub fn request(&self) -> Option<&Request> {
        self.request.as_ref()
    }

    /// Pads the collected data to the circuit's allocation and evaluates the
    /// circuit once to record its public outputs.
    pub fn build_circuit_input<C: AppCircuit + ?Sized>(
        &mut self,
        circuit: &C,
    ) -> Result<CircuitInput> {
        let input = CircuitInput::new(circuit.allocate(), self.storage.clone())?;
        let (_, public) = new_full_witness(circuit, &input)?;

        info!(
            target: APP,
            "built circuit input with {} of {} storage slots",
            self.storage.len(),
            input.allocation.max_storage
        );

        self.built = Some(BuiltInput {
            input: input.clone(),
            public,
        });
        // outputs changed, any earlier request is stale
        self.request = None;

        Ok(input)
    }

    pub fn prepare_request(
        &mut self,
        vk: &VerifyingKey,
        src_chain_id: u64,
        dst_chain_id: u64,
        refundee: Address,
        callback: Address,
    ) -> Result<PreparedRequest> {
        let built = self.built.as_ref().ok_or(Error::InputNotBuilt)?;
        if built.public.outputs != vk.outputs {
            return Err(Error::OutputLayout);
        }

        let verifying_key_hash = vk.hash();
        let output_commitment = built.public.output_commitment()?;
        let request_id = Request::compute_request_id(
            verifying_key_hash,
            output_commitment,
            src_chain_id,
            dst_chain_id,
            self.nonce,
        );

        let request = Request {
            request_id,
            verifying_key_hash,
            output_commitment,
            src_chain_id,
            dst_chain_id,
            refundee,
            callback,
            nonce: self.nonce,
            fee: self.fees.fee(&built.input),
        };
        let prepared = PreparedRequest {
            calldata: request.calldata(),
            request_id,
            fee: request.fee,
        };

        info!(target: APP, "prepared request {request_id}, fee {} wei", request.fee);
        self.request = Some(request);

        Ok(prepared)
    }

    pub async fn submit_proof<R: Relay + ?Sized>(
        &self,
        relay: &R,
        proof: &Proof,
    ) -> Result<SubmissionReceipt> {
        let request = self.request.as_ref().ok_or(Error::RequestNotPrepared)?;
        let built = self.built.as_ref().ok_or(Error::InputNotBuilt)?;

        let submission = ProofSubmission {
            request_id: request.request_id,
            vk_hash: request.verifying_key_hash,
            proof: proof.to_bytes().into(),
            output: built.public.output_bytes()?.into(),
            src_chain_id: request.src_chain_id,
            dst_chain_id: request.dst_chain_id,
        };

        relay.submit(&submission).await
    }
}
