use std::sync::Mutex;

use alloy_primitives::{address, b256, B256, U256};
use async_trait::async_trait;
use storage_proof_sdk::{
    compile, field, new_full_witness, prove, read_circuit_from, read_pk_from, read_proof_from,
    read_vk_from, setup, testing, verify, Allocation, App, AppCircuit, CircuitApi, CircuitInput,
    DataInput, DataStream, Error, FeeSchedule, ProofSubmission, Relay, Result, StorageData,
    SubmissionReceipt,
};

/// Publishes every field of the first storage slot.
struct SlotCircuit {
    max_storage: usize,
}

impl AppCircuit for SlotCircuit {
    fn allocate(&self) -> Allocation {
        Allocation::new(0, self.max_storage, 0)
    }

    fn define(&self, api: &mut CircuitApi, input: &DataInput) -> Result<()> {
        let slots = DataStream::new(&input.storage_slots);
        let slot = slots.get(0)?;

        api.output_uint(64, slot.block_num)?;
        api.output_address(slot.contract)?;
        api.output_bytes32(slot.key)?;
        api.output_bytes32(slot.value)
    }
}

fn sample_slot() -> StorageData {
    StorageData {
        block_num: 19341099,
        address: address!("c944e90c64b2c07662a292be6244bdf05cda44a7"),
        key: b256!("55ccb1b16b10b19d498a335426da71059f3255a84a320fe81c2a761e2cc095d0"),
        value: B256::from(U256::from(10_000_000_000_000_000_000u128)),
    }
}

fn sample_input(circuit: &SlotCircuit) -> CircuitInput {
    CircuitInput::new(circuit.allocate(), vec![sample_slot()]).unwrap()
}

#[derive(Default)]
struct RecordingRelay {
    submissions: Mutex<Vec<ProofSubmission>>,
}

#[async_trait]
impl Relay for RecordingRelay {
    async fn submit(&self, submission: &ProofSubmission) -> Result<SubmissionReceipt> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(SubmissionReceipt {
            request_id: submission.request_id,
            status: "queued".to_string(),
        })
    }
}

#[test]
fn compile_setup_prove_verify() {
    let srs_dir = tempfile::tempdir().unwrap();
    let circuit = SlotCircuit { max_storage: 1 };
    let input = sample_input(&circuit);

    let compiled = compile(&circuit, &input).unwrap();
    let (pk, vk) = setup(&compiled, srs_dir.path()).unwrap();
    let (witness, public) = new_full_witness(&circuit, &input).unwrap();

    let proof = prove(&compiled, &pk, &witness).unwrap();
    verify(&vk, &public, &proof).unwrap();

    let output = public.output_bytes().unwrap();
    assert_eq!(output.len(), 8 + 20 + 32 + 32);
    assert_eq!(&output[..8], 19341099u64.to_be_bytes().as_slice());
    assert_eq!(&output[8..28], sample_slot().address.as_slice());
    assert_eq!(&output[28..60], sample_slot().key.as_slice());
    assert_eq!(&output[60..], sample_slot().value.as_slice());

    assert!(srs_dir.path().join(format!("srs_{}", vk.log_size)).is_file());
}

#[test]
fn circuit_shape_is_independent_of_data() {
    let circuit = SlotCircuit { max_storage: 2 };
    let one = sample_input(&circuit);
    let other = CircuitInput::new(
        circuit.allocate(),
        vec![StorageData::default(), sample_slot()],
    )
    .unwrap();

    assert_eq!(
        compile(&circuit, &one).unwrap().digest(),
        compile(&circuit, &other).unwrap().digest()
    );
    testing::prover_succeeded(&circuit, &one).unwrap();
    testing::prover_succeeded(&circuit, &other).unwrap();
}

#[test]
fn tampering_is_detected() {
    let srs_dir = tempfile::tempdir().unwrap();
    let circuit = SlotCircuit { max_storage: 1 };
    let input = sample_input(&circuit);

    let compiled = compile(&circuit, &input).unwrap();
    let (pk, vk) = setup(&compiled, srs_dir.path()).unwrap();
    let (witness, public) = new_full_witness(&circuit, &input).unwrap();
    let proof = prove(&compiled, &pk, &witness).unwrap();

    let mut bad_proof = proof;
    bad_proof.tag = B256::ZERO;
    assert!(matches!(
        verify(&vk, &public, &bad_proof),
        Err(Error::InvalidProof)
    ));

    let mut bad_public = public.clone();
    bad_public.values[0] = U256::from(1);
    assert!(matches!(
        verify(&vk, &bad_public, &proof),
        Err(Error::InvalidProof)
    ));

    let mut non_canonical = public.clone();
    non_canonical.values[1] = field::MODULUS;
    assert!(matches!(
        verify(&vk, &non_canonical, &proof),
        Err(Error::NonCanonical { index: 1 })
    ));

    let mut short = public.clone();
    short.values.pop();
    assert!(matches!(
        verify(&vk, &short, &proof),
        Err(Error::PublicInputCount { .. })
    ));

    let mut bad_layout = public.clone();
    bad_layout.outputs.pop();
    assert!(matches!(
        verify(&vk, &bad_layout, &proof),
        Err(Error::OutputLayout)
    ));

    let mut bad_witness = witness.clone();
    bad_witness.private[0] = U256::from(1);
    assert!(matches!(
        prove(&compiled, &pk, &bad_witness),
        Err(Error::Unsatisfied { .. })
    ));
}

#[test]
fn keys_are_bound_to_their_circuit() {
    let srs_dir = tempfile::tempdir().unwrap();
    let small = SlotCircuit { max_storage: 1 };
    let large = SlotCircuit { max_storage: 2 };

    let small_compiled = compile(&small, &sample_input(&small)).unwrap();
    let large_compiled = compile(&large, &sample_input(&large)).unwrap();
    let (small_pk, _) = setup(&small_compiled, srs_dir.path()).unwrap();
    let (large_pk, large_vk) = setup(&large_compiled, srs_dir.path()).unwrap();

    let (witness, public) = new_full_witness(&small, &sample_input(&small)).unwrap();
    assert!(matches!(
        prove(&small_compiled, &large_pk, &witness),
        Err(Error::KeyMismatch { .. })
    ));

    let proof = prove(&small_compiled, &small_pk, &witness).unwrap();
    assert_eq!(large_vk.num_public, public.values.len());
    assert!(matches!(
        verify(&large_vk, &public, &proof),
        Err(Error::InvalidProof)
    ));

    assert!(matches!(
        compile(&small, &sample_input(&large)),
        Err(Error::AllocationMismatch { .. })
    ));
}

#[test]
fn artifacts_round_trip_on_disk() {
    let out = tempfile::tempdir().unwrap();
    let circuit = SlotCircuit { max_storage: 1 };
    let input = sample_input(&circuit);

    let compiled = compile(&circuit, &input).unwrap();
    let (pk, vk) = setup(&compiled, out.path().join("srs")).unwrap();
    let (witness, public) = new_full_witness(&circuit, &input).unwrap();
    let proof = prove(&compiled, &pk, &witness).unwrap();

    let dir = out.path().join("artifacts");
    storage_proof_sdk::write_to(&compiled, dir.join("compiledCircuit")).unwrap();
    storage_proof_sdk::write_to(&pk, dir.join("pk")).unwrap();
    storage_proof_sdk::write_to(&vk, dir.join("vk")).unwrap();
    storage_proof_sdk::write_to(&proof, dir.join("proof")).unwrap();

    let compiled = read_circuit_from(dir.join("compiledCircuit")).unwrap();
    let pk = read_pk_from(dir.join("pk")).unwrap();
    let vk = read_vk_from(dir.join("vk")).unwrap();
    assert_eq!(read_proof_from(dir.join("proof")).unwrap(), proof);

    let proof = prove(&compiled, &pk, &witness).unwrap();
    verify(&vk, &public, &proof).unwrap();
}

#[tokio::test]
async fn request_is_prepared_and_submitted() {
    let srs_dir = tempfile::tempdir().unwrap();
    let circuit = SlotCircuit { max_storage: 1 };
    let refundee = address!("b0DA53679B6e7aB6c7c21e92B02abFd18BF627EA");
    let relay = RecordingRelay::default();

    let mut app = App::new().with_nonce(3).with_fee_schedule(FeeSchedule {
        base_fee: U256::from(100),
        per_storage: U256::from(5),
        ..Default::default()
    });
    app.add_storage(sample_slot());
    let input = app.build_circuit_input(&circuit).unwrap();

    let compiled = compile(&circuit, &input).unwrap();
    let (pk, vk) = setup(&compiled, srs_dir.path()).unwrap();
    let (witness, public) = new_full_witness(&circuit, &input).unwrap();
    let proof = prove(&compiled, &pk, &witness).unwrap();

    assert!(matches!(
        app.submit_proof(&relay, &proof).await,
        Err(Error::RequestNotPrepared)
    ));

    let prepared = app
        .prepare_request(&vk, 1, 11155111, refundee, refundee)
        .unwrap();
    assert_eq!(prepared.fee, U256::from(105));
    assert_eq!(&prepared.calldata[4..36], prepared.request_id.as_slice());

    let request = app.request().unwrap();
    assert_eq!(request.output_commitment, public.output_commitment().unwrap());
    assert_eq!(request.verifying_key_hash, vk.hash());
    assert_eq!(request.nonce, 3);

    let receipt = app.submit_proof(&relay, &proof).await.unwrap();
    assert_eq!(receipt.request_id, prepared.request_id);

    let submissions = relay.submissions.lock().unwrap();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].proof.as_ref(), proof.to_bytes().as_slice());
    assert_eq!(
        submissions[0].output.as_ref(),
        public.output_bytes().unwrap().as_slice()
    );
    assert_eq!(submissions[0].dst_chain_id, 11155111);
}
