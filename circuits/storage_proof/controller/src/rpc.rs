use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::EIP1186AccountProofResponse;
use anyhow::{anyhow, bail};
use async_trait::async_trait;
use log::debug;
use serde_json::{json, Value};

use crate::{StateProvider, CONTROLLER};

/// Ethereum JSON-RPC client over HTTP.
#[derive(Debug)]
pub struct RpcClient {
    url: String,
    client: reqwest::Client,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
            next_id: AtomicU64::new(1),
        }
    }

    async fn call(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(target: CONTROLLER, "rpc #{id} {method} {params}");

        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        take_result(method, response)
    }
}

/// Extracts `result` from a JSON-RPC response body.
fn take_result(method: &str, mut response: Value) -> anyhow::Result<Value> {
    if !response.is_object() {
        bail!("{method} returned a malformed response: {response}");
    }
    if let Some(error) = response.get("error") {
        bail!("{method} failed: {error}");
    }

    response
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| anyhow!("{method} returned no result"))
}

fn block_tag(block: u64) -> String {
    format!("{block:#x}")
}

#[async_trait]
impl StateProvider for RpcClient {
    async fn state_root(&self, block: u64) -> anyhow::Result<B256> {
        let header = self
            .call("eth_getBlockByNumber", json!([block_tag(block), false]))
            .await?;
        if header.is_null() {
            bail!("block {block} not found");
        }

        let root = header
            .get("stateRoot")
            .cloned()
            .ok_or_else(|| anyhow!("block {block} has no state root"))?;

        Ok(serde_json::from_value(root)?)
    }

    async fn get_proof(
        &self,
        address: Address,
        keys: Vec<B256>,
        block: u64,
    ) -> anyhow::Result<EIP1186AccountProofResponse> {
        let proof = self
            .call("eth_getProof", json!([address, keys, block_tag(block)]))
            .await?;
        if proof.is_null() {
            bail!("no proof for {address} at block {block}");
        }

        Ok(serde_json::from_value(proof)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blocks_are_hex_quantities() {
        assert_eq!(block_tag(0), "0x0");
        assert_eq!(block_tag(19341099), "0x1271f2b");
    }

    #[test]
    fn results_are_taken_from_objects_only() {
        let ok = json!({"jsonrpc": "2.0", "id": 1, "result": "0x1"});
        assert_eq!(take_result("eth_blockNumber", ok).unwrap(), json!("0x1"));

        let null = json!({"jsonrpc": "2.0", "id": 1, "result": null});
        assert!(take_result("eth_getBlockByNumber", null).unwrap().is_null());

        for body in [json!([]), json!("oops"), json!(7), json!({"id": 1})] {
            assert!(take_result("eth_getProof", body).is_err());
        }

        let failed = json!({"id": 1, "error": {"code": -32000, "message": "header not found"}});
        let err = take_result("eth_getProof", failed).unwrap_err();
        assert!(err.to_string().contains("header not found"));
    }
}
