use alloy_primitives::{Bytes, B256};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const RELAY: &str = "RELAY";

/// Payload handed to the relay for delivery to the destination chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSubmission {
    pub request_id: B256,
    pub vk_hash: B256,
    pub proof: Bytes,
    pub output: Bytes,
    pub src_chain_id: u64,
    pub dst_chain_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
    pub request_id: B256,
    pub status: String,
}

#[async_trait]
pub trait Relay: Send + Sync {
    async fn submit(&self, submission: &ProofSubmission) -> Result<SubmissionReceipt>;
}

/// Relay reachable over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRelay {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    fn submit_url(&self) -> String {
        format!("{}/v1/proofs", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl Relay for HttpRelay {
    async fn submit(&self, submission: &ProofSubmission) -> Result<SubmissionReceipt> {
        let url = self.submit_url();
        info!(target: RELAY, "submitting proof for request {} to {url}", submission.request_id);

        let response = self.client.post(&url).json(submission).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::RelayRejected(format!("{status}: {body}")));
        }

        let receipt: SubmissionReceipt = response.json().await?;
        info!(target: RELAY, "relay accepted request {}: {}", receipt.request_id, receipt.status);

        Ok(receipt)
    }
}
