//! Ticket verification via the external blockchain gateway.
//!
//! The gateway owns signature recovery and the on-chain "used" flag; this
//! module only forwards approval requests and classifies its failures.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Gateway message for a verification it refused to approve.
pub const APPROVAL_REJECTED: &str = "Unable to approve ticket verification";

#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// The gateway refused this particular approval (bad signature, ticket
    /// already used, unknown ticket).
    #[error("Unable to approve ticket verification")]
    Rejected,

    /// Transport or gateway failure.
    #[error("Ticket gateway error: {0}")]
    Upstream(String),
}

/// Approves signed ticket verifications.
#[async_trait]
pub trait TicketApprover: Send + Sync {
    async fn approve(&self, uuid: &str, signature: &str) -> Result<(), ApprovalError>;
}

#[derive(Serialize)]
struct ApproveRequest<'a> {
    uuid: &'a str,
    signature: &'a str,
}

#[derive(Deserialize)]
struct GatewayError {
    message: Option<String>,
}

/// [`TicketApprover`] backed by the gateway's HTTP API.
pub struct GatewayTicketApprover {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayTicketApprover {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

/// Map a failed gateway response body onto an [`ApprovalError`].
fn classify_failure(status: reqwest::StatusCode, body: &str) -> ApprovalError {
    let message = serde_json::from_str::<GatewayError>(body)
        .ok()
        .and_then(|e| e.message);
    match message {
        Some(m) if m == APPROVAL_REJECTED => ApprovalError::Rejected,
        Some(m) => ApprovalError::Upstream(format!("{status}: {m}")),
        None => ApprovalError::Upstream(format!("{status}")),
    }
}

#[async_trait]
impl TicketApprover for GatewayTicketApprover {
    async fn approve(&self, uuid: &str, signature: &str) -> Result<(), ApprovalError> {
        let response = self
            .client
            .post(format!("{}/approve", self.base_url))
            .json(&ApproveRequest { uuid, signature })
            .send()
            .await
            .map_err(|e| ApprovalError::Upstream(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApprovalError::Upstream(e.to_string()))?;
        Err(classify_failure(status, &body))
    }
}
