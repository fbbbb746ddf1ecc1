//! Compliance audit sink
//!
//! Fire-and-forget: transitions are reported after commit and a sink outage
//! never fails the request. The sink is not part of the consistency
//! invariant; the ledger is.

use serde_json::json;

use crate::config::AuditConfig;

use super::transitions::TransitionOutcome;

#[derive(Clone)]
pub struct AuditService {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl AuditService {
    pub fn new(config: AuditConfig) -> Self {
        Self {
            webhook_url: config.webhook_url,
            client: reqwest::Client::new(),
        }
    }

    /// Report a committed transition. Never blocks the caller.
    pub fn notify_transition(&self, outcome: &TransitionOutcome, reason: &str) {
        tracing::info!(
            equipment_id = outcome.equipment_id,
            new_state = %outcome.new_state,
            ledger_event_id = outcome.ledger_event_id,
            reason,
            "audit: transition"
        );

        let Some(url) = self.webhook_url.clone() else {
            return;
        };

        let body = json!({
            "equipment_id": outcome.equipment_id,
            "new_state": outcome.new_state,
            "ledger_event_id": outcome.ledger_event_id,
            "reason": reason,
        });
        let client = self.client.clone();
        tokio::spawn(async move {
            if let Err(e) = client.post(&url).json(&body).send().await {
                tracing::warn!("audit webhook delivery failed: {}", e);
            }
        });
    }
}
