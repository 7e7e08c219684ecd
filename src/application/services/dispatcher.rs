use std::sync::Arc;

use futures::future::join_all;
use serde_json::Value;

use crate::{
    application::services::provider::ProviderClient,
    domain::{
        errors::SendError,
        models::{DispatchOutcome, DispatchReport, OutboundPayload, SenderCredentials},
    },
};

pub struct Dispatcher {
    client: Arc<dyn ProviderClient>,
}

impl Dispatcher {
    pub fn new(client: Arc<dyn ProviderClient>) -> Self {
        Self { client }
    }

    // Every input pair yields exactly one outcome, in input order.
    pub async fn dispatch(
        &self,
        sender: &SenderCredentials,
        batch: Vec<(String, OutboundPayload)>,
        dry_run: bool,
    ) -> DispatchReport {
        if dry_run {
            return Self::preview(batch);
        }

        let sends = batch.into_iter().map(|(recipient_id, payload)| {
            let client = Arc::clone(&self.client);
            async move {
                match client.send_message(sender, &payload).await {
                    Ok(response) => DispatchOutcome {
                        recipient_id,
                        success: true,
                        status_code: Some(response.status),
                        body: Some(response.body),
                        error: None,
                    },
                    Err(SendError::Provider { status, body }) => DispatchOutcome {
                        recipient_id,
                        success: false,
                        status_code: Some(status),
                        body: Some(Value::String(body)),
                        error: None,
                    },
                    Err(SendError::Transport(err)) => DispatchOutcome {
                        recipient_id,
                        success: false,
                        status_code: None,
                        body: None,
                        error: Some(err.to_string()),
                    },
                }
            }
        });

        let outcomes = join_all(sends).await;
        let sent = outcomes.iter().filter(|outcome| outcome.success).count();

        DispatchReport {
            total: outcomes.len(),
            sent,
            dry_run: false,
            outcomes,
        }
    }

    fn preview(batch: Vec<(String, OutboundPayload)>) -> DispatchReport {
        let outcomes: Vec<DispatchOutcome> = batch
            .into_iter()
            .map(|(recipient_id, payload)| DispatchOutcome {
                recipient_id,
                success: false,
                status_code: None,
                body: serde_json::to_value(&payload).ok(),
                error: None,
            })
            .collect();

        DispatchReport {
            total: outcomes.len(),
            sent: 0,
            dry_run: true,
            outcomes,
        }
    }
}
