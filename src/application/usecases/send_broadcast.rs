use std::sync::Arc;

use tracing::info;

use crate::{
    application::services::{dispatcher::Dispatcher, templates::TemplateRegistry},
    domain::{
        errors::BridgeError,
        models::{DispatchReport, OutboundPayload, SenderCredentials},
        repositories::RecipientDirectory,
    },
};

pub struct BroadcastConfig {
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
}

pub struct SendBroadcastRequest {
    pub template_name: String,
    pub language_code: String,
    pub dry_run: bool,
}

pub struct SendBroadcastUseCase {
    directory: Arc<dyn RecipientDirectory>,
    registry: Arc<TemplateRegistry>,
    dispatcher: Dispatcher,
    config: BroadcastConfig,
}

impl SendBroadcastUseCase {
    pub fn new(
        directory: Arc<dyn RecipientDirectory>,
        registry: Arc<TemplateRegistry>,
        dispatcher: Dispatcher,
        config: BroadcastConfig,
    ) -> Self {
        Self {
            directory,
            registry,
            dispatcher,
            config,
        }
    }

    pub async fn execute(
        &self,
        request: SendBroadcastRequest,
    ) -> Result<DispatchReport, BridgeError> {
        let sender = self.resolve_sender()?;

        // Unknown templates fail before any recipient is queued.
        let builder = self
            .registry
            .get(&request.template_name)
            .ok_or_else(|| BridgeError::UnknownTemplate(request.template_name.clone()))?;

        let recipients = self.directory.list().await.map_err(BridgeError::Other)?;

        let mut batch = Vec::with_capacity(recipients.len());
        for recipient in &recipients {
            let template = builder.build(&request.language_code, recipient);
            batch.push((
                recipient.wa_id.clone(),
                OutboundPayload::template(&recipient.wa_id, template),
            ));
        }

        info!(
            template = %request.template_name,
            recipients = batch.len(),
            dry_run = request.dry_run,
            "dispatching broadcast"
        );

        let report = self
            .dispatcher
            .dispatch(&sender, batch, request.dry_run)
            .await;

        info!(sent = report.sent, total = report.total, "broadcast finished");

        Ok(report)
    }

    fn resolve_sender(&self) -> Result<SenderCredentials, BridgeError> {
        let access_token = self
            .config
            .access_token
            .clone()
            .ok_or_else(|| BridgeError::Configuration("WA_ACCESS_TOKEN is not set".to_string()))?;
        let phone_number_id = self.config.phone_number_id.clone().ok_or_else(|| {
            BridgeError::Configuration("WA_PHONE_NUMBER_ID is not set".to_string())
        })?;

        Ok(SenderCredentials {
            phone_number_id,
            access_token,
        })
    }
}
