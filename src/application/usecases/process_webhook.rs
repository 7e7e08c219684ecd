use std::path::Path;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    application::services::{provider::ProviderClient, templates::TemplateRegistry},
    domain::{
        models::{
            CustomerTier, DocumentContent, InboundMessage, OutboundPayload, RecipientProfile,
            SenderCredentials, WebhookEvent,
        },
        repositories::RecipientDirectory,
    },
};

const DOCUMENT_KEYWORDS: [&str; 4] = ["doc", "docs", "document", "brochure"];
const CATALOG_KEYWORDS: [&str; 3] = ["offer", "offers", "promo"];

const CATALOG_TEMPLATE: &str = "product_carousel";

pub struct WebhookReplyConfig {
    pub access_token: Option<String>,
    pub reply_text: String,
    pub reply_language: String,
    pub document_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Text,
    Catalog,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Ignored,
    Skipped,
    Replied(ReplyKind),
}

pub struct ProcessWebhookUseCase {
    directory: Arc<dyn RecipientDirectory>,
    registry: Arc<TemplateRegistry>,
    client: Arc<dyn ProviderClient>,
    config: WebhookReplyConfig,
}

impl ProcessWebhookUseCase {
    pub fn new(
        directory: Arc<dyn RecipientDirectory>,
        registry: Arc<TemplateRegistry>,
        client: Arc<dyn ProviderClient>,
        config: WebhookReplyConfig,
    ) -> Self {
        Self {
            directory,
            registry,
            client,
            config,
        }
    }

    pub async fn execute(&self, body: Value) -> anyhow::Result<WebhookOutcome> {
        let event: WebhookEvent = match serde_json::from_value(body) {
            Ok(event) => event,
            Err(err) => {
                debug!("discarding webhook body with unexpected structure: {err}");
                return Ok(WebhookOutcome::Ignored);
            }
        };

        let Some(value) = event.first_change() else {
            return Ok(WebhookOutcome::Ignored);
        };

        let Some(message) = value.messages.first() else {
            debug!(
                statuses = value.statuses.len(),
                "notification carries no inbound messages"
            );
            return Ok(WebhookOutcome::Ignored);
        };

        let Some(from) = message.from.as_deref() else {
            return Ok(WebhookOutcome::Ignored);
        };
        let Some(phone_number_id) = value
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.phone_number_id.as_deref())
        else {
            return Ok(WebhookOutcome::Ignored);
        };

        let Some(access_token) = self.config.access_token.as_deref() else {
            warn!("WA_ACCESS_TOKEN is not set, skipping reply to {from}");
            return Ok(WebhookOutcome::Skipped);
        };

        // Replies go out through the phone number the event arrived on.
        let sender = SenderCredentials {
            phone_number_id: phone_number_id.to_string(),
            access_token: access_token.to_string(),
        };

        debug!(
            from,
            message_type = message.message_type.as_deref().unwrap_or("unknown"),
            "processing inbound message"
        );

        let decided = decide_reply(message);
        let (kind, payload) = self
            .build_reply(&sender, decided, from, value.contact_name())
            .await?;

        let response = self.client.send_message(&sender, &payload).await?;
        info!(to = from, status = response.status, kind = ?kind, "sent webhook reply");

        Ok(WebhookOutcome::Replied(kind))
    }

    async fn build_reply(
        &self,
        sender: &SenderCredentials,
        kind: ReplyKind,
        to: &str,
        contact_name: Option<&str>,
    ) -> anyhow::Result<(ReplyKind, OutboundPayload)> {
        match kind {
            ReplyKind::Document => {
                let Some(path) = self.config.document_path.as_deref() else {
                    warn!("REPLY_DOCUMENT_PATH is not set, falling back to text reply");
                    return Ok((
                        ReplyKind::Text,
                        OutboundPayload::text(to, &self.config.reply_text),
                    ));
                };

                let path = Path::new(path);
                let media_id = self.client.upload_media(sender, path).await?;
                let filename = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());

                Ok((
                    ReplyKind::Document,
                    OutboundPayload::document(
                        to,
                        DocumentContent {
                            id: media_id,
                            filename,
                            caption: Some("Here is our brochure.".to_string()),
                        },
                    ),
                ))
            }
            ReplyKind::Catalog => {
                let profile = self.sender_profile(to, contact_name).await;
                let payload =
                    self.registry
                        .build(CATALOG_TEMPLATE, &self.config.reply_language, &profile)?;
                Ok((ReplyKind::Catalog, payload))
            }
            ReplyKind::Text => Ok((
                ReplyKind::Text,
                OutboundPayload::text(to, &self.config.reply_text),
            )),
        }
    }

    async fn sender_profile(&self, wa_id: &str, contact_name: Option<&str>) -> RecipientProfile {
        match self.directory.find(wa_id).await {
            Ok(Some(profile)) => {
                debug!(wa_id, tier = profile.tier.as_str(), "matched directory profile");
                profile
            }
            Ok(None) => ad_hoc_profile(wa_id, contact_name),
            Err(err) => {
                warn!("recipient lookup for {wa_id} failed: {err:#}");
                ad_hoc_profile(wa_id, contact_name)
            }
        }
    }
}

fn ad_hoc_profile(wa_id: &str, contact_name: Option<&str>) -> RecipientProfile {
    RecipientProfile {
        wa_id: wa_id.to_string(),
        name: contact_name.unwrap_or("there").to_string(),
        address: String::new(),
        tier: CustomerTier::Regular,
    }
}

fn decide_reply(message: &InboundMessage) -> ReplyKind {
    let Some(text) = message.content_text() else {
        return ReplyKind::Text;
    };

    let normalized = text.to_lowercase();
    let words: Vec<&str> = normalized
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .collect();

    if words.iter().any(|word| DOCUMENT_KEYWORDS.contains(word)) {
        return ReplyKind::Document;
    }
    if words.iter().any(|word| CATALOG_KEYWORDS.contains(word)) {
        return ReplyKind::Catalog;
    }
    ReplyKind::Text
}
