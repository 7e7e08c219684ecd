use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, multipart};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    application::services::provider::{ProviderClient, ProviderResponse},
    domain::{
        errors::SendError,
        models::{OutboundPayload, SenderCredentials},
    },
};

pub struct WhatsAppClientConfig {
    pub api_base: String,
    pub api_version: String,
    pub request_timeout_secs: u64,
}

pub struct WhatsAppClient {
    http: Client,
    api_base: String,
    api_version: String,
}

impl WhatsAppClient {
    pub fn new(config: WhatsAppClientConfig) -> Arc<dyn ProviderClient> {
        Arc::new(Self {
            http: Client::builder()
                .user_agent("wa-bridge/whatsapp")
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()
                .expect("failed to build whatsapp client"),
            api_base: config.api_base,
            api_version: config.api_version,
        }) as Arc<dyn ProviderClient>
    }

    fn endpoint_url(&self, phone_number_id: &str, resource: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base, self.api_version, phone_number_id, resource
        )
    }
}

#[async_trait]
impl ProviderClient for WhatsAppClient {
    async fn send_message(
        &self,
        sender: &SenderCredentials,
        payload: &OutboundPayload,
    ) -> Result<ProviderResponse, SendError> {
        let url = self.endpoint_url(&sender.phone_number_id, "messages");
        let response = self
            .http
            .post(url)
            .bearer_auth(&sender.access_token)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SendError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = match serde_json::from_str::<Value>(&text) {
            Ok(value) => value,
            Err(_) => Value::String(text),
        };

        Ok(ProviderResponse {
            status: status.as_u16(),
            body,
        })
    }

    async fn upload_media(
        &self,
        sender: &SenderCredentials,
        path: &Path,
    ) -> anyhow::Result<String> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        let part = multipart::Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(guess_mime(path))?;
        let form = multipart::Form::new()
            .text("messaging_product", "whatsapp")
            .part("file", part);

        let url = self.endpoint_url(&sender.phone_number_id, "media");
        let response = self
            .http
            .post(url)
            .bearer_auth(&sender.access_token)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            anyhow::bail!(
                "media upload failed with status {}: {}",
                status.as_u16(),
                text
            );
        }

        let uploaded: MediaUploadResponse = serde_json::from_str(&text)?;
        Ok(uploaded.id)
    }
}

fn guess_mime(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("pdf") => "application/pdf",
        Some("doc") => "application/msword",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("txt") => "text/plain",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Deserialize)]
struct MediaUploadResponse {
    id: String,
}
