use std::path::Path;

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{
    errors::SendError,
    models::{OutboundPayload, SenderCredentials},
};

#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub status: u16,
    pub body: Value,
}

#[async_trait]
pub trait ProviderClient: Send + Sync {
    async fn send_message(
        &self,
        sender: &SenderCredentials,
        payload: &OutboundPayload,
    ) -> Result<ProviderResponse, SendError>;

    async fn upload_media(
        &self,
        sender: &SenderCredentials,
        path: &Path,
    ) -> anyhow::Result<String>;
}
