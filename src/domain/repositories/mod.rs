use async_trait::async_trait;

use crate::domain::models::RecipientProfile;

#[async_trait]
pub trait RecipientDirectory: Send + Sync {
    async fn list(&self) -> anyhow::Result<Vec<RecipientProfile>>;
    async fn find(&self, wa_id: &str) -> anyhow::Result<Option<RecipientProfile>>;
}
