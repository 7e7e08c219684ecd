use std::path::Path;

use async_trait::async_trait;

use crate::domain::{models::RecipientProfile, repositories::RecipientDirectory};

#[derive(Default)]
pub struct InMemoryRecipientDirectory {
    recipients: Vec<RecipientProfile>,
}

impl InMemoryRecipientDirectory {
    pub fn new(recipients: Vec<RecipientProfile>) -> Self {
        Self { recipients }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let recipients: Vec<RecipientProfile> = serde_json::from_str(&raw)?;
        Ok(Self::new(recipients))
    }
}

#[async_trait]
impl RecipientDirectory for InMemoryRecipientDirectory {
    async fn list(&self) -> anyhow::Result<Vec<RecipientProfile>> {
        Ok(self.recipients.clone())
    }

    async fn find(&self, wa_id: &str) -> anyhow::Result<Option<RecipientProfile>> {
        Ok(self
            .recipients
            .iter()
            .find(|recipient| recipient.wa_id == wa_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use crate::domain::models::CustomerTier;

    use super::*;

    #[tokio::test]
    async fn loads_profiles_from_a_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{ "wa_id": "15550001001", "name": "Asha Rahman", "address": "12 Lakeview Rd, Dhaka", "tier": "gold" }},
                {{ "wa_id": "15550001002", "name": "Marcus Webb", "address": "88 Harbour St, Cape Town", "tier": "silver" }}
            ]"#
        )
        .unwrap();

        let directory = InMemoryRecipientDirectory::from_json_file(file.path()).unwrap();
        let recipients = directory.list().await.unwrap();

        assert_eq!(recipients.len(), 2);
        assert_eq!(recipients[0].wa_id, "15550001001");
        assert_eq!(recipients[0].tier, CustomerTier::Gold);
        assert_eq!(recipients[1].name, "Marcus Webb");
    }

    #[tokio::test]
    async fn rejects_files_with_unknown_tiers() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{ "wa_id": "1", "name": "X", "address": "Y", "tier": "platinum" }}]"#
        )
        .unwrap();

        assert!(InMemoryRecipientDirectory::from_json_file(file.path()).is_err());
    }

    #[tokio::test]
    async fn find_matches_on_wa_id() {
        let directory = InMemoryRecipientDirectory::new(vec![RecipientProfile {
            wa_id: "15550001001".to_string(),
            name: "Asha Rahman".to_string(),
            address: "12 Lakeview Rd, Dhaka".to_string(),
            tier: CustomerTier::Gold,
        }]);

        let hit = directory.find("15550001001").await.unwrap();
        assert_eq!(hit.unwrap().name, "Asha Rahman");

        let miss = directory.find("15550009999").await.unwrap();
        assert!(miss.is_none());
    }
}
