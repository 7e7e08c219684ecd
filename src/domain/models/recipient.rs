use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub wa_id: String,
    pub name: String,
    pub address: String,
    pub tier: CustomerTier,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CustomerTier {
    Gold,
    Silver,
    Regular,
}

impl CustomerTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerTier::Gold => "gold",
            CustomerTier::Silver => "silver",
            CustomerTier::Regular => "regular",
        }
    }
}
