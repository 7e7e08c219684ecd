use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{
    errors::BridgeError,
    models::{OutboundPayload, RecipientProfile, TemplateMessage},
};

pub trait TemplateBuilder: Send + Sync {
    fn name(&self) -> &'static str;
    fn build(&self, language_code: &str, recipient: &RecipientProfile) -> TemplateMessage;
}

#[derive(Clone)]
pub struct TemplateRegistry {
    builders: HashMap<&'static str, Arc<dyn TemplateBuilder>>,
}

impl TemplateRegistry {
    pub fn new(builders: Vec<Arc<dyn TemplateBuilder>>) -> Self {
        let mut map = HashMap::new();
        for builder in builders {
            map.insert(builder.name(), builder);
        }
        Self { builders: map }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TemplateBuilder>> {
        self.builders.get(name).cloned()
    }

    pub fn build(
        &self,
        name: &str,
        language_code: &str,
        recipient: &RecipientProfile,
    ) -> Result<OutboundPayload, BridgeError> {
        let builder = self
            .get(name)
            .ok_or_else(|| BridgeError::UnknownTemplate(name.to_string()))?;
        Ok(OutboundPayload::template(
            &recipient.wa_id,
            builder.build(language_code, recipient),
        ))
    }
}
