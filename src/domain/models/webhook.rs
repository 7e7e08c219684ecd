use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEvent {
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

impl WebhookEvent {
    pub fn first_change(&self) -> Option<&ChangeValue> {
        self.entry
            .first()?
            .changes
            .first()
            .map(|change| &change.value)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookChange {
    pub value: ChangeValue,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeValue {
    pub metadata: Option<ChangeMetadata>,
    #[serde(default)]
    pub contacts: Vec<WebhookContact>,
    #[serde(default)]
    pub messages: Vec<InboundMessage>,
    #[serde(default)]
    pub statuses: Vec<Value>,
}

impl ChangeValue {
    pub fn contact_name(&self) -> Option<&str> {
        self.contacts
            .first()
            .and_then(|contact| contact.profile.as_ref())
            .and_then(|profile| profile.name.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeMetadata {
    pub phone_number_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebhookContact {
    pub profile: Option<ContactProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContactProfile {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundMessage {
    pub from: Option<String>,
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    pub text: Option<TextBody>,
    pub button: Option<ButtonReply>,
    pub interactive: Option<InteractiveReply>,
}

impl InboundMessage {
    // Button payloads win over free text when both are present.
    pub fn content_text(&self) -> Option<&str> {
        if let Some(button) = &self.button {
            return button.payload.as_deref().or(button.text.as_deref());
        }
        if let Some(interactive) = &self.interactive {
            let selection = interactive
                .button_reply
                .as_ref()
                .or(interactive.list_reply.as_ref());
            if let Some(selection) = selection {
                return selection.title.as_deref().or(selection.id.as_deref());
            }
        }
        self.text.as_ref().map(|text| text.body.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextBody {
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ButtonReply {
    pub payload: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractiveReply {
    pub button_reply: Option<InteractiveSelection>,
    pub list_reply: Option<InteractiveSelection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InteractiveSelection {
    pub id: Option<String>,
    pub title: Option<String>,
}
