use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundPayload {
    pub messaging_product: String,
    pub recipient_type: String,
    pub to: String,
    #[serde(flatten)]
    pub message: MessageBody,
}

impl OutboundPayload {
    pub fn template(to: &str, template: TemplateMessage) -> Self {
        Self::with_body(to, MessageBody::Template { template })
    }

    pub fn text(to: &str, body: &str) -> Self {
        Self::with_body(
            to,
            MessageBody::Text {
                text: TextContent {
                    body: body.to_string(),
                },
            },
        )
    }

    pub fn document(to: &str, document: DocumentContent) -> Self {
        Self::with_body(to, MessageBody::Document { document })
    }

    fn with_body(to: &str, message: MessageBody) -> Self {
        Self {
            messaging_product: "whatsapp".to_string(),
            recipient_type: "individual".to_string(),
            to: to.to_string(),
            message,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageBody {
    Template { template: TemplateMessage },
    Text { text: TextContent },
    Document { document: DocumentContent },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextContent {
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentContent {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateMessage {
    pub name: String,
    pub language: TemplateLanguage,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<TemplateComponent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateLanguage {
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateComponent {
    Header {
        parameters: Vec<TemplateParameter>,
    },
    Body {
        parameters: Vec<TemplateParameter>,
    },
    Carousel {
        cards: Vec<CarouselCard>,
    },
    Button {
        sub_type: String,
        index: String,
        parameters: Vec<TemplateParameter>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TemplateParameter {
    Text { text: String },
    Image { image: MediaRef },
    Payload { payload: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl MediaRef {
    pub fn id(id: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            link: None,
        }
    }

    pub fn link(link: &str) -> Self {
        Self {
            id: None,
            link: Some(link.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselCard {
    pub card_index: u32,
    pub components: Vec<TemplateComponent>,
}
