pub mod outcome;
pub mod payload;
pub mod recipient;
pub mod sender;
pub mod webhook;

pub use outcome::{DispatchOutcome, DispatchReport};
pub use payload::{
    CarouselCard, DocumentContent, MediaRef, OutboundPayload, TemplateComponent, TemplateLanguage,
    TemplateMessage, TemplateParameter,
};
pub use recipient::{CustomerTier, RecipientProfile};
pub use sender::SenderCredentials;
pub use webhook::{InboundMessage, WebhookEvent};
