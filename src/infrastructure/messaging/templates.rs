use std::sync::Arc;

use crate::{
    application::services::templates::TemplateBuilder,
    domain::models::{
        CarouselCard, MediaRef, RecipientProfile, TemplateComponent, TemplateLanguage,
        TemplateMessage, TemplateParameter,
    },
};

const PROMO_HEADER_IMAGE: &str = "https://cdn.wa-bridge.example/promos/monthly-header.png";

// Media ids come from a one-off upload against the business account.
const CAROUSEL_CARDS: [(&str, &str); 3] = [
    ("1089455932611771", "VIEW_STARTER_PACK"),
    ("1089455932611772", "VIEW_FAMILY_PACK"),
    ("1089455932611773", "VIEW_PREMIUM_PACK"),
];

pub struct GreetingTemplate;

impl TemplateBuilder for GreetingTemplate {
    fn name(&self) -> &'static str {
        "customer_greeting"
    }

    fn build(&self, language_code: &str, recipient: &RecipientProfile) -> TemplateMessage {
        TemplateMessage {
            name: self.name().to_string(),
            language: TemplateLanguage {
                code: language_code.to_string(),
            },
            components: vec![TemplateComponent::Body {
                parameters: vec![TemplateParameter::Text {
                    text: recipient.name.clone(),
                }],
            }],
        }
    }
}

pub struct PromoTemplate;

impl TemplateBuilder for PromoTemplate {
    fn name(&self) -> &'static str {
        "monthly_promo"
    }

    fn build(&self, language_code: &str, recipient: &RecipientProfile) -> TemplateMessage {
        TemplateMessage {
            name: self.name().to_string(),
            language: TemplateLanguage {
                code: language_code.to_string(),
            },
            components: vec![
                TemplateComponent::Header {
                    parameters: vec![TemplateParameter::Image {
                        image: MediaRef::link(PROMO_HEADER_IMAGE),
                    }],
                },
                TemplateComponent::Body {
                    parameters: vec![TemplateParameter::Text {
                        text: recipient.name.clone(),
                    }],
                },
            ],
        }
    }
}

pub struct CarouselTemplate;

impl TemplateBuilder for CarouselTemplate {
    fn name(&self) -> &'static str {
        "product_carousel"
    }

    // Same card deck for everyone, so the recipient is ignored.
    fn build(&self, language_code: &str, _recipient: &RecipientProfile) -> TemplateMessage {
        let cards = CAROUSEL_CARDS
            .iter()
            .enumerate()
            .map(|(index, (media_id, button_payload))| CarouselCard {
                card_index: index as u32,
                components: vec![
                    TemplateComponent::Header {
                        parameters: vec![TemplateParameter::Image {
                            image: MediaRef::id(media_id),
                        }],
                    },
                    TemplateComponent::Button {
                        sub_type: "quick_reply".to_string(),
                        index: "0".to_string(),
                        parameters: vec![TemplateParameter::Payload {
                            payload: button_payload.to_string(),
                        }],
                    },
                ],
            })
            .collect();

        TemplateMessage {
            name: self.name().to_string(),
            language: TemplateLanguage {
                code: language_code.to_string(),
            },
            components: vec![TemplateComponent::Carousel { cards }],
        }
    }
}

pub fn default_builders() -> Vec<Arc<dyn TemplateBuilder>> {
    vec![
        Arc::new(GreetingTemplate),
        Arc::new(PromoTemplate),
        Arc::new(CarouselTemplate),
    ]
}
