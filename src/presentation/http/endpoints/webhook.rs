use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{
    OpenApi,
    param::Query,
    payload::{Json, PlainText},
};
use serde_json::Value;

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    responses::AckDto,
};

#[derive(Clone)]
pub struct WebhookEndpoints {
    state: Arc<ApiState>,
}

impl WebhookEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl WebhookEndpoints {
    /// Subscription handshake: echoes the challenge when the token matches.
    #[oai(path = "/webhook", method = "get", tag = EndpointsTags::Webhook)]
    pub async fn verify(
        &self,
        #[oai(name = "hub.mode")] mode: Query<Option<String>>,
        #[oai(name = "hub.challenge")] challenge: Query<Option<String>>,
        #[oai(name = "hub.verify_token")] verify_token: Query<Option<String>>,
    ) -> PoemResult<PlainText<String>> {
        if verify_subscription(
            mode.0.as_deref(),
            verify_token.0.as_deref(),
            self.state.verify_token.as_deref(),
        ) {
            Ok(PlainText(challenge.0.unwrap_or_default()))
        } else {
            Err(poem::Error::from_string(
                "Verification failed",
                poem::http::StatusCode::FORBIDDEN,
            ))
        }
    }

    /// Event delivery: always acknowledged so the provider does not retry.
    #[oai(path = "/webhook", method = "post", tag = EndpointsTags::Webhook)]
    pub async fn receive(&self, body: Json<Value>) -> Json<AckDto> {
        if let Err(err) = self.state.webhook_usecase.execute(body.0).await {
            tracing::error!("webhook processing failed: {err:#}");
        }

        Json(AckDto { ok: true })
    }
}

fn verify_subscription(mode: Option<&str>, token: Option<&str>, expected: Option<&str>) -> bool {
    let Some(expected) = expected else {
        return false;
    };

    mode == Some("subscribe") && token == Some(expected)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        application::{
            services::{dispatcher::Dispatcher, templates::TemplateRegistry},
            usecases::{
                process_webhook::{ProcessWebhookUseCase, WebhookReplyConfig},
                send_broadcast::{BroadcastConfig, SendBroadcastUseCase},
            },
        },
        infrastructure::{
            messaging::{
                templates::default_builders,
                whatsapp::{WhatsAppClient, WhatsAppClientConfig},
            },
            repositories::in_memory::InMemoryRecipientDirectory,
        },
    };

    use super::*;

    async fn dead_provider_state(verify_token: Option<&str>) -> Arc<ApiState> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let directory = Arc::new(InMemoryRecipientDirectory::default());
        let registry = Arc::new(TemplateRegistry::new(default_builders()));
        let client = WhatsAppClient::new(WhatsAppClientConfig {
            api_base: format!("http://{addr}"),
            api_version: "v22.0".to_string(),
            request_timeout_secs: 1,
        });

        Arc::new(ApiState {
            broadcast_usecase: Arc::new(SendBroadcastUseCase::new(
                directory.clone(),
                registry.clone(),
                Dispatcher::new(client.clone()),
                BroadcastConfig {
                    access_token: Some("test-token".to_string()),
                    phone_number_id: Some("106540352242922".to_string()),
                },
            )),
            webhook_usecase: Arc::new(ProcessWebhookUseCase::new(
                directory,
                registry,
                client,
                WebhookReplyConfig {
                    access_token: Some("test-token".to_string()),
                    reply_text: "Thanks for reaching out.".to_string(),
                    reply_language: "en_US".to_string(),
                    document_path: None,
                },
            )),
            verify_token: verify_token.map(str::to_string),
            db: None,
        })
    }

    #[tokio::test]
    async fn matching_handshake_echoes_the_challenge() {
        let endpoints = WebhookEndpoints::new(dead_provider_state(Some("sesame")).await);

        let reply = endpoints
            .verify(
                Query(Some("subscribe".to_string())),
                Query(Some("CHALLENGE-42".to_string())),
                Query(Some("sesame".to_string())),
            )
            .await
            .unwrap();

        assert_eq!(reply.0, "CHALLENGE-42");
    }

    #[tokio::test]
    async fn failed_handshake_responds_with_forbidden() {
        let endpoints = WebhookEndpoints::new(dead_provider_state(Some("sesame")).await);

        let err = endpoints
            .verify(
                Query(Some("subscribe".to_string())),
                Query(Some("CHALLENGE-42".to_string())),
                Query(Some("guess".to_string())),
            )
            .await
            .err()
            .expect("mismatched token must be rejected");

        assert_eq!(err.status(), poem::http::StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn failed_reply_send_still_acks_the_event() {
        let endpoints = WebhookEndpoints::new(dead_provider_state(Some("sesame")).await);

        let ack = endpoints
            .receive(Json(json!({
                "entry": [{
                    "changes": [{
                        "value": {
                            "metadata": { "phone_number_id": "106540352242922" },
                            "messages": [{
                                "from": "15550001001",
                                "type": "text",
                                "text": { "body": "hello" }
                            }]
                        }
                    }]
                }]
            })))
            .await;

        assert!(ack.0.ok);
    }

    #[test]
    fn matching_mode_and_token_pass() {
        assert!(verify_subscription(
            Some("subscribe"),
            Some("sesame"),
            Some("sesame")
        ));
    }

    #[test]
    fn wrong_token_fails() {
        assert!(!verify_subscription(
            Some("subscribe"),
            Some("guess"),
            Some("sesame")
        ));
    }

    #[test]
    fn wrong_mode_fails() {
        assert!(!verify_subscription(
            Some("unsubscribe"),
            Some("sesame"),
            Some("sesame")
        ));
    }

    #[test]
    fn missing_token_fails() {
        assert!(!verify_subscription(Some("subscribe"), None, Some("sesame")));
    }

    #[test]
    fn unset_expected_token_rejects_everything() {
        assert!(!verify_subscription(Some("subscribe"), Some("sesame"), None));
        assert!(!verify_subscription(Some("subscribe"), Some(""), None));
        assert!(!verify_subscription(None, None, None));
    }
}
