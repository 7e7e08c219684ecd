use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{OpenApi, payload::Json};

use crate::application::usecases::send_broadcast::SendBroadcastRequest;
use crate::domain::errors::BridgeError;
use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    mappers::map_report,
    requests::BroadcastRequestDto,
    responses::BroadcastReportDto,
};

#[derive(Clone)]
pub struct BroadcastEndpoints {
    state: Arc<ApiState>,
}

impl BroadcastEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl BroadcastEndpoints {
    /// Fans a template out to every recipient in the directory.
    #[oai(path = "/broadcast", method = "post", tag = EndpointsTags::Broadcast)]
    pub async fn broadcast(
        &self,
        payload: Json<BroadcastRequestDto>,
    ) -> PoemResult<Json<BroadcastReportDto>> {
        let report = self
            .state
            .broadcast_usecase
            .execute(SendBroadcastRequest {
                template_name: payload.template_name.clone(),
                language_code: payload.language_code.clone(),
                dry_run: payload.dry_run,
            })
            .await
            .map_err(map_bridge_error)?;

        Ok(Json(map_report(&report)))
    }
}

fn map_bridge_error(err: BridgeError) -> poem::Error {
    let status = match &err {
        BridgeError::UnknownTemplate(_) => poem::http::StatusCode::BAD_REQUEST,
        BridgeError::Configuration(_) | BridgeError::Other(_) => {
            poem::http::StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    poem::Error::from_string(err.to_string(), status)
}

#[cfg(test)]
mod tests {
    use crate::{
        application::{
            services::{dispatcher::Dispatcher, templates::TemplateRegistry},
            usecases::{
                process_webhook::{ProcessWebhookUseCase, WebhookReplyConfig},
                send_broadcast::{BroadcastConfig, SendBroadcastUseCase},
            },
        },
        domain::models::{CustomerTier, RecipientProfile},
        infrastructure::{
            messaging::{
                templates::default_builders,
                whatsapp::{WhatsAppClient, WhatsAppClientConfig},
            },
            repositories::in_memory::InMemoryRecipientDirectory,
        },
    };

    use super::*;

    async fn dead_provider_state() -> Arc<ApiState> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let directory = Arc::new(InMemoryRecipientDirectory::new(vec![RecipientProfile {
            wa_id: "15550001001".to_string(),
            name: "Asha Rahman".to_string(),
            address: "12 Lakeview Rd, Dhaka".to_string(),
            tier: CustomerTier::Gold,
        }]));
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
            verify_token: None,
            db: None,
        })
    }

    fn request(template_name: &str, dry_run: bool) -> Json<BroadcastRequestDto> {
        Json(BroadcastRequestDto {
            template_name: template_name.to_string(),
            language_code: "en_US".to_string(),
            dry_run,
        })
    }

    #[tokio::test]
    async fn unknown_template_is_a_bad_request() {
        let endpoints = BroadcastEndpoints::new(dead_provider_state().await);

        let err = endpoints
            .broadcast(request("no_such_template", false))
            .await
            .err()
            .expect("unknown template must be rejected");

        assert_eq!(err.status(), poem::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn dry_run_report_lists_every_recipient() {
        let endpoints = BroadcastEndpoints::new(dead_provider_state().await);

        let report = endpoints
            .broadcast(request("customer_greeting", true))
            .await
            .unwrap();

        assert!(report.0.dry_run);
        assert_eq!(report.0.total, 1);
        assert_eq!(report.0.sent, 0);
        assert_eq!(report.0.outcomes[0].recipient_id, "15550001001");
        assert!(!report.0.outcomes[0].success);
    }
}
