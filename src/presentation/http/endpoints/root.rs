use std::sync::Arc;

use poem_openapi::{OpenApi, Tags, payload::Json};

use crate::{
    application::usecases::{
        process_webhook::ProcessWebhookUseCase, send_broadcast::SendBroadcastUseCase,
    },
    infrastructure::repositories::postgres::PostgresHealthCheck,
    presentation::http::responses::ServiceInfoDto,
};

#[derive(Clone)]
pub struct ApiState {
    pub broadcast_usecase: Arc<SendBroadcastUseCase>,
    pub webhook_usecase: Arc<ProcessWebhookUseCase>,
    pub verify_token: Option<String>,
    pub db: Option<PostgresHealthCheck>,
}

/// Enum of API sections (tags)
#[derive(Tags)]
pub enum EndpointsTags {
    Status,
    Health,
    Webhook,
    Broadcast,
}

pub struct RootEndpoints;

#[OpenApi]
impl RootEndpoints {
    #[oai(path = "/", method = "get", tag = EndpointsTags::Status)]
    pub async fn root(&self) -> Json<ServiceInfoDto> {
        Json(ServiceInfoDto {
            ok: true,
            msg: "Yes yes it is working".to_string(),
        })
    }
}
