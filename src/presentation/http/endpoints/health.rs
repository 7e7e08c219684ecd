use std::sync::Arc;

use poem::Result as PoemResult;
use poem_openapi::{
    OpenApi,
    payload::{Json, PlainText},
};

use crate::presentation::http::{
    endpoints::root::{ApiState, EndpointsTags},
    responses::DbHealthDto,
};

#[derive(Clone)]
pub struct HealthEndpoints {
    state: Arc<ApiState>,
}

impl HealthEndpoints {
    pub fn new(state: Arc<ApiState>) -> Self {
        Self { state }
    }
}

#[OpenApi]
impl HealthEndpoints {
    #[oai(path = "/health", method = "get", tag = EndpointsTags::Health)]
    pub async fn health(&self) -> PlainText<&'static str> {
        PlainText("OK")
    }

    #[oai(path = "/health/db", method = "get", tag = EndpointsTags::Health)]
    pub async fn health_db(&self) -> PoemResult<Json<DbHealthDto>> {
        let db = self.state.db.as_ref().ok_or_else(|| {
            poem::Error::from_string(
                "DATABASE_URL is not configured",
                poem::http::StatusCode::SERVICE_UNAVAILABLE,
            )
        })?;

        let server_time = db.server_time().await.map_err(internal_error)?;

        Ok(Json(DbHealthDto {
            ok: true,
            server_time: server_time.to_rfc3339(),
        }))
    }
}

fn internal_error(err: anyhow::Error) -> poem::Error {
    poem::Error::from_string(
        err.to_string(),
        poem::http::StatusCode::INTERNAL_SERVER_ERROR,
    )
}
