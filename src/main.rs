use std::io::Error;
use std::sync::Arc;

use poem::{Route, Server, listener::TcpListener};
use poem_openapi::OpenApiService;
use tokio::main;
use tracing_subscriber::EnvFilter;

use crate::{
    application::{
        services::{dispatcher::Dispatcher, templates::TemplateRegistry},
        usecases::{
            process_webhook::{ProcessWebhookUseCase, WebhookReplyConfig},
            send_broadcast::{BroadcastConfig, SendBroadcastUseCase},
        },
    },
    config::Config,
    domain::repositories::RecipientDirectory,
    infrastructure::{
        messaging::{
            templates::default_builders,
            whatsapp::{WhatsAppClient, WhatsAppClientConfig},
        },
        repositories::{in_memory::InMemoryRecipientDirectory, postgres::PostgresHealthCheck},
    },
    presentation::http::endpoints::{
        broadcast::BroadcastEndpoints,
        health::HealthEndpoints,
        root::{ApiState, RootEndpoints},
        webhook::WebhookEndpoints,
    },
};

mod application;
mod config;
mod domain;
mod infrastructure;
mod presentation;

#[main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::try_parse().map_err(Error::other)?;

    let directory: Arc<dyn RecipientDirectory> = match &config.recipients_path {
        Some(path) => {
            Arc::new(InMemoryRecipientDirectory::from_json_file(path).map_err(Error::other)?)
        }
        None => {
            tracing::warn!(
                "RECIPIENTS_PATH is not set, starting with an empty recipient directory"
            );
            Arc::new(InMemoryRecipientDirectory::default())
        }
    };

    let registry = Arc::new(TemplateRegistry::new(default_builders()));

    let client = WhatsAppClient::new(WhatsAppClientConfig {
        api_base: config.graph_api_base.clone(),
        api_version: config.graph_api_version.clone(),
        request_timeout_secs: config.request_timeout_secs,
    });

    let broadcast_usecase = Arc::new(SendBroadcastUseCase::new(
        directory.clone(),
        registry.clone(),
        Dispatcher::new(client.clone()),
        BroadcastConfig {
            access_token: config.access_token.clone(),
            phone_number_id: config.phone_number_id.clone(),
        },
    ));

    let webhook_usecase = Arc::new(ProcessWebhookUseCase::new(
        directory,
        registry,
        client,
        WebhookReplyConfig {
            access_token: config.access_token.clone(),
            reply_text: config.reply_text.clone(),
            reply_language: config.reply_language.clone(),
            document_path: config.document_path.clone(),
        },
    ));

    let db = match &config.database_url {
        Some(url) => Some(PostgresHealthCheck::connect_lazy(url).map_err(Error::other)?),
        None => None,
    };

    let state = Arc::new(ApiState {
        broadcast_usecase,
        webhook_usecase,
        verify_token: config.verify_token.clone(),
        db,
    });

    let server_url = format!("http://{}:{}", config.host, config.port);

    tracing::info!("Starting server at {}", server_url);

    let api_service = OpenApiService::new(
        (
            RootEndpoints,
            HealthEndpoints::new(state.clone()),
            WebhookEndpoints::new(state.clone()),
            BroadcastEndpoints::new(state),
        ),
        "WhatsApp Bridge API",
        "0.1.0",
    )
    .server(server_url);
    let ui = api_service.swagger_ui();
    let app = Route::new().nest("/docs", ui).nest("/", api_service);

    Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await
}
