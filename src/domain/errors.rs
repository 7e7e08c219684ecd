use thiserror::Error;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),
    #[error("Configuration missing: {0}")]
    Configuration(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Provider { status: u16, body: String },
}
