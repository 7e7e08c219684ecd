use std::env::var;

use dotenvy::dotenv;

pub struct Config {
    pub host: String,
    pub port: u16,
    pub graph_api_base: String,
    pub graph_api_version: String,
    pub access_token: Option<String>,
    pub phone_number_id: Option<String>,
    pub verify_token: Option<String>,
    pub reply_text: String,
    pub reply_language: String,
    pub document_path: Option<String>,
    pub recipients_path: Option<String>,
    pub database_url: Option<String>,
    pub request_timeout_secs: u64,
}

impl Config {
    pub fn try_parse() -> Result<Config, &'static str> {
        let _ = dotenv();

        Ok(Config {
            host: var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .map_err(|_| "An error occured while parsing PORT env param")?,
            graph_api_base: var("GRAPH_API_BASE")
                .unwrap_or_else(|_| "https://graph.facebook.com".to_string()),
            graph_api_version: var("GRAPH_API_VERSION").unwrap_or_else(|_| "v22.0".to_string()),
            access_token: var("WA_ACCESS_TOKEN").ok(),
            phone_number_id: var("WA_PHONE_NUMBER_ID").ok(),
            verify_token: var("WEBHOOK_VERIFY_TOKEN").ok(),
            reply_text: var("WEBHOOK_REPLY_TEXT").unwrap_or_else(|_| {
                "Thanks for reaching out. We will get back to you shortly.".to_string()
            }),
            reply_language: var("REPLY_LANGUAGE").unwrap_or_else(|_| "en_US".to_string()),
            document_path: var("REPLY_DOCUMENT_PATH").ok(),
            recipients_path: var("RECIPIENTS_PATH").ok(),
            database_url: var("DATABASE_URL").ok(),
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse::<u64>()
                .map_err(|_| "An error occured while parsing REQUEST_TIMEOUT_SECS env param")?,
        })
    }
}
