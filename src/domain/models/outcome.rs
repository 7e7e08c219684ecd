use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub recipient_id: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub total: usize,
    pub sent: usize,
    pub dry_run: bool,
    pub outcomes: Vec<DispatchOutcome>,
}
