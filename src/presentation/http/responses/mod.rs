use poem_openapi::Object;
use serde_json::Value;

#[derive(Object)]
pub struct ServiceInfoDto {
    pub ok: bool,
    pub msg: String,
}

#[derive(Object)]
pub struct AckDto {
    pub ok: bool,
}

#[derive(Object)]
pub struct DbHealthDto {
    pub ok: bool,
    pub server_time: String,
}

#[derive(Object)]
pub struct DispatchOutcomeDto {
    pub recipient_id: String,
    pub success: bool,
    pub status_code: Option<u16>,
    pub body: Option<Value>,
    pub error: Option<String>,
}

#[derive(Object)]
pub struct BroadcastReportDto {
    pub total: u32,
    pub sent: u32,
    pub dry_run: bool,
    pub outcomes: Vec<DispatchOutcomeDto>,
}
