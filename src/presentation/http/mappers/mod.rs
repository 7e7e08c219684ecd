use crate::{
    domain::models::{DispatchOutcome, DispatchReport},
    presentation::http::responses::{BroadcastReportDto, DispatchOutcomeDto},
};

pub fn map_outcome(outcome: &DispatchOutcome) -> DispatchOutcomeDto {
    DispatchOutcomeDto {
        recipient_id: outcome.recipient_id.clone(),
        success: outcome.success,
        status_code: outcome.status_code,
        body: outcome.body.clone(),
        error: outcome.error.clone(),
    }
}

pub fn map_report(report: &DispatchReport) -> BroadcastReportDto {
    BroadcastReportDto {
        total: report.total as u32,
        sent: report.sent as u32,
        dry_run: report.dry_run,
        outcomes: report.outcomes.iter().map(map_outcome).collect(),
    }
}
