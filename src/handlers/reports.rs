use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Report, ReportStatus, ReportSubject};
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReportResponse {
    pub id: String,
    pub reporter_id: String,
    pub subject_kind: String,
    pub subject_id: String,
    pub reason: String,
    pub status: String,
    pub created_at: String,
    pub resolved_at: Option<String>,
}

impl ReportResponse {
    pub fn from_report(report: Report) -> Self {
        Self {
            id: report.id,
            reporter_id: report.reporter_id,
            subject_kind: report.subject_kind.as_str().to_string(),
            subject_id: report.subject_id,
            reason: report.reason,
            status: report.status.as_str().to_string(),
            created_at: report.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            resolved_at: report
                .resolved_at
                .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string()),
        }
    }
}

// POST /api/reports
#[derive(Deserialize)]
pub struct CreateReportRequest {
    pub reporter_id: String,
    pub subject_kind: ReportSubject,
    pub subject_id: String,
    pub reason: String,
}

pub async fn create_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ReportResponse>), AppError> {
    if body.reason.trim().is_empty() {
        return Err(AppError::BadRequest("reason is required".to_string()));
    }
    if body.subject_id.trim().is_empty() {
        return Err(AppError::BadRequest("subject_id is required".to_string()));
    }

    let report = Report {
        id: Uuid::new_v4().to_string(),
        reporter_id: body.reporter_id,
        subject_kind: body.subject_kind,
        subject_id: body.subject_id,
        reason: body.reason,
        status: ReportStatus::Open,
        created_at: Utc::now().naive_utc(),
        resolved_at: None,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_report(&db, &report)?;
    }

    Ok((StatusCode::CREATED, Json(ReportResponse::from_report(report))))
}
