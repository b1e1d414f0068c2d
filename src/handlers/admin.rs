use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::handlers::bookings::BookingResponse;
use crate::handlers::reports::ReportResponse;
use crate::models::{BookingStatus, ReportStatus};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

// GET /api/admin/status
#[derive(Serialize)]
pub struct StatusResponse {
    approved_venues: i64,
    pending_venues: i64,
    open_reports: i64,
    upcoming_bookings_count: i64,
}

pub async fn get_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<StatusResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let stats = {
        let db = state.db.lock().unwrap();
        queries::get_dashboard_stats(&db)?
    };

    Ok(Json(StatusResponse {
        approved_venues: stats.approved_venues,
        pending_venues: stats.pending_venues,
        open_reports: stats.open_reports,
        upcoming_bookings_count: stats.upcoming_bookings_count,
    }))
}

// GET /api/admin/bookings
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);
    let status_filter = query.status.as_deref();

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_all_bookings(&db, status_filter, limit)?
    };

    Ok(Json(
        bookings
            .into_iter()
            .map(BookingResponse::from_booking)
            .collect(),
    ))
}

// POST /api/admin/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::update_booking_status(&db, &id, &BookingStatus::Cancelled)?
    };

    if updated {
        tracing::info!(booking_id = %id, "booking cancelled by admin");
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound(format!("booking {id}")))
    }
}

// POST /api/admin/venues/:id/approve
pub async fn approve_venue(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::set_venue_approved(&db, &id, true)?
    };

    if updated {
        tracing::info!(venue_id = %id, "venue approved");
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound(format!("venue {id}")))
    }
}

// GET /api/admin/reports
#[derive(Deserialize)]
pub struct ReportsQuery {
    pub status: Option<String>,
    pub limit: Option<i64>,
}

pub async fn get_reports(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<ReportsQuery>,
) -> Result<Json<Vec<ReportResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let limit = query.limit.unwrap_or(50);

    let reports = {
        let db = state.db.lock().unwrap();
        queries::list_reports(&db, query.status.as_deref(), limit)?
    };

    Ok(Json(
        reports.into_iter().map(ReportResponse::from_report).collect(),
    ))
}

// POST /api/admin/reports/:id/resolve
#[derive(Deserialize)]
pub struct ResolveReportRequest {
    pub outcome: String,
}

pub async fn resolve_report(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<ResolveReportRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let outcome = ReportStatus::parse(&body.outcome);
    if outcome == ReportStatus::Open {
        return Err(AppError::BadRequest(
            "outcome must be resolved or dismissed".to_string(),
        ));
    }

    let updated = {
        let db = state.db.lock().unwrap();
        queries::resolve_report(&db, &id, &outcome)?
    };

    if updated {
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound(format!("open report {id}")))
    }
}

// POST /api/admin/reviews/:id/hide
pub async fn hide_review(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let updated = {
        let db = state.db.lock().unwrap();
        queries::set_review_hidden(&db, &id, true)?
    };

    if updated {
        tracing::info!(review_id = %id, "review hidden");
        Ok(Json(serde_json::json!({ "ok": true })))
    } else {
        Err(AppError::NotFound(format!("review {id}")))
    }
}
