use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus};
use crate::services::booking::create_booking;
use crate::services::validation::BookingRequest;
use crate::state::AppState;

#[derive(Serialize)]
pub struct BookingResponse {
    pub id: String,
    pub user_id: String,
    pub venue_id: String,
    pub court_id: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub total_price: f64,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
}

impl BookingResponse {
    pub fn from_booking(booking: Booking) -> Self {
        Self {
            id: booking.id,
            user_id: booking.user_id,
            venue_id: booking.venue_id,
            court_id: booking.court_id,
            date: booking.date.format("%Y-%m-%d").to_string(),
            start_time: booking.start_time.format("%H:%M").to_string(),
            end_time: booking.end_time.format("%H:%M").to_string(),
            total_price: booking.total_price,
            status: booking.status.as_str().to_string(),
            notes: booking.notes,
            created_at: booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// POST /api/bookings
pub async fn create(
    State(state): State<Arc<AppState>>,
    Json(body): Json<BookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = {
        let mut db = state.db.lock().unwrap();
        create_booking(&mut db, &body, Utc::now().naive_utc())?
    };

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse::from_booking(booking)),
    ))
}

// GET /api/bookings/:id
pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookingResponse>, AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        queries::get_booking_by_id(&db, &id)?
    };

    match booking {
        Some(booking) => Ok(Json(BookingResponse::from_booking(booking))),
        None => Err(AppError::NotFound(format!("booking {id}"))),
    }
}

// GET /api/bookings?user_id=
#[derive(Deserialize)]
pub struct BookingsQuery {
    pub user_id: Option<String>,
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BookingsQuery>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let Some(user_id) = query.user_id.filter(|u| !u.trim().is_empty()) else {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    };

    let bookings = {
        let db = state.db.lock().unwrap();
        queries::get_bookings_for_user(&db, &user_id)?
    };

    Ok(Json(
        bookings
            .into_iter()
            .map(BookingResponse::from_booking)
            .collect(),
    ))
}

// POST /api/bookings/:id/cancel
pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let db = state.db.lock().unwrap();

    let Some(booking) = queries::get_booking_by_id(&db, &id)? else {
        return Err(AppError::NotFound(format!("booking {id}")));
    };

    if booking.status.is_terminal() {
        return Err(AppError::Conflict(format!(
            "booking is already {}",
            booking.status.as_str()
        )));
    }

    queries::update_booking_status(&db, &id, &BookingStatus::Cancelled)?;

    tracing::info!(booking_id = %id, "booking cancelled");

    Ok(Json(serde_json::json!({ "ok": true })))
}
