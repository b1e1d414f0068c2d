use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::queries;
use crate::errors::AppError;
use crate::services::scheduling::{available_slots, Slot, DEFAULT_SLOT_MINUTES};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AvailabilityQuery {
    pub date: String,
    pub slot_minutes: Option<i64>,
}

#[derive(Serialize)]
pub struct SlotResponse {
    pub start_time: String,
    pub end_time: String,
    pub available: bool,
}

impl SlotResponse {
    fn from_slot(slot: Slot) -> Self {
        Self {
            start_time: slot.start_time.format("%H:%M").to_string(),
            end_time: slot.end_time.format("%H:%M").to_string(),
            available: true,
        }
    }
}

// GET /api/venues/:venue_id/courts/:court_id/availability?date=YYYY-MM-DD
pub async fn get_availability(
    State(state): State<Arc<AppState>>,
    Path((venue_id, court_id)): Path<(String, String)>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<Json<Vec<SlotResponse>>, AppError> {
    let date = NaiveDate::parse_from_str(&query.date, "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("invalid date: {} (expected YYYY-MM-DD)", query.date))
    })?;

    let slot_minutes = query.slot_minutes.unwrap_or(DEFAULT_SLOT_MINUTES);
    if slot_minutes <= 0 {
        return Err(AppError::BadRequest(
            "slot_minutes must be positive".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();

    let Some(venue) = queries::get_venue_by_id(&db, &venue_id)? else {
        return Err(AppError::NotFound(format!("venue {venue_id}")));
    };
    let Some(court) = queries::get_court_by_id(&db, &court_id)?.filter(|c| c.venue_id == venue.id)
    else {
        return Err(AppError::NotFound(format!("court {court_id}")));
    };

    let existing = queries::get_blocking_bookings(&db, &court.id, date)?;

    let slots = available_slots(venue.hours, date, &existing, slot_minutes)
        .map(SlotResponse::from_slot)
        .collect();

    Ok(Json(slots))
}
