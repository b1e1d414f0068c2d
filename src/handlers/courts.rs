use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Court;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CourtResponse {
    pub id: String,
    pub venue_id: String,
    pub name: String,
    pub sport: String,
    pub price_per_hour: Option<f64>,
    pub active: bool,
}

impl CourtResponse {
    fn from_court(court: Court) -> Self {
        Self {
            id: court.id,
            venue_id: court.venue_id,
            name: court.name,
            sport: court.sport,
            price_per_hour: court.price_per_hour,
            active: court.active,
        }
    }
}

// GET /api/venues/:id/courts
pub async fn list_courts(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<Json<Vec<CourtResponse>>, AppError> {
    let db = state.db.lock().unwrap();

    if queries::get_venue_by_id(&db, &venue_id)?.is_none() {
        return Err(AppError::NotFound(format!("venue {venue_id}")));
    }

    let courts = queries::list_courts(&db, &venue_id)?;
    Ok(Json(courts.into_iter().map(CourtResponse::from_court).collect()))
}

// POST /api/venues/:id/courts
#[derive(Deserialize)]
pub struct CreateCourtRequest {
    pub name: String,
    pub sport: Option<String>,
    pub price_per_hour: Option<f64>,
}

pub async fn create_court(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    Json(body): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<CourtResponse>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if body.price_per_hour.is_some_and(|p| p < 0.0) {
        return Err(AppError::BadRequest(
            "price_per_hour must not be negative".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();

    let Some(venue) = queries::get_venue_by_id(&db, &venue_id)? else {
        return Err(AppError::NotFound(format!("venue {venue_id}")));
    };

    let court = Court {
        id: Uuid::new_v4().to_string(),
        venue_id: venue.id,
        name: body.name,
        sport: body.sport.unwrap_or(venue.sport),
        price_per_hour: body.price_per_hour,
        active: true,
        created_at: Utc::now().naive_utc(),
    };

    queries::create_court(&db, &court)?;

    Ok((StatusCode::CREATED, Json(CourtResponse::from_court(court))))
}
