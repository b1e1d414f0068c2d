use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{OperatingHours, Venue};
use crate::state::AppState;

#[derive(Serialize)]
pub struct VenueResponse {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub sport: String,
    pub description: Option<String>,
    pub base_price_per_hour: f64,
    pub open_time: String,
    pub close_time: String,
    pub approved: bool,
    pub created_at: String,
}

impl VenueResponse {
    pub fn from_venue(venue: Venue) -> Self {
        Self {
            id: venue.id,
            owner_id: venue.owner_id,
            name: venue.name,
            address: venue.address,
            sport: venue.sport,
            description: venue.description,
            base_price_per_hour: venue.base_price_per_hour,
            open_time: venue.hours.open.format("%H:%M").to_string(),
            close_time: venue.hours.close.format("%H:%M").to_string(),
            approved: venue.approved,
            created_at: venue.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// GET /api/venues
#[derive(Deserialize)]
pub struct VenuesQuery {
    pub sport: Option<String>,
    pub limit: Option<i64>,
}

pub async fn list_venues(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VenuesQuery>,
) -> Result<Json<Vec<VenueResponse>>, AppError> {
    let limit = query.limit.unwrap_or(50);

    let venues = {
        let db = state.db.lock().unwrap();
        queries::list_venues(&db, query.sport.as_deref(), limit)?
    };

    Ok(Json(venues.into_iter().map(VenueResponse::from_venue).collect()))
}

// GET /api/venues/:id
pub async fn get_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<VenueResponse>, AppError> {
    let venue = {
        let db = state.db.lock().unwrap();
        queries::get_venue_by_id(&db, &id)?
    };

    match venue {
        Some(venue) => Ok(Json(VenueResponse::from_venue(venue))),
        None => Err(AppError::NotFound(format!("venue {id}"))),
    }
}

// POST /api/venues
#[derive(Deserialize)]
pub struct CreateVenueRequest {
    pub owner_id: String,
    pub name: String,
    pub address: String,
    pub sport: String,
    pub description: Option<String>,
    pub base_price_per_hour: f64,
    pub open_time: String,
    pub close_time: String,
}

pub async fn create_venue(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateVenueRequest>,
) -> Result<(StatusCode, Json<VenueResponse>), AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    if body.base_price_per_hour < 0.0 {
        return Err(AppError::BadRequest(
            "base_price_per_hour must not be negative".to_string(),
        ));
    }
    let hours = OperatingHours::parse(&body.open_time, &body.close_time)
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let now = Utc::now().naive_utc();
    let venue = Venue {
        id: Uuid::new_v4().to_string(),
        owner_id: body.owner_id,
        name: body.name,
        address: body.address,
        sport: body.sport,
        description: body.description,
        base_price_per_hour: body.base_price_per_hour,
        hours,
        approved: false,
        created_at: now,
        updated_at: now,
    };

    {
        let db = state.db.lock().unwrap();
        queries::create_venue(&db, &venue)?;
    }

    tracing::info!(venue_id = %venue.id, "venue created, awaiting approval");

    Ok((StatusCode::CREATED, Json(VenueResponse::from_venue(venue))))
}

// PUT /api/venues/:id
#[derive(Deserialize)]
pub struct UpdateVenueRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub sport: Option<String>,
    pub description: Option<String>,
    pub base_price_per_hour: Option<f64>,
    pub open_time: Option<String>,
    pub close_time: Option<String>,
}

pub async fn update_venue(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<UpdateVenueRequest>,
) -> Result<Json<VenueResponse>, AppError> {
    let db = state.db.lock().unwrap();

    let Some(mut venue) = queries::get_venue_by_id(&db, &id)? else {
        return Err(AppError::NotFound(format!("venue {id}")));
    };

    if let Some(name) = body.name {
        venue.name = name;
    }
    if let Some(address) = body.address {
        venue.address = address;
    }
    if let Some(sport) = body.sport {
        venue.sport = sport;
    }
    if body.description.is_some() {
        venue.description = body.description;
    }
    if let Some(price) = body.base_price_per_hour {
        if price < 0.0 {
            return Err(AppError::BadRequest(
                "base_price_per_hour must not be negative".to_string(),
            ));
        }
        venue.base_price_per_hour = price;
    }

    let open = body
        .open_time
        .unwrap_or_else(|| venue.hours.open.format("%H:%M").to_string());
    let close = body
        .close_time
        .unwrap_or_else(|| venue.hours.close.format("%H:%M").to_string());
    venue.hours =
        OperatingHours::parse(&open, &close).map_err(|e| AppError::BadRequest(e.to_string()))?;

    queries::update_venue(&db, &venue)?;

    Ok(Json(VenueResponse::from_venue(venue)))
}
