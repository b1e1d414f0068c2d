use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::Review;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ReviewResponse {
    pub id: String,
    pub venue_id: String,
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: String,
}

impl ReviewResponse {
    fn from_review(review: Review) -> Self {
        Self {
            id: review.id,
            venue_id: review.venue_id,
            user_id: review.user_id,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

// GET /api/venues/:id/reviews
pub async fn list_reviews(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
) -> Result<Json<Vec<ReviewResponse>>, AppError> {
    let db = state.db.lock().unwrap();

    if queries::get_venue_by_id(&db, &venue_id)?.is_none() {
        return Err(AppError::NotFound(format!("venue {venue_id}")));
    }

    let reviews = queries::list_reviews(&db, &venue_id)?;
    Ok(Json(
        reviews.into_iter().map(ReviewResponse::from_review).collect(),
    ))
}

// POST /api/venues/:id/reviews
#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub user_id: String,
    pub rating: i32,
    pub comment: Option<String>,
}

pub async fn create_review(
    State(state): State<Arc<AppState>>,
    Path(venue_id): Path<String>,
    Json(body): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    if !(1..=5).contains(&body.rating) {
        return Err(AppError::BadRequest(
            "rating must be between 1 and 5".to_string(),
        ));
    }

    let db = state.db.lock().unwrap();

    if queries::get_venue_by_id(&db, &venue_id)?.is_none() {
        return Err(AppError::NotFound(format!("venue {venue_id}")));
    }

    let review = Review {
        id: Uuid::new_v4().to_string(),
        venue_id,
        user_id: body.user_id,
        rating: body.rating,
        comment: body.comment,
        hidden: false,
        created_at: Utc::now().naive_utc(),
    };

    queries::create_review(&db, &review)?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from_review(review))))
}
