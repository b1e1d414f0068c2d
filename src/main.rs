use std::sync::{Arc, Mutex};

use axum::routing::{get, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use courtbook::config::AppConfig;
use courtbook::db;
use courtbook::handlers;
use courtbook::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let conn = db::init_db(&config.database_url)?;

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/venues", get(handlers::venues::list_venues))
        .route("/api/venues", post(handlers::venues::create_venue))
        .route("/api/venues/:id", get(handlers::venues::get_venue))
        .route("/api/venues/:id", put(handlers::venues::update_venue))
        .route("/api/venues/:id/courts", get(handlers::courts::list_courts))
        .route("/api/venues/:id/courts", post(handlers::courts::create_court))
        .route(
            "/api/venues/:venue_id/courts/:court_id/availability",
            get(handlers::availability::get_availability),
        )
        .route("/api/venues/:id/reviews", get(handlers::reviews::list_reviews))
        .route(
            "/api/venues/:id/reviews",
            post(handlers::reviews::create_review),
        )
        .route("/api/bookings", post(handlers::bookings::create))
        .route("/api/bookings", get(handlers::bookings::list_bookings))
        .route("/api/bookings/:id", get(handlers::bookings::get_booking))
        .route(
            "/api/bookings/:id/cancel",
            post(handlers::bookings::cancel_booking),
        )
        .route("/api/reports", post(handlers::reports::create_report))
        .route("/api/admin/status", get(handlers::admin::get_status))
        .route("/api/admin/bookings", get(handlers::admin::get_bookings))
        .route(
            "/api/admin/bookings/:id/cancel",
            post(handlers::admin::cancel_booking),
        )
        .route(
            "/api/admin/venues/:id/approve",
            post(handlers::admin::approve_venue),
        )
        .route("/api/admin/reports", get(handlers::admin::get_reports))
        .route(
            "/api/admin/reports/:id/resolve",
            post(handlers::admin::resolve_report),
        )
        .route(
            "/api/admin/reviews/:id/hide",
            post(handlers::admin::hide_review),
        )
        .route("/calendar/:booking_id", get(handlers::calendar::download_ics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
