pub mod auth;
pub mod booking;
pub mod catalog;
pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        // Catalogue & dashboard
        .route("/dashboard/data", get(catalog::dashboard_data))
        .route("/paket/list", get(catalog::list_pakets))
        .route("/asset/list", get(catalog::list_assets))
        .route("/calendar/bookings", get(catalog::calendar_bookings))
        // Booking lifecycle
        .route("/booking/submit", post(booking::submit_booking))
        .route("/booking/return", post(booking::submit_return))
        .route("/booking/verify", post(booking::verify_booking))
        .with_state(state)
}
