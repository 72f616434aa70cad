//! Read-only endpoints: dashboard data, catalogue and calendar

use axum::{extract::State, Json};

use crate::infrastructure::AppState;
use crate::models::{AssetList, Booking, DashboardData, PaketList};

pub async fn dashboard_data(State(state): State<AppState>) -> Json<DashboardData> {
    let data = state.data.read().await;
    Json(DashboardData {
        bookings: data.bookings.clone(),
        assets: data.assets.clone(),
    })
}

pub async fn list_pakets(State(state): State<AppState>) -> Json<PaketList> {
    let data = state.data.read().await;
    Json(PaketList {
        pakets: data.pakets.clone(),
    })
}

pub async fn list_assets(State(state): State<AppState>) -> Json<AssetList> {
    let data = state.data.read().await;
    Json(AssetList {
        assets: data.assets.clone(),
    })
}

pub async fn calendar_bookings(State(state): State<AppState>) -> Json<Vec<Booking>> {
    let data = state.data.read().await;
    Json(data.bookings.clone())
}
