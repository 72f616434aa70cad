use axum::{extract::State, http::StatusCode, Json};

use crate::domain::DomainError;
use crate::infrastructure::AppState;
use crate::models::{ActionResponse, BookingSubmission, ReturnRequest, VerifyRequest};

type ActionReply = (StatusCode, Json<ActionResponse>);

fn refused(e: DomainError) -> ActionReply {
    let status = match e {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Unavailable(_) => StatusCode::CONFLICT,
        DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
        DomainError::Network(_) | DomainError::Backend(_) => StatusCode::INTERNAL_SERVER_ERROR,
        DomainError::Validation(_) | DomainError::InvalidTransition { .. } => {
            StatusCode::BAD_REQUEST
        }
    };
    tracing::warn!("Refused ({}): {}", status, e);
    (status, Json(ActionResponse::refused(e.to_string())))
}

pub async fn submit_booking(
    State(state): State<AppState>,
    Json(payload): Json<BookingSubmission>,
) -> ActionReply {
    let mut data = state.data.write().await;
    match data.submit(payload, state.policies) {
        Ok(booking) => {
            tracing::info!(
                "Booking {} created: {} x{} for {}",
                booking.id,
                booking.asset_name,
                booking.quantity,
                booking.user_name
            );
            (
                StatusCode::OK,
                Json(ActionResponse::ok("Peminjaman berhasil diajukan")),
            )
        }
        Err(e) => refused(e),
    }
}

pub async fn submit_return(
    State(state): State<AppState>,
    Json(payload): Json<ReturnRequest>,
) -> ActionReply {
    let mut data = state.data.write().await;
    match data.record_return(&payload.booking_id, payload.returned_quantity, state.policies) {
        Ok(booking) => {
            tracing::info!(
                "Booking {} returned {} unit(s), now {}",
                booking.id,
                payload.returned_quantity,
                booking.status
            );
            (
                StatusCode::OK,
                Json(ActionResponse::ok("Pengembalian berhasil dicatat")),
            )
        }
        Err(e) => refused(e),
    }
}

pub async fn verify_booking(
    State(state): State<AppState>,
    Json(payload): Json<VerifyRequest>,
) -> ActionReply {
    let mut data = state.data.write().await;
    match data.verify(&payload.booking_id, payload.status, payload.note) {
        Ok(booking) => {
            tracing::info!("Booking {} verified as {}", booking.id, booking.status);
            (
                StatusCode::OK,
                Json(ActionResponse::ok(format!(
                    "Pengajuan {}",
                    booking.status.label().to_lowercase()
                ))),
            )
        }
        Err(e) => refused(e),
    }
}
