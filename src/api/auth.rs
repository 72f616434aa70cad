use axum::{
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};

use crate::models::{LoginRequest, LoginResponse, UserRole};
use crate::services::store::{is_campus_email, MSG_INVALID_EMAIL};

/// Addresses that always log in as verifier
const VERIFIER_EMAILS: [&str; 2] = [
    "chelsealodar@telkomuniversity.ac.id",
    "verifikator@telkomuniversity.ac.id",
];

/// Every demo login maps to the same account id, the one the seeded
/// bookings belong to.
const DEMO_USER_ID: &str = "1";

pub fn detect_role(email: &str) -> UserRole {
    let lowered = email.to_lowercase();
    if VERIFIER_EMAILS.contains(&lowered.as_str()) {
        UserRole::Verifikator
    } else if email.contains("staff") {
        UserRole::Staff
    } else if email.contains("dosen") {
        UserRole::Dosen
    } else {
        UserRole::Mahasiswa
    }
}

/// "john.doe@..." becomes "JOHN DOE"
pub fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default();
    local.replacen('.', " ", 1).to_uppercase()
}

pub async fn login(Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    tracing::info!("Login attempt for: {}", payload.email);

    if !is_campus_email(&payload.email) {
        tracing::warn!("Rejected non-campus address: {}", payload.email);
        return Json(LoginResponse {
            success: false,
            id: None,
            name: None,
            role: None,
            message: Some(MSG_INVALID_EMAIL.to_string()),
        })
        .into_response();
    }

    let role = detect_role(&payload.email);
    let name = display_name(&payload.email);
    tracing::info!("Logged in {} as {}", name, role);

    let body = Json(LoginResponse {
        success: true,
        id: Some(DEMO_USER_ID.to_string()),
        name: Some(name),
        role: Some(role),
        message: None,
    });

    let cookie = format!("session={}; Path=/; HttpOnly", uuid::Uuid::new_v4());
    match HeaderValue::from_str(&cookie) {
        Ok(value) => ([(header::SET_COOKIE, value)], body).into_response(),
        Err(_) => body.into_response(),
    }
}
