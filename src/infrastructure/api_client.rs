//! HTTP implementation of [`BookingRepository`]
//!
//! Talks JSON to the booking backend. The client keeps a cookie jar so the
//! session cookie set by `/auth/login` rides along on later requests.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{BookingRepository, DomainError};
use crate::infrastructure::config::Config;
use crate::models::{
    ActionResponse, Asset, AssetList, Booking, BookingStatus, BookingSubmission, DashboardData,
    LoginRequest, LoginResponse, Paket, PaketList, ReturnRequest, User, VerifyRequest,
};

const USER_AGENT: &str = concat!("LogistikCenter/", env!("CARGO_PKG_VERSION"));

pub struct HttpBookingRepository {
    client: Client,
    base_url: String,
}

impl HttpBookingRepository {
    pub fn new(config: &Config) -> Result<Self, DomainError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.request_timeout)
            .cookie_store(true)
            .build()
            .map_err(|e| DomainError::Network(format!("Failed to build client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, DomainError> {
        tracing::debug!("GET {}", path);
        let res = self.client.get(self.url(path)).send().await.inspect_err(|e| {
            tracing::error!("GET {} failed: {}", path, e);
        })?;
        let res = check_status(path, res).await?;
        Ok(res.json::<T>().await?)
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DomainError> {
        tracing::debug!("POST {}", path);
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .inspect_err(|e| {
                tracing::error!("POST {} failed: {}", path, e);
            })?;
        let res = check_status(path, res).await?;
        Ok(res.json::<T>().await?)
    }

    /// POST to a mutating endpoint and unwrap its `{success, message}` envelope.
    async fn post_action<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<String>, DomainError> {
        let envelope: ActionResponse = self.post_json(path, body).await?;
        if envelope.success {
            Ok(envelope.message)
        } else {
            let message = envelope
                .message
                .unwrap_or_else(|| "Permintaan ditolak server".to_string());
            tracing::warn!("POST {} refused: {}", path, message);
            Err(DomainError::Backend(message))
        }
    }
}

/// Map a non-2xx response to a domain error, using the body's `message`
/// when the backend sent one.
async fn check_status(path: &str, res: Response) -> Result<Response, DomainError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(DomainError::Unauthenticated);
    }

    let message = res
        .json::<ActionResponse>()
        .await
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| format!("Server error: {}", status));
    tracing::warn!("{} answered {}: {}", path, status, message);
    Err(DomainError::Backend(message))
}

#[async_trait]
impl BookingRepository for HttpBookingRepository {
    async fn login(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.post_json("/auth/login", &request).await?;

        if !response.success {
            return Err(DomainError::Backend(
                response.message.unwrap_or_else(|| "Login gagal".to_string()),
            ));
        }
        match (response.id, response.name, response.role) {
            (Some(id), Some(name), Some(role)) => Ok(User {
                id,
                name,
                email: email.to_string(),
                role,
            }),
            _ => Err(DomainError::Backend(
                "Login response is missing user details".to_string(),
            )),
        }
    }

    async fn dashboard_data(&self) -> Result<DashboardData, DomainError> {
        self.get_json("/dashboard/data").await
    }

    async fn list_pakets(&self) -> Result<Vec<Paket>, DomainError> {
        Ok(self.get_json::<PaketList>("/paket/list").await?.pakets)
    }

    async fn list_assets(&self) -> Result<Vec<Asset>, DomainError> {
        Ok(self.get_json::<AssetList>("/asset/list").await?.assets)
    }

    async fn calendar_bookings(&self) -> Result<Vec<Booking>, DomainError> {
        self.get_json("/calendar/bookings").await
    }

    async fn submit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<Option<String>, DomainError> {
        self.post_action("/booking/submit", submission).await
    }

    async fn submit_return(
        &self,
        booking_id: &str,
        returned_quantity: u32,
    ) -> Result<Option<String>, DomainError> {
        let request = ReturnRequest {
            booking_id: booking_id.to_string(),
            returned_quantity,
        };
        self.post_action("/booking/return", &request).await
    }

    async fn verify_booking(
        &self,
        booking_id: &str,
        status: BookingStatus,
        note: Option<&str>,
    ) -> Result<Option<String>, DomainError> {
        let request = VerifyRequest {
            booking_id: booking_id.to_string(),
            status,
            note: note.map(str::to_string),
        };
        self.post_action("/booking/verify", &request).await
    }
}
