//! Application Store - session and cached backend data behind typed actions
//!
//! The backend is authoritative. Every successful mutation is followed by a
//! re-fetch; a failed action leaves the cached collections as they were.

use std::sync::Arc;

use crate::domain::{BookingRepository, DomainError};
use crate::models::{Asset, Booking, Paket, User};
use crate::services::availability::{Availability, OverlapPolicy};
use crate::services::booking_form::BookingDraft;
use crate::services::lifecycle::{self, ReturnPolicy, Verification};
use crate::services::notice::Notice;

/// Email domains accepted at login
pub const CAMPUS_DOMAINS: [&str; 2] = ["@student.telkomuniversity.ac.id", "@telkomuniversity.ac.id"];

pub const MSG_INVALID_EMAIL: &str =
    "Gunakan email kampus (@student.telkomuniversity.ac.id atau @telkomuniversity.ac.id)";

pub fn is_campus_email(email: &str) -> bool {
    CAMPUS_DOMAINS.iter().any(|domain| email.ends_with(domain))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Policies {
    pub overlap: OverlapPolicy,
    pub returns: ReturnPolicy,
}

pub type ActionResult = Result<Notice, DomainError>;

pub struct AppStore {
    repo: Arc<dyn BookingRepository>,
    policies: Policies,
    user: Option<User>,
    bookings: Vec<Booking>,
    assets: Vec<Asset>,
    pakets: Vec<Paket>,
    calendar: Vec<Booking>,
}

impl AppStore {
    pub fn new(repo: Arc<dyn BookingRepository>, policies: Policies) -> Self {
        Self {
            repo,
            policies,
            user: None,
            bookings: Vec::new(),
            assets: Vec::new(),
            pakets: Vec::new(),
            calendar: Vec::new(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn assets(&self) -> &[Asset] {
        &self.assets
    }

    pub fn pakets(&self) -> &[Paket] {
        &self.pakets
    }

    pub fn calendar(&self) -> &[Booking] {
        &self.calendar
    }

    pub fn policies(&self) -> Policies {
        self.policies
    }

    fn current_user(&self) -> Result<&User, DomainError> {
        self.user.as_ref().ok_or(DomainError::Unauthenticated)
    }

    fn find_booking(&self, booking_id: &str) -> Result<&Booking, DomainError> {
        self.bookings
            .iter()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("Peminjaman {}", booking_id)))
    }

    /// Live availability verdict for `draft` against the cached bookings.
    pub fn availability(&self, draft: &BookingDraft) -> Result<Availability, DomainError> {
        let user = self.current_user()?;
        Ok(draft.check(user, &self.bookings, self.policies.overlap))
    }

    // ========================================================================
    // Session
    // ========================================================================

    pub async fn login(&mut self, email: &str, password: &str) -> ActionResult {
        let email = email.trim();
        if !is_campus_email(email) {
            tracing::warn!("Login refused for non-campus address {}", email);
            return Err(DomainError::Validation(MSG_INVALID_EMAIL.to_string()));
        }

        let user = self.repo.login(email, password).await.inspect_err(|e| {
            tracing::warn!("Login failed for {}: {}", email, e);
        })?;
        tracing::info!("Logged in as {} ({})", user.name, user.role);

        let greeting = format!("Selamat datang, {}", user.name);
        self.user = Some(user);

        // A failed first load still leaves the session open
        if let Err(e) = self.refresh().await {
            tracing::warn!("Initial data load failed: {}", e);
            return Ok(Notice::warning(
                "Login berhasil!",
                format!("{}. Data belum dapat dimuat: {}", greeting, e),
            ));
        }
        Ok(Notice::success("Login berhasil!", greeting))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.user.take() {
            tracing::info!("Logged out {}", user.name);
        }
        self.bookings.clear();
        self.assets.clear();
        self.pakets.clear();
        self.calendar.clear();
    }

    // ========================================================================
    // Fetches
    // ========================================================================

    /// Reload bookings, assets and pakets.
    pub async fn refresh(&mut self) -> Result<(), DomainError> {
        let data = self.repo.dashboard_data().await?;
        let pakets = self.repo.list_pakets().await?;

        tracing::debug!(
            "Refreshed cache: {} bookings, {} assets, {} pakets",
            data.bookings.len(),
            data.assets.len(),
            pakets.len()
        );
        self.bookings = data.bookings;
        self.assets = data.assets;
        self.pakets = pakets;
        Ok(())
    }

    pub async fn refresh_assets(&mut self) -> Result<(), DomainError> {
        self.assets = self.repo.list_assets().await?;
        tracing::debug!("Refreshed {} assets", self.assets.len());
        Ok(())
    }

    pub async fn refresh_calendar(&mut self) -> Result<(), DomainError> {
        self.calendar = self.repo.calendar_bookings().await?;
        tracing::debug!("Refreshed {} calendar bookings", self.calendar.len());
        Ok(())
    }

    async fn refresh_after_mutation(&mut self) {
        if let Err(e) = self.refresh().await {
            tracing::error!("Refresh after mutation failed: {}", e);
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Submit one booking per selected asset. The draft is cleared on success.
    ///
    /// Each accepted asset leaves the draft as soon as the backend takes it, so
    /// a retry after a partial failure only sends what is still pending.
    pub async fn submit_booking(&mut self, draft: &mut BookingDraft) -> ActionResult {
        let user = self.current_user()?;
        if let Err(e) = draft.validate(user, &self.bookings, self.policies.overlap) {
            tracing::warn!("Booking request refused: {}", e);
            return Err(e);
        }
        let submissions = draft.submissions(user)?;

        let mut sent = 0;
        let mut failure = None;
        for submission in &submissions {
            match self.repo.submit_booking(submission).await {
                Ok(_) => {
                    draft.remove_asset(&submission.asset_id);
                    sent += 1;
                }
                Err(e) => {
                    tracing::error!("Submitting booking for {} failed: {}", submission.asset_name, e);
                    failure = Some(e);
                    break;
                }
            }
        }

        if let Some(e) = failure {
            if sent > 0 {
                tracing::warn!(
                    "{} of {} booking(s) submitted before the failure",
                    sent,
                    submissions.len()
                );
                self.refresh_after_mutation().await;
            }
            return Err(e);
        }

        tracing::info!("Submitted {} booking(s)", sent);
        draft.reset();
        self.refresh_after_mutation().await;
        Ok(Notice::success(
            "Peminjaman berhasil diajukan!",
            format!("{} aset diajukan untuk peminjaman", sent),
        ))
    }

    pub async fn submit_return(&mut self, booking_id: &str, quantity: u32) -> ActionResult {
        self.current_user()?;
        let booking = self.find_booking(booking_id)?;
        if let Err(e) = lifecycle::record_return(booking, quantity, self.policies.returns) {
            tracing::warn!("Return on booking {} refused: {}", booking_id, e);
            return Err(e);
        }
        let description = lifecycle::describe_return(booking, quantity);

        self.repo.submit_return(booking_id, quantity).await?;
        tracing::info!("Recorded return of {} on booking {}", quantity, booking_id);

        self.refresh_after_mutation().await;
        Ok(Notice::success("Pengembalian berhasil!", description))
    }

    pub async fn verify(&mut self, booking_id: &str, decision: Verification) -> ActionResult {
        self.current_user()?;
        let booking = self.find_booking(booking_id)?;
        if let Err(e) = lifecycle::verify(booking, &decision) {
            tracing::warn!("Verification of booking {} refused: {}", booking_id, e);
            return Err(e);
        }
        let asset_name = booking.asset_name.clone();
        let status = decision.target_status();

        self.repo
            .verify_booking(booking_id, status, decision.note())
            .await?;
        tracing::info!("Booking {} marked {}", booking_id, status);

        self.refresh_after_mutation().await;
        Ok(match decision {
            Verification::Approve { .. } => Notice::success(
                "Pengajuan Disetujui!",
                format!("Peminjaman {} telah disetujui", asset_name),
            ),
            Verification::Reject { .. } => Notice::error(
                "Pengajuan Ditolak",
                format!("Peminjaman {} telah ditolak", asset_name),
            ),
        })
    }
}

/// Collapse an action result into the notice shown to the user.
pub fn into_notice(result: ActionResult) -> Notice {
    result.unwrap_or_else(|e| Notice::from_error(&e))
}
