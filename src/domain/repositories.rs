//! Repository trait definitions
//!
//! The backend owns every booking, asset and paket. This trait is the
//! contract the client store talks to; the HTTP implementation lives in the
//! infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use crate::models::{
    Asset, Booking, BookingStatus, BookingSubmission, DashboardData, Paket, User,
};

/// Repository trait for the booking backend
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Authenticate and open a session
    async fn login(&self, email: &str, password: &str) -> Result<User, DomainError>;

    /// Fetch all bookings and assets in one round-trip
    async fn dashboard_data(&self) -> Result<DashboardData, DomainError>;

    /// Fetch the paket catalogue
    async fn list_pakets(&self) -> Result<Vec<Paket>, DomainError>;

    /// Fetch the asset catalogue
    async fn list_assets(&self) -> Result<Vec<Asset>, DomainError>;

    /// Fetch the bookings shown on the calendar
    async fn calendar_bookings(&self) -> Result<Vec<Booking>, DomainError>;

    /// Submit a new booking request; returns the backend's message
    async fn submit_booking(
        &self,
        submission: &BookingSubmission,
    ) -> Result<Option<String>, DomainError>;

    /// Record a (partial) return
    async fn submit_return(
        &self,
        booking_id: &str,
        returned_quantity: u32,
    ) -> Result<Option<String>, DomainError>;

    /// Approve or reject a pending booking
    async fn verify_booking(
        &self,
        booking_id: &str,
        status: BookingStatus,
        note: Option<&str>,
    ) -> Result<Option<String>, DomainError>;
}
