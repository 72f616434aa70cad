use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::asset::AssetType;

/// Lifecycle status of a booking.
///
/// `ajukan` is the initial state, `ditolak` and `selesai` are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Ajukan,
    Disetujui,
    Ditolak,
    Selesai,
}

impl BookingStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Ditolak | BookingStatus::Selesai)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Ajukan => "ajukan",
            BookingStatus::Disetujui => "disetujui",
            BookingStatus::Ditolak => "ditolak",
            BookingStatus::Selesai => "selesai",
        }
    }

    /// Badge label shown next to a booking
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Ajukan => "Menunggu",
            BookingStatus::Disetujui => "Disetujui",
            BookingStatus::Ditolak => "Ditolak",
            BookingStatus::Selesai => "Selesai",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub quantity: u32,
    /// First day of the loan, inclusive
    pub start_date: NaiveDate,
    /// Last day of the loan, inclusive
    pub end_date: NaiveDate,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub returned_quantity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ukm_ormawa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_kegiatan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_note: Option<String>,
}

impl Booking {
    /// Approved and nothing returned yet.
    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Disetujui && self.returned_quantity.is_none()
    }

    pub fn outstanding_quantity(&self) -> u32 {
        self.quantity
            .saturating_sub(self.returned_quantity.unwrap_or(0))
    }

    /// Inclusive number of days covered by the booking.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Whether `[start, end]` shares at least one day with this booking.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        start <= self.end_date && end >= self.start_date
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Payload of `POST /booking/submit`.
///
/// The backend assigns `id`, `status` and `createdAt`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingSubmission {
    pub user_id: String,
    pub user_name: String,
    pub asset_id: String,
    pub asset_name: String,
    pub asset_type: AssetType,
    pub quantity: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ukm_ormawa: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_kegiatan: Option<String>,
}

/// Payload of `POST /booking/return`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnRequest {
    pub booking_id: String,
    pub returned_quantity: u32,
}

/// Payload of `POST /booking/verify`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub booking_id: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
