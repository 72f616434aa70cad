//! Demo backend state shared across all handlers
//!
//! Everything lives in memory behind one async `RwLock` and is lost on exit.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::DomainError;
use crate::models::{Asset, AssetType, Booking, BookingStatus, BookingSubmission, Paket};
use crate::services::availability::{check_availability, SelectedAsset, MSG_END_BEFORE_START};
use crate::services::lifecycle::{self, Verification};
use crate::services::Policies;

#[derive(Debug)]
pub struct DemoData {
    pub assets: Vec<Asset>,
    pub pakets: Vec<Paket>,
    pub bookings: Vec<Booking>,
    next_booking_id: u64,
}

impl DemoData {
    pub fn new(assets: Vec<Asset>, pakets: Vec<Paket>, bookings: Vec<Booking>) -> Self {
        let next_booking_id = bookings
            .iter()
            .filter_map(|b| b.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            assets,
            pakets,
            bookings,
            next_booking_id,
        }
    }

    fn booking_mut(&mut self, booking_id: &str) -> Result<&mut Booking, DomainError> {
        self.bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| DomainError::NotFound(format!("Peminjaman {}", booking_id)))
    }

    /// Store a new `ajukan` booking once the asset is known to be free.
    ///
    /// Asset name and type come from the catalogue, not from the payload.
    pub fn submit(
        &mut self,
        submission: BookingSubmission,
        policies: Policies,
    ) -> Result<Booking, DomainError> {
        let asset = self
            .assets
            .iter()
            .find(|a| a.id == submission.asset_id)
            .cloned()
            .ok_or_else(|| DomainError::NotFound(format!("Aset {}", submission.asset_id)))?;

        if submission.end_date < submission.start_date {
            return Err(DomainError::Validation(MSG_END_BEFORE_START.to_string()));
        }
        let quantity = match asset.asset_type {
            AssetType::Ruangan => 1,
            AssetType::Barang => submission.quantity.max(1),
        };

        let selected = [SelectedAsset::new(asset.clone(), quantity)];
        let verdict = check_availability(
            &selected,
            Some(submission.start_date),
            Some(submission.end_date),
            &self.bookings,
            policies.overlap,
        );
        if !verdict.available {
            return Err(DomainError::Unavailable(verdict.message));
        }

        let booking = Booking {
            id: self.next_booking_id.to_string(),
            user_id: submission.user_id,
            user_name: submission.user_name,
            asset_id: asset.id,
            asset_name: asset.name,
            asset_type: asset.asset_type,
            quantity,
            start_date: submission.start_date,
            end_date: submission.end_date,
            status: BookingStatus::Ajukan,
            created_at: Utc::now(),
            returned_quantity: None,
            ukm_ormawa: submission.ukm_ormawa,
            nama_kegiatan: submission.nama_kegiatan,
            verification_note: None,
        };
        self.next_booking_id += 1;
        self.bookings.push(booking.clone());
        Ok(booking)
    }

    pub fn record_return(
        &mut self,
        booking_id: &str,
        quantity: u32,
        policies: Policies,
    ) -> Result<Booking, DomainError> {
        let booking = self.booking_mut(booking_id)?;
        *booking = lifecycle::record_return(booking, quantity, policies.returns)?;
        Ok(booking.clone())
    }

    pub fn verify(
        &mut self,
        booking_id: &str,
        status: BookingStatus,
        note: Option<String>,
    ) -> Result<Booking, DomainError> {
        let decision = match status {
            BookingStatus::Disetujui => Verification::Approve { note },
            BookingStatus::Ditolak => Verification::Reject {
                note: note.unwrap_or_default(),
            },
            other => {
                return Err(DomainError::Validation(format!(
                    "Status verifikasi tidak dikenal: {}",
                    other
                )));
            }
        };
        let booking = self.booking_mut(booking_id)?;
        *booking = lifecycle::verify(booking, &decision)?;
        Ok(booking.clone())
    }
}

impl Default for DemoData {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }
}

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<RwLock<DemoData>>,
    pub policies: Policies,
}

impl AppState {
    pub fn new(data: DemoData, policies: Policies) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            policies,
        }
    }

    /// An empty backend with default policies
    pub fn empty() -> Self {
        Self::new(DemoData::default(), Policies::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::seed;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn submission(asset_id: &str, quantity: u32, start: NaiveDate, end: NaiveDate) -> BookingSubmission {
        BookingSubmission {
            user_id: "3".into(),
            user_name: "BUDI SANTOSO".into(),
            asset_id: asset_id.into(),
            asset_name: "whatever".into(),
            asset_type: AssetType::Barang,
            quantity,
            start_date: start,
            end_date: end,
            ukm_ormawa: None,
            nama_kegiatan: Some("Rapat".into()),
        }
    }

    #[test]
    fn test_submit_assigns_next_id() {
        let mut data = seed::demo_data();
        let booking = data
            .submit(
                submission("4", 2, d(2026, 2, 1), d(2026, 2, 2)),
                Policies::default(),
            )
            .unwrap();
        assert_eq!(booking.id, "9");
        assert_eq!(booking.status, BookingStatus::Ajukan);
        assert_eq!(data.bookings.len(), 9);
    }

    #[test]
    fn test_submit_checks_availability() {
        let mut data = seed::demo_data();
        // Paket Visual: all 3 units are out from 23 to 27 December
        let err = data
            .submit(
                submission("5", 1, d(2025, 12, 24), d(2025, 12, 24)),
                Policies::default(),
            )
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Unavailable("Paket Visual stok tidak mencukupi. Tersedia: 0 unit".into())
        );

        let missing = data
            .submit(submission("99", 1, d(2026, 1, 1), d(2026, 1, 1)), Policies::default())
            .unwrap_err();
        assert!(matches!(missing, DomainError::NotFound(_)));
    }

    #[test]
    fn test_submit_takes_asset_from_catalogue() {
        let mut data = seed::demo_data();
        // Asset 1 is Paket Aula, a room; the payload claims otherwise
        let booking = data
            .submit(
                submission("1", 4, d(2026, 3, 1), d(2026, 3, 2)),
                Policies::default(),
            )
            .unwrap();
        assert_eq!(booking.asset_name, "Paket Aula");
        assert_eq!(booking.asset_type, AssetType::Ruangan);
        assert_eq!(booking.quantity, 1);
    }

    #[test]
    fn test_submit_rejects_reversed_dates() {
        let mut data = seed::demo_data();
        let err = data
            .submit(
                submission("4", 1, d(2026, 3, 5), d(2026, 3, 1)),
                Policies::default(),
            )
            .unwrap_err();
        assert_eq!(err, DomainError::Validation(MSG_END_BEFORE_START.into()));
        assert!(err.is_validation());
        assert_eq!(data.bookings.len(), 8);
    }

    #[test]
    fn test_verify_and_return() {
        let mut data = seed::demo_data();
        let approved = data
            .verify("6", BookingStatus::Disetujui, None)
            .unwrap();
        assert_eq!(approved.status, BookingStatus::Disetujui);

        let err = data.verify("7", BookingStatus::Ditolak, None).unwrap_err();
        assert!(err.is_validation());

        let err = data.verify("6", BookingStatus::Selesai, None).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let returned = data.record_return("2", 1, Policies::default()).unwrap();
        assert_eq!(returned.status, BookingStatus::Selesai);
        assert_eq!(returned.returned_quantity, Some(1));
    }
}
