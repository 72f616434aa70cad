//! Booking lifecycle - status transitions for verification and returns
//!
//! ```text
//! ajukan ──► disetujui ──► selesai
//!    └─────► ditolak
//! ```
//!
//! Functions return an updated copy of the booking and never mutate their
//! input, so a failed check leaves the caller's state untouched.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::DomainError;
use crate::models::{Booking, BookingStatus};

pub const MSG_REJECT_NOTE_REQUIRED: &str = "Alasan penolakan wajib diisi";

impl BookingStatus {
    /// Transition table of the lifecycle.
    pub fn can_transition_to(self, next: BookingStatus) -> bool {
        matches!(
            (self, next),
            (BookingStatus::Ajukan, BookingStatus::Disetujui)
                | (BookingStatus::Ajukan, BookingStatus::Ditolak)
                | (BookingStatus::Disetujui, BookingStatus::Selesai)
        )
    }
}

/// What happens to the status when only part of a booking comes back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReturnPolicy {
    /// Any recorded return closes the booking
    #[default]
    AlwaysComplete,
    /// The booking stays `disetujui` until every unit is back
    CompleteOnFullReturn,
}

impl FromStr for ReturnPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always-complete" => Ok(ReturnPolicy::AlwaysComplete),
            "complete-on-full-return" => Ok(ReturnPolicy::CompleteOnFullReturn),
            other => Err(format!("unknown return policy '{}'", other)),
        }
    }
}

/// A verifier's decision on a pending booking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verification {
    Approve { note: Option<String> },
    Reject { note: String },
}

impl Verification {
    pub fn target_status(&self) -> BookingStatus {
        match self {
            Verification::Approve { .. } => BookingStatus::Disetujui,
            Verification::Reject { .. } => BookingStatus::Ditolak,
        }
    }

    /// Trimmed note, `None` when blank
    pub fn note(&self) -> Option<&str> {
        let raw = match self {
            Verification::Approve { note } => note.as_deref(),
            Verification::Reject { note } => Some(note.as_str()),
        };
        raw.map(str::trim).filter(|n| !n.is_empty())
    }
}

fn ensure_transition(booking: &Booking, next: BookingStatus) -> Result<(), DomainError> {
    if booking.status.can_transition_to(next) {
        Ok(())
    } else {
        Err(DomainError::InvalidTransition {
            from: booking.status,
            to: next,
        })
    }
}

/// Apply a verifier decision. Only `ajukan` bookings can be verified and a
/// rejection must carry a reason.
pub fn verify(booking: &Booking, decision: &Verification) -> Result<Booking, DomainError> {
    ensure_transition(booking, decision.target_status())?;

    if matches!(decision, Verification::Reject { .. }) && decision.note().is_none() {
        return Err(DomainError::Validation(MSG_REJECT_NOTE_REQUIRED.to_string()));
    }

    let mut updated = booking.clone();
    updated.status = decision.target_status();
    updated.verification_note = decision.note().map(str::to_string);
    Ok(updated)
}

/// Check that `quantity` units can be handed back on `booking`.
pub fn validate_return_quantity(booking: &Booking, quantity: u32) -> Result<(), DomainError> {
    let outstanding = booking.outstanding_quantity();
    if quantity < 1 || quantity > outstanding {
        return Err(DomainError::Validation(format!(
            "Jumlah pengembalian harus antara 1 dan {} {}",
            outstanding,
            booking.asset_type.unit_label()
        )));
    }
    Ok(())
}

/// Record a return of `quantity` units. Returned quantities accumulate; the
/// resulting status depends on `policy`.
pub fn record_return(
    booking: &Booking,
    quantity: u32,
    policy: ReturnPolicy,
) -> Result<Booking, DomainError> {
    ensure_transition(booking, BookingStatus::Selesai)?;
    validate_return_quantity(booking, quantity)?;

    let returned = booking.returned_quantity.unwrap_or(0) + quantity;
    let mut updated = booking.clone();
    updated.returned_quantity = Some(returned);
    updated.status = match policy {
        ReturnPolicy::AlwaysComplete => BookingStatus::Selesai,
        ReturnPolicy::CompleteOnFullReturn if returned >= booking.quantity => {
            BookingStatus::Selesai
        }
        ReturnPolicy::CompleteOnFullReturn => BookingStatus::Disetujui,
    };
    Ok(updated)
}

/// Notice text after a return of `quantity` units on `booking` (pre-return state).
pub fn describe_return(booking: &Booking, quantity: u32) -> String {
    if quantity < booking.outstanding_quantity() {
        format!(
            "{} dari {} {} {} telah dikembalikan",
            quantity,
            booking.quantity,
            booking.asset_type.unit_label(),
            booking.asset_name
        )
    } else {
        format!("{} telah dikembalikan lengkap", booking.asset_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AssetType;
    use chrono::{NaiveDate, Utc};

    fn booking(status: BookingStatus, quantity: u32) -> Booking {
        Booking {
            id: "2".to_string(),
            user_id: "1".to_string(),
            user_name: "John Doe".to_string(),
            asset_id: "6".to_string(),
            asset_name: "Paket Audio Lapangan".to_string(),
            asset_type: AssetType::Barang,
            quantity,
            start_date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 12, 28).unwrap(),
            status,
            created_at: Utc::now(),
            returned_quantity: None,
            ukm_ormawa: None,
            nama_kegiatan: None,
            verification_note: None,
        }
    }

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;
        let all = [Ajukan, Disetujui, Ditolak, Selesai];

        let allowed: Vec<_> = all
            .iter()
            .flat_map(|from| all.iter().map(move |to| (*from, *to)))
            .filter(|(from, to)| from.can_transition_to(*to))
            .collect();

        assert_eq!(
            allowed,
            vec![(Ajukan, Disetujui), (Ajukan, Ditolak), (Disetujui, Selesai)]
        );
        for terminal in [Ditolak, Selesai] {
            assert!(terminal.is_terminal());
            assert!(all.iter().all(|to| !terminal.can_transition_to(*to)));
        }
    }

    #[test]
    fn test_approve_pending() {
        let pending = booking(BookingStatus::Ajukan, 1);
        let approved = verify(&pending, &Verification::Approve { note: Some("  ".into()) }).unwrap();

        assert_eq!(approved.status, BookingStatus::Disetujui);
        assert_eq!(approved.verification_note, None);
        assert_eq!(pending.status, BookingStatus::Ajukan);
    }

    #[test]
    fn test_reject_requires_note() {
        let pending = booking(BookingStatus::Ajukan, 1);

        let err = verify(&pending, &Verification::Reject { note: " ".into() }).unwrap_err();
        assert_eq!(err, DomainError::Validation(MSG_REJECT_NOTE_REQUIRED.into()));

        let rejected = verify(
            &pending,
            &Verification::Reject {
                note: " Stok tidak mencukupi ".into(),
            },
        )
        .unwrap();
        assert_eq!(rejected.status, BookingStatus::Ditolak);
        assert_eq!(rejected.verification_note.as_deref(), Some("Stok tidak mencukupi"));
    }

    #[test]
    fn test_pending_moves_to_exactly_one_outcome() {
        let pending = booking(BookingStatus::Ajukan, 1);
        let rejected = verify(&pending, &Verification::Reject { note: "x".into() }).unwrap();

        let again = verify(&rejected, &Verification::Approve { note: None }).unwrap_err();
        assert_eq!(
            again,
            DomainError::InvalidTransition {
                from: BookingStatus::Ditolak,
                to: BookingStatus::Disetujui
            }
        );
        assert!(record_return(&rejected, 1, ReturnPolicy::default()).is_err());
    }

    #[test]
    fn test_return_requires_approval() {
        let pending = booking(BookingStatus::Ajukan, 2);
        let err = record_return(&pending, 1, ReturnPolicy::default()).unwrap_err();
        assert!(matches!(err, DomainError::InvalidTransition { .. }));
    }

    #[test]
    fn test_return_quantity_bounds() {
        let approved = booking(BookingStatus::Disetujui, 2);

        let zero = record_return(&approved, 0, ReturnPolicy::default()).unwrap_err();
        assert_eq!(
            zero,
            DomainError::Validation("Jumlah pengembalian harus antara 1 dan 2 unit".into())
        );
        assert!(record_return(&approved, 3, ReturnPolicy::default()).is_err());
    }

    #[test]
    fn test_partial_return_always_complete() {
        let approved = booking(BookingStatus::Disetujui, 2);
        let returned = record_return(&approved, 1, ReturnPolicy::AlwaysComplete).unwrap();

        assert_eq!(returned.status, BookingStatus::Selesai);
        assert_eq!(returned.returned_quantity, Some(1));
    }

    #[test]
    fn test_partial_return_complete_on_full_return() {
        let approved = booking(BookingStatus::Disetujui, 2);
        let policy = ReturnPolicy::CompleteOnFullReturn;

        let partial = record_return(&approved, 1, policy).unwrap();
        assert_eq!(partial.status, BookingStatus::Disetujui);
        assert_eq!(partial.returned_quantity, Some(1));
        assert!(!partial.is_active());

        let rest = record_return(&partial, 1, policy).unwrap();
        assert_eq!(rest.status, BookingStatus::Selesai);
        assert_eq!(rest.returned_quantity, Some(2));

        // Never more than what is still out
        assert!(record_return(&partial, 2, policy).is_err());
    }

    #[test]
    fn test_describe_return() {
        let approved = booking(BookingStatus::Disetujui, 2);
        assert_eq!(
            describe_return(&approved, 1),
            "1 dari 2 unit Paket Audio Lapangan telah dikembalikan"
        );
        assert_eq!(
            describe_return(&approved, 2),
            "Paket Audio Lapangan telah dikembalikan lengkap"
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!(
            "complete-on-full-return".parse::<ReturnPolicy>(),
            Ok(ReturnPolicy::CompleteOnFullReturn)
        );
        assert!("partial".parse::<ReturnPolicy>().is_err());
    }
}
