//! Availability Service - overlap and stock accounting for booking requests
//!
//! Everything here is a pure function of its arguments: no I/O, no clock.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::{Asset, AssetType, Booking, BookingStatus};

/// Which existing bookings are ignored when looking for overlaps.
///
/// `ditolak` never blocks. Whether a returned (`selesai`) booking still holds
/// its dates is chosen per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OverlapPolicy {
    /// Only rejected bookings are ignored
    #[default]
    RejectedOnly,
    /// Rejected and returned bookings are ignored
    RejectedAndCompleted,
}

impl OverlapPolicy {
    /// Whether a booking in `status` occupies its dates.
    pub fn blocks(self, status: BookingStatus) -> bool {
        match status {
            BookingStatus::Ajukan | BookingStatus::Disetujui => true,
            BookingStatus::Ditolak => false,
            BookingStatus::Selesai => self == OverlapPolicy::RejectedOnly,
        }
    }
}

impl FromStr for OverlapPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rejected-only" => Ok(OverlapPolicy::RejectedOnly),
            "rejected-and-completed" => Ok(OverlapPolicy::RejectedAndCompleted),
            other => Err(format!("unknown overlap policy '{}'", other)),
        }
    }
}

/// One line of a booking request: an asset and how many units of it.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedAsset {
    pub asset: Asset,
    pub quantity: u32,
}

impl SelectedAsset {
    pub fn new(asset: Asset, quantity: u32) -> Self {
        Self { asset, quantity }
    }
}

/// Verdict of [`check_availability`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Availability {
    pub available: bool,
    pub message: String,
}

impl Availability {
    pub(crate) fn available(message: impl Into<String>) -> Self {
        Self {
            available: true,
            message: message.into(),
        }
    }

    pub(crate) fn blocked(message: impl Into<String>) -> Self {
        Self {
            available: false,
            message: message.into(),
        }
    }
}

pub const MSG_NO_ASSET: &str = "Pilih minimal satu aset";
pub const MSG_MISSING_DATES: &str = "Lengkapi tanggal peminjaman";
pub const MSG_END_BEFORE_START: &str = "Tanggal selesai harus setelah tanggal mulai";
pub const MSG_ALL_AVAILABLE: &str = "Semua aset tersedia untuk periode ini";

/// Bookings on `asset_id` that occupy at least one day of `[start, end]`.
pub fn overlapping_bookings<'a>(
    asset_id: &'a str,
    start: NaiveDate,
    end: NaiveDate,
    bookings: &'a [Booking],
    policy: OverlapPolicy,
) -> impl Iterator<Item = &'a Booking> + 'a {
    bookings.iter().filter(move |b| {
        b.asset_id == asset_id && policy.blocks(b.status) && b.overlaps(start, end)
    })
}

/// Units of `asset` still free over `[start, end]`. Negative when the asset
/// is overbooked.
pub fn available_stock(
    asset: &Asset,
    start: NaiveDate,
    end: NaiveDate,
    bookings: &[Booking],
    policy: OverlapPolicy,
) -> i64 {
    let booked: i64 = overlapping_bookings(&asset.id, start, end, bookings, policy)
        .map(|b| i64::from(b.quantity))
        .sum();
    i64::from(asset.total_stock()) - booked
}

/// Decide whether every selected asset can be booked for `[start, end]`.
///
/// Preconditions are checked first (at least one asset, both dates,
/// `end >= start`). Assets are then checked in selection order and the first
/// blocking reason is returned.
pub fn check_availability(
    selected: &[SelectedAsset],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    bookings: &[Booking],
    policy: OverlapPolicy,
) -> Availability {
    if selected.is_empty() {
        return Availability::blocked(MSG_NO_ASSET);
    }

    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => return Availability::blocked(MSG_MISSING_DATES),
    };

    if end < start {
        return Availability::blocked(MSG_END_BEFORE_START);
    }

    for SelectedAsset { asset, quantity } in selected {
        match asset.asset_type {
            AssetType::Ruangan => {
                let taken = overlapping_bookings(&asset.id, start, end, bookings, policy)
                    .next()
                    .is_some();
                if taken {
                    return Availability::blocked(format!(
                        "{} sudah dipinjam pada tanggal tersebut",
                        asset.name
                    ));
                }
            }
            AssetType::Barang => {
                let free = available_stock(asset, start, end, bookings, policy);
                if free < i64::from(*quantity) {
                    return Availability::blocked(format!(
                        "{} stok tidak mencukupi. Tersedia: {} unit",
                        asset.name, free
                    ));
                }
            }
        }
    }

    Availability::available(MSG_ALL_AVAILABLE)
}
