//! Derived views - read-only projections over the cached collections
//!
//! Dashboard table, calendar, verification queue and history, report and
//! asset catalogue all read from the same `bookings`/`assets` slices.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::{Asset, AssetType, Booking, BookingStatus};

fn matches_search(needle: &str, haystacks: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

// ============================================================================
// Booking table
// ============================================================================

/// Filter for the booking table. `None` means "all".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingQuery {
    pub asset_type: Option<AssetType>,
    pub status: Option<BookingStatus>,
    /// Matched case-insensitively against asset and requester names
    pub search: String,
}

impl BookingQuery {
    pub fn matches(&self, booking: &Booking) -> bool {
        self.asset_type.is_none_or(|t| booking.asset_type == t)
            && self.status.is_none_or(|s| booking.status == s)
            && matches_search(
                &self.search,
                &[booking.asset_name.as_str(), booking.user_name.as_str()],
            )
    }

    pub fn apply<'a>(&self, bookings: &'a [Booking]) -> Vec<&'a Booking> {
        bookings.iter().filter(|b| self.matches(b)).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BookingStats {
    pub total: usize,
    pub rooms: usize,
    pub items: usize,
    pub active: usize,
}

impl BookingStats {
    pub fn from_bookings<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> Self {
        bookings.into_iter().fold(Self::default(), |mut acc, b| {
            acc.total += 1;
            match b.asset_type {
                AssetType::Ruangan => acc.rooms += 1,
                AssetType::Barang => acc.items += 1,
            }
            if b.is_active() {
                acc.active += 1;
            }
            acc
        })
    }
}

// ============================================================================
// Requester dashboard
// ============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct UserOverview<'a> {
    pub bookings: Vec<&'a Booking>,
    pub active: Vec<&'a Booking>,
    pub pending: Vec<&'a Booking>,
}

pub fn user_overview<'a>(user_id: &str, bookings: &'a [Booking]) -> UserOverview<'a> {
    let mine: Vec<&Booking> = bookings.iter().filter(|b| b.user_id == user_id).collect();
    let active = mine.iter().copied().filter(|b| b.is_active()).collect();
    let pending = mine
        .iter()
        .copied()
        .filter(|b| b.status == BookingStatus::Ajukan)
        .collect();
    UserOverview {
        bookings: mine,
        active,
        pending,
    }
}

/// Bookings the user still has to hand back.
///
/// A partially returned booking that is still `disetujui` keeps its place in
/// the list until every unit is back.
pub fn awaiting_return<'a>(user_id: &str, bookings: &'a [Booking]) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| {
            b.user_id == user_id
                && b.status == BookingStatus::Disetujui
                && b.outstanding_quantity() > 0
        })
        .collect()
}

// ============================================================================
// Calendar
// ============================================================================

fn on_calendar(booking: &Booking, asset_type: Option<AssetType>) -> bool {
    booking.status != BookingStatus::Ditolak && asset_type.is_none_or(|t| booking.asset_type == t)
}

/// Bookings covering `date`, rejected ones left out.
pub fn bookings_on(
    date: NaiveDate,
    bookings: &[Booking],
    asset_type: Option<AssetType>,
) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| on_calendar(b, asset_type) && b.covers(date))
        .collect()
}

/// Every day covered by at least one non-rejected booking.
pub fn booked_dates(bookings: &[Booking], asset_type: Option<AssetType>) -> BTreeSet<NaiveDate> {
    bookings
        .iter()
        .filter(|b| on_calendar(b, asset_type))
        .flat_map(|b| b.start_date.iter_days().take_while(move |d| *d <= b.end_date))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CalendarCounts {
    pub total: usize,
    pub rooms: usize,
    pub items: usize,
}

pub fn calendar_counts(bookings: &[Booking]) -> CalendarCounts {
    bookings
        .iter()
        .filter(|b| on_calendar(b, None))
        .fold(CalendarCounts::default(), |mut acc, b| {
            acc.total += 1;
            match b.asset_type {
                AssetType::Ruangan => acc.rooms += 1,
                AssetType::Barang => acc.items += 1,
            }
            acc
        })
}

// ============================================================================
// Verification
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

pub fn queue_counts(bookings: &[Booking]) -> QueueCounts {
    let count = |status| bookings.iter().filter(|b| b.status == status).count();
    QueueCounts {
        pending: count(BookingStatus::Ajukan),
        approved: count(BookingStatus::Disetujui),
        rejected: count(BookingStatus::Ditolak),
    }
}

/// Status tab of the verification queue; `None` is the "all" tab.
pub fn queue_tab(bookings: &[Booking], tab: Option<BookingStatus>) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| tab.is_none_or(|s| b.status == s))
        .collect()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HistoryTab {
    #[default]
    All,
    /// Approved, including bookings since returned
    Approved,
    Rejected,
}

pub fn verification_history<'a>(
    bookings: &'a [Booking],
    tab: HistoryTab,
    search: &str,
) -> Vec<&'a Booking> {
    bookings
        .iter()
        .filter(|b| {
            let in_tab = match (tab, b.status) {
                (_, BookingStatus::Ajukan) => false,
                (HistoryTab::All, _) => true,
                (HistoryTab::Approved, s) => {
                    matches!(s, BookingStatus::Disetujui | BookingStatus::Selesai)
                }
                (HistoryTab::Rejected, s) => s == BookingStatus::Ditolak,
            };
            in_tab && matches_search(search, &[b.asset_name.as_str(), b.user_name.as_str()])
        })
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct HistoryCounts {
    pub approved: usize,
    pub rejected: usize,
}

pub fn history_counts(bookings: &[Booking]) -> HistoryCounts {
    HistoryCounts {
        approved: verification_history(bookings, HistoryTab::Approved, "").len(),
        rejected: verification_history(bookings, HistoryTab::Rejected, "").len(),
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct StatusShare {
    pub count: usize,
    /// 0..=100, 0 when the report is empty
    pub percent: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Report {
    pub total: usize,
    pub rooms: usize,
    pub items: usize,
    pub ajukan: StatusShare,
    pub disetujui: StatusShare,
    pub ditolak: StatusShare,
    pub selesai: StatusShare,
}

impl Report {
    pub fn share(&self, status: BookingStatus) -> &StatusShare {
        match status {
            BookingStatus::Ajukan => &self.ajukan,
            BookingStatus::Disetujui => &self.disetujui,
            BookingStatus::Ditolak => &self.ditolak,
            BookingStatus::Selesai => &self.selesai,
        }
    }
}

/// Bookings created within `[from, to]` (both optional, both inclusive),
/// compared on the UTC date of `createdAt`.
pub fn report_bookings(
    bookings: &[Booking],
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
) -> Vec<&Booking> {
    bookings
        .iter()
        .filter(|b| {
            let created = b.created_at.date_naive();
            from.is_none_or(|f| created >= f) && to.is_none_or(|t| created <= t)
        })
        .collect()
}

pub fn build_report(bookings: &[Booking], from: Option<NaiveDate>, to: Option<NaiveDate>) -> Report {
    let selected = report_bookings(bookings, from, to);
    let total = selected.len();
    let share = |status| {
        let count = selected.iter().filter(|b| b.status == status).count();
        let percent = if total == 0 {
            0.0
        } else {
            count as f64 * 100.0 / total as f64
        };
        StatusShare { count, percent }
    };

    Report {
        total,
        rooms: selected.iter().filter(|b| b.asset_type == AssetType::Ruangan).count(),
        items: selected.iter().filter(|b| b.asset_type == AssetType::Barang).count(),
        ajukan: share(BookingStatus::Ajukan),
        disetujui: share(BookingStatus::Disetujui),
        ditolak: share(BookingStatus::Ditolak),
        selesai: share(BookingStatus::Selesai),
    }
}

// ============================================================================
// Asset catalogue
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssetQuery {
    pub asset_type: Option<AssetType>,
    /// Matched case-insensitively against name and description
    pub search: String,
}

impl AssetQuery {
    pub fn apply<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        assets
            .iter()
            .filter(|a| {
                self.asset_type.is_none_or(|t| a.asset_type == t)
                    && matches_search(
                        &self.search,
                        &[a.name.as_str(), a.description.as_deref().unwrap_or("")],
                    )
            })
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CatalogueStats {
    pub rooms: usize,
    pub items: usize,
    pub total_stock: u64,
}

pub fn catalogue_stats(assets: &[Asset]) -> CatalogueStats {
    CatalogueStats {
        rooms: assets.iter().filter(|a| a.is_room()).count(),
        items: assets.iter().filter(|a| !a.is_room()).count(),
        total_stock: assets.iter().map(|a| u64::from(a.total_stock())).sum(),
    }
}
