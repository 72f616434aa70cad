//! Services Layer
//!
//! Booking rules and projections, free of any HTTP concern, plus the
//! application store that drives them against a [`BookingRepository`].
//!
//! [`BookingRepository`]: crate::domain::BookingRepository

pub mod availability;
pub mod booking_form;
pub mod lifecycle;
pub mod notice;
pub mod store;
pub mod views;

// Re-export for convenience
pub use availability::{check_availability, Availability, OverlapPolicy, SelectedAsset};
pub use booking_form::BookingDraft;
pub use lifecycle::{ReturnPolicy, Verification};
pub use notice::{Notice, NoticeKind};
pub use store::{AppStore, Policies};
