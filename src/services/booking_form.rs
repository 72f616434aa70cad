//! Booking request draft
//!
//! Holds what the requester picked (assets, quantities, period, organisation,
//! activity) and turns it into one submission per asset once it passes the
//! availability check.

use chrono::NaiveDate;

use crate::domain::DomainError;
use crate::models::{Asset, AssetType, Booking, BookingSubmission, Paket, User};
use crate::services::availability::{
    check_availability, Availability, OverlapPolicy, SelectedAsset, MSG_END_BEFORE_START,
    MSG_MISSING_DATES, MSG_NO_ASSET,
};

pub const MSG_ORGANISATION_REQUIRED: &str = "Pilih UKM/Ormawa";
pub const MSG_ACTIVITY_REQUIRED: &str = "Lengkapi nama kegiatan";
pub const MSG_EMPTY_PAKET: &str = "Paket ini belum memiliki aset terkait";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingDraft {
    selected: Vec<SelectedAsset>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub ukm_ormawa: Option<String>,
    pub nama_kegiatan: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl BookingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_period(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn selected(&self) -> &[SelectedAsset] {
        &self.selected
    }

    pub fn is_selected(&self, asset_id: &str) -> bool {
        self.selected.iter().any(|s| s.asset.id == asset_id)
    }

    /// Select `asset` with quantity 1, or deselect it if already picked.
    pub fn toggle_asset(&mut self, asset: &Asset) {
        if self.is_selected(&asset.id) {
            self.remove_asset(&asset.id);
        } else {
            self.selected.push(SelectedAsset::new(asset.clone(), 1));
        }
    }

    /// Zero is read as 1, the smallest bookable quantity.
    pub fn set_quantity(&mut self, asset_id: &str, quantity: u32) {
        if let Some(item) = self.selected.iter_mut().find(|s| s.asset.id == asset_id) {
            item.quantity = quantity.max(1);
        }
    }

    pub fn remove_asset(&mut self, asset_id: &str) {
        self.selected.retain(|s| s.asset.id != asset_id);
    }

    /// Toggle every asset belonging to `paket`, one by one.
    pub fn toggle_paket(&mut self, paket: &Paket, assets: &[Asset]) -> Result<(), DomainError> {
        let members = paket.assets(assets);
        if members.is_empty() {
            return Err(DomainError::Validation(format!(
                "{}: hubungi admin untuk melengkapi paket \"{}\"",
                MSG_EMPTY_PAKET, paket.nama_paket
            )));
        }
        for asset in members {
            self.toggle_asset(asset);
        }
        Ok(())
    }

    pub fn is_paket_fully_selected(&self, paket: &Paket, assets: &[Asset]) -> bool {
        let members = paket.assets(assets);
        !members.is_empty() && members.iter().all(|a| self.is_selected(&a.id))
    }

    fn precondition_error(&self, user: &User) -> Option<&'static str> {
        if self.selected.is_empty() {
            return Some(MSG_NO_ASSET);
        }
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Some(MSG_MISSING_DATES);
        };
        if user.role.requires_organisation() && non_blank(&self.ukm_ormawa).is_none() {
            return Some(MSG_ORGANISATION_REQUIRED);
        }
        if end < start {
            return Some(MSG_END_BEFORE_START);
        }
        None
    }

    /// Live verdict for the request as it stands.
    pub fn check(&self, user: &User, bookings: &[Booking], policy: OverlapPolicy) -> Availability {
        if let Some(message) = self.precondition_error(user) {
            return Availability::blocked(message);
        }
        check_availability(
            &self.selected,
            self.start_date,
            self.end_date,
            bookings,
            policy,
        )
    }

    /// Like [`check`](Self::check) but as a `Result`: missing input is a
    /// validation error, a conflict is `Unavailable`.
    pub fn validate(
        &self,
        user: &User,
        bookings: &[Booking],
        policy: OverlapPolicy,
    ) -> Result<Availability, DomainError> {
        if let Some(message) = self.precondition_error(user) {
            return Err(DomainError::Validation(message.to_string()));
        }
        let verdict = self.check(user, bookings, policy);
        if verdict.available {
            Ok(verdict)
        } else {
            Err(DomainError::Unavailable(verdict.message))
        }
    }

    /// One submission per selected asset. Rooms are always requested once.
    pub fn submissions(&self, user: &User) -> Result<Vec<BookingSubmission>, DomainError> {
        if let Some(message) = self.precondition_error(user) {
            return Err(DomainError::Validation(message.to_string()));
        }
        let nama_kegiatan = non_blank(&self.nama_kegiatan)
            .ok_or_else(|| DomainError::Validation(MSG_ACTIVITY_REQUIRED.to_string()))?;
        let (Some(start_date), Some(end_date)) = (self.start_date, self.end_date) else {
            return Err(DomainError::Validation(MSG_MISSING_DATES.to_string()));
        };
        let ukm_ormawa = non_blank(&self.ukm_ormawa).map(str::to_string);

        Ok(self
            .selected
            .iter()
            .map(|SelectedAsset { asset, quantity }| BookingSubmission {
                user_id: user.id.clone(),
                user_name: user.name.clone(),
                asset_id: asset.id.clone(),
                asset_name: asset.name.clone(),
                asset_type: asset.asset_type,
                quantity: match asset.asset_type {
                    AssetType::Ruangan => 1,
                    AssetType::Barang => *quantity,
                },
                start_date,
                end_date,
                ukm_ormawa: ukm_ormawa.clone(),
                nama_kegiatan: Some(nama_kegiatan.to_string()),
            })
            .collect())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn user(role: UserRole) -> User {
        User {
            id: "1".into(),
            name: "JOHN DOE".into(),
            email: "john.doe@student.telkomuniversity.ac.id".into(),
            role,
        }
    }

    fn asset(id: &str, asset_type: AssetType, stock: u32, paket: Option<&str>) -> Asset {
        Asset {
            id: id.into(),
            name: format!("Aset {}", id),
            asset_type,
            stock: Some(stock),
            description: None,
            paket_id: paket.map(str::to_string),
        }
    }

    fn paket(id: &str) -> Paket {
        Paket {
            id: id.into(),
            nama_paket: format!("Paket {}", id),
            deskripsi: None,
            kuota: 5,
        }
    }

    #[test]
    fn test_toggle_and_quantity() {
        let item = asset("4", AssetType::Barang, 10, None);
        let mut draft = BookingDraft::new();

        draft.toggle_asset(&item);
        assert!(draft.is_selected("4"));
        assert_eq!(draft.selected()[0].quantity, 1);

        draft.set_quantity("4", 0);
        assert_eq!(draft.selected()[0].quantity, 1);
        draft.set_quantity("4", 7);
        assert_eq!(draft.selected()[0].quantity, 7);

        draft.toggle_asset(&item);
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn test_toggle_paket() {
        let assets = vec![
            asset("1", AssetType::Ruangan, 1, Some("p1")),
            asset("2", AssetType::Barang, 1, Some("p1")),
            asset("3", AssetType::Barang, 4, None),
        ];
        let mut draft = BookingDraft::new();

        draft.toggle_paket(&paket("p1"), &assets).unwrap();
        assert!(draft.is_paket_fully_selected(&paket("p1"), &assets));
        assert_eq!(draft.selected().len(), 2);

        // Toggling flips each member individually
        draft.toggle_asset(&assets[0]);
        draft.toggle_paket(&paket("p1"), &assets).unwrap();
        assert!(draft.is_selected("1"));
        assert!(!draft.is_selected("2"));
        assert!(!draft.is_paket_fully_selected(&paket("p1"), &assets));
    }

    #[test]
    fn test_empty_paket_is_rejected() {
        let mut draft = BookingDraft::new();
        let err = draft.toggle_paket(&paket("kosong"), &[]).unwrap_err();
        assert!(matches!(err, DomainError::Validation(msg) if msg.starts_with(MSG_EMPTY_PAKET)));
        assert!(draft.selected().is_empty());
    }

    #[test]
    fn test_student_needs_organisation() {
        let mut draft = BookingDraft::new().with_period(d(2026, 1, 5), d(2026, 1, 6));
        draft.toggle_asset(&asset("4", AssetType::Barang, 10, None));

        let verdict = draft.check(&user(UserRole::Mahasiswa), &[], OverlapPolicy::default());
        assert_eq!(verdict.message, MSG_ORGANISATION_REQUIRED);

        let lecturer = draft.check(&user(UserRole::Dosen), &[], OverlapPolicy::default());
        assert!(lecturer.available);

        draft.ukm_ormawa = Some("UKM Robotika".into());
        assert!(
            draft
                .check(&user(UserRole::Mahasiswa), &[], OverlapPolicy::default())
                .available
        );
    }

    #[test]
    fn test_validate_classifies_errors() {
        let staff = user(UserRole::Staff);
        let empty = BookingDraft::new();
        assert_eq!(
            empty.validate(&staff, &[], OverlapPolicy::default()),
            Err(DomainError::Validation(MSG_NO_ASSET.into()))
        );

        let mut reversed = BookingDraft::new().with_period(d(2026, 1, 6), d(2026, 1, 5));
        reversed.toggle_asset(&asset("4", AssetType::Barang, 10, None));
        assert_eq!(
            reversed.validate(&staff, &[], OverlapPolicy::default()),
            Err(DomainError::Validation(MSG_END_BEFORE_START.into()))
        );

        let mut greedy = BookingDraft::new().with_period(d(2026, 1, 5), d(2026, 1, 5));
        greedy.toggle_asset(&asset("4", AssetType::Barang, 2, None));
        greedy.set_quantity("4", 3);
        let err = greedy
            .validate(&staff, &[], OverlapPolicy::default())
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::Unavailable("Aset 4 stok tidak mencukupi. Tersedia: 2 unit".into())
        );
    }

    #[test]
    fn test_submissions_one_per_asset() {
        let mut draft = BookingDraft::new().with_period(d(2026, 1, 5), d(2026, 1, 7));
        let room = asset("3", AssetType::Ruangan, 8, None);
        let item = asset("4", AssetType::Barang, 10, None);
        draft.toggle_asset(&room);
        draft.toggle_asset(&item);
        draft.set_quantity("3", 4);
        draft.set_quantity("4", 3);
        draft.ukm_ormawa = Some("  ".into());

        let staff = user(UserRole::Staff);
        assert_eq!(
            draft.submissions(&staff),
            Err(DomainError::Validation(MSG_ACTIVITY_REQUIRED.into()))
        );

        draft.nama_kegiatan = Some("Seminar Nasional".into());
        let subs = draft.submissions(&staff).unwrap();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].asset_id, "3");
        assert_eq!(subs[0].quantity, 1);
        assert_eq!(subs[1].quantity, 3);
        assert_eq!(subs[1].ukm_ormawa, None);
        assert_eq!(subs[1].nama_kegiatan.as_deref(), Some("Seminar Nasional"));
        assert_eq!(subs[1].user_id, "1");

        draft.reset();
        assert_eq!(draft, BookingDraft::default());
    }
}
