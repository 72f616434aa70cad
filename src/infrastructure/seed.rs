use chrono::{DateTime, NaiveDate, Utc};

use crate::infrastructure::state::{AppState, DemoData};
use crate::models::{Asset, AssetType, Booking, BookingStatus, Paket};

fn asset(
    id: &str,
    name: &str,
    asset_type: AssetType,
    stock: u32,
    description: &str,
    paket_id: Option<&str>,
) -> Asset {
    Asset {
        id: id.to_owned(),
        name: name.to_owned(),
        asset_type,
        stock: Some(stock),
        description: Some(description.to_owned()),
        paket_id: paket_id.map(str::to_owned),
    }
}

pub fn demo_assets() -> Vec<Asset> {
    use AssetType::{Barang, Ruangan};
    vec![
        asset("1", "Paket Aula", Ruangan, 1,
            "Aula Telkom Univ Surabaya (kapasitas ±500 orang) - Audio, Visual, Furniture lengkap",
            Some("p1")),
        asset("2", "Paket Duduk Aula", Barang, 1,
            "Kursi Besar Tiger - 50 unit (1 set = 50 unit, khusus penggunaan di aula)",
            Some("p1")),
        asset("3", "Paket Kelas", Ruangan, 8,
            "Ruang Kelas Sekat/Gabung - Include TV, HDMI, Remote, AC, Kursi 45 unit, Meja Staff",
            None),
        asset("4", "Paket Listrik", Barang, 10, "Kabel roll 5 meter - 3 unit per set", None),
        asset("5", "Paket Visual", Barang, 3,
            "TV Panasonic 55\", HDMI 10/15m, Remote TV, Kabel roll 5m",
            None),
        asset("6", "Paket Audio Lapangan", Barang, 2,
            "Speaker Baritone 15H, Mixer portable, Stand, Kabel XLR & Olor 25m, Wireless mic (2 unit)",
            Some("p2")),
        asset("7", "Paket Audio Medium", Barang, 3,
            "Speaker portable, Wireless mic (2 unit), Kabel roll, RCA to 3.5mm",
            None),
        asset("8", "Paket Lighting", Barang, 1,
            "Lampu GVM RGB (2 unit), COB Godox 60W, Tripod GVM (2 unit), Tripod COB, Kabel Olor 5m (3 unit)",
            Some("p2")),
        asset("9", "Paket Komunikasi", Barang, 3,
            "Handy Talky (HT) - 4 unit + Charger HT 4 unit per set",
            None),
        asset("10", "Paket Streaming", Barang, 1,
            "Camcorder Sony, Tripod, Atem Mini Pro, Capture Card, HDMI 15m (7 unit), HDMI 3m (4 unit), Extender, Splitter",
            Some("p2")),
        asset("11", "Paket Musyawarah", Barang, 1,
            "Bendera Merah Putih, Bendera Telkom Univ Surabaya, Tiang Bendera Set (3 unit), Palu Sidang",
            None),
        asset("12", "Megaphone / TOA", Barang, 2,
            "Megaphone untuk pengumuman atau kegiatan outdoor",
            None),
    ]
}

pub fn demo_pakets() -> Vec<Paket> {
    vec![
        Paket {
            id: "p1".to_owned(),
            nama_paket: "Paket Acara Aula".to_owned(),
            deskripsi: Some("Aula beserta kursi".to_owned()),
            kuota: 1,
        },
        Paket {
            id: "p2".to_owned(),
            nama_paket: "Paket Produksi".to_owned(),
            deskripsi: Some("Audio lapangan, lighting dan streaming".to_owned()),
            kuota: 1,
        },
        // No assets reference this one yet
        Paket {
            id: "p3".to_owned(),
            nama_paket: "Paket Outdoor".to_owned(),
            deskripsi: None,
            kuota: 2,
        },
    ]
}

struct SeedBooking<'a> {
    id: &'a str,
    user: (&'a str, &'a str),
    asset: &'a Asset,
    quantity: u32,
    dates: (&'a str, &'a str),
    status: BookingStatus,
    created_at: &'a str,
    ukm_ormawa: &'a str,
}

impl SeedBooking<'_> {
    fn build(self) -> Option<Booking> {
        Some(Booking {
            id: self.id.to_owned(),
            user_id: self.user.0.to_owned(),
            user_name: self.user.1.to_owned(),
            asset_id: self.asset.id.clone(),
            asset_name: self.asset.name.clone(),
            asset_type: self.asset.asset_type,
            quantity: self.quantity,
            start_date: NaiveDate::parse_from_str(self.dates.0, "%Y-%m-%d").ok()?,
            end_date: NaiveDate::parse_from_str(self.dates.1, "%Y-%m-%d").ok()?,
            status: self.status,
            created_at: DateTime::parse_from_rfc3339(self.created_at)
                .ok()?
                .with_timezone(&Utc),
            returned_quantity: None,
            ukm_ormawa: Some(self.ukm_ormawa.to_owned()),
            nama_kegiatan: None,
            verification_note: None,
        })
    }
}

pub fn demo_bookings(assets: &[Asset]) -> Vec<Booking> {
    use BookingStatus::{Ajukan, Disetujui};
    let john = ("1", "John Doe");
    let jane = ("2", "Jane Smith");

    let rows = [
        ("1", john, "1", 1, ("2025-12-24", "2025-12-26"), Disetujui, "2025-12-01T10:00:00Z", "UKM Telkom Art"),
        ("2", john, "6", 2, ("2025-12-25", "2025-12-28"), Disetujui, "2025-12-02T14:00:00Z", "Badan Eksekutif Mahasiswa (BEM)"),
        ("3", john, "5", 3, ("2025-12-23", "2025-12-27"), Disetujui, "2025-12-03T09:00:00Z", "Himpunan Mahasiswa Informatika"),
        ("4", john, "3", 2, ("2025-12-26", "2025-12-26"), Disetujui, "2025-12-04T11:00:00Z", "Dewan Perwakilan Mahasiswa (DPM)"),
        ("5", john, "9", 1, ("2025-12-29", "2025-12-31"), Disetujui, "2025-12-05T15:00:00Z", "UKM E-Sport"),
        ("6", john, "12", 1, ("2025-12-30", "2025-12-30"), Ajukan, "2025-12-06T08:00:00Z", "UKM Robotika"),
        ("7", jane, "7", 1, ("2025-12-27", "2025-12-29"), Ajukan, "2025-12-07T16:00:00Z", "UKM Paduan Suara Vox Auream"),
        ("8", jane, "10", 1, ("2025-12-28", "2025-12-30"), Disetujui, "2025-12-08T10:00:00Z", "UKM Media"),
    ];

    rows.into_iter()
        .filter_map(|(id, user, asset_id, quantity, dates, status, created_at, ukm_ormawa)| {
            let asset = assets.iter().find(|a| a.id == asset_id)?;
            SeedBooking {
                id,
                user,
                asset,
                quantity,
                dates,
                status,
                created_at,
                ukm_ormawa,
            }
            .build()
        })
        .collect()
}

pub fn demo_data() -> DemoData {
    let assets = demo_assets();
    let bookings = demo_bookings(&assets);
    DemoData::new(assets, demo_pakets(), bookings)
}

/// Replace whatever the backend holds with the demo catalogue and bookings.
pub async fn seed_demo_data(state: &AppState) {
    let mut data = state.data.write().await;
    *data = demo_data();
    tracing::info!(
        "Seeded {} assets, {} pakets, {} bookings",
        data.assets.len(),
        data.pakets.len(),
        data.bookings.len()
    );
}
