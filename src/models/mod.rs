pub mod asset;
pub mod booking;
pub mod paket;
pub mod user;

pub use asset::{Asset, AssetType};
pub use booking::{Booking, BookingStatus, BookingSubmission, ReturnRequest, VerifyRequest};
pub use paket::Paket;
pub use user::{LoginRequest, LoginResponse, User, UserRole};

use serde::{Deserialize, Serialize};

/// Envelope returned by every mutating endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaketList {
    #[serde(default)]
    pub pakets: Vec<Paket>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetList {
    #[serde(default)]
    pub assets: Vec<Asset>,
}
