use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of bookable asset.
///
/// Rooms are atomic: one reservation at a time regardless of `stock`.
/// Items are counted against `stock`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    Ruangan,
    Barang,
}

impl AssetType {
    /// Unit word used in user-facing quantities ("2 unit", "1 ruangan")
    pub fn unit_label(self) -> &'static str {
        match self {
            AssetType::Ruangan => "ruangan",
            AssetType::Barang => "unit",
        }
    }
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetType::Ruangan => write!(f, "Ruangan"),
            AssetType::Barang => write!(f, "Barang"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: AssetType,
    /// Units owned. Only meaningful for items; absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paket_id: Option<String>,
}

impl Asset {
    pub fn total_stock(&self) -> u32 {
        self.stock.unwrap_or(0)
    }

    pub fn is_room(&self) -> bool {
        self.asset_type == AssetType::Ruangan
    }
}
