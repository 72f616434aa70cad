use serde::{Deserialize, Serialize};

use super::asset::Asset;

/// A named bundle of assets that can be selected in one click.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paket {
    pub id: String,
    pub nama_paket: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi: Option<String>,
    pub kuota: u32,
}

impl Paket {
    /// Assets that reference this paket, in catalogue order
    pub fn assets<'a>(&self, assets: &'a [Asset]) -> Vec<&'a Asset> {
        assets
            .iter()
            .filter(|a| a.paket_id.as_deref() == Some(self.id.as_str()))
            .collect()
    }
}
