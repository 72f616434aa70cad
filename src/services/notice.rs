//! Toast-style notices produced by store actions

use serde::Serialize;

use crate::domain::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
    Warning,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            title: title.into(),
            description: Some(description.into()),
        }
    }

    /// Error notice for `err`, titled after its class.
    pub fn from_error(err: &DomainError) -> Self {
        let title = match err {
            DomainError::Validation(_) | DomainError::InvalidTransition { .. } => {
                "Data tidak valid"
            }
            DomainError::Unavailable(_) => "Peminjaman ditolak",
            DomainError::NotFound(_) => "Data tidak ditemukan",
            DomainError::Unauthenticated => "Sesi berakhir",
            DomainError::Network(_) => "Gagal terhubung ke server",
            DomainError::Backend(_) => "Permintaan gagal",
        };
        Self::error(title, err.to_string())
    }
}

/// Report export targets. Exports are not generated, only acknowledged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Excel,
}

pub fn export_notice(format: ExportFormat) -> Notice {
    match format {
        ExportFormat::Pdf => Notice::success("Export PDF", "Laporan berhasil diexport ke PDF"),
        ExportFormat::Excel => {
            Notice::success("Export Excel", "Laporan berhasil diexport ke Excel")
        }
    }
}
