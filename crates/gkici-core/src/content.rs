//! Row and input types for the four content kinds.
//!
//! The table schemas are owned by the managed backend; column names are the
//! Indonesian ones the public site already reads, so they are preserved on
//! the wire verbatim.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Asia::Jakarta;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const JUDUL_MAX: usize = 100;
pub const PENULIS_MAX: usize = 50;
pub const RINGKASAN_MAX: usize = 300;
pub const ISI_MAX: usize = 5000;
pub const DESKRIPSI_MAX: usize = 500;

fn require(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{field} wajib diisi"));
    }
    Ok(())
}

fn limit(field: &str, value: &str, max: usize) -> Result<(), String> {
    if value.chars().count() > max {
        return Err(format!("{field} maksimal {max} karakter"));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Artikel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artikel {
    pub id: Uuid,
    pub judul: String,
    pub penulis: String,
    pub ringkasan: String,
    pub isi: String,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtikelInput {
    pub judul: String,
    pub penulis: String,
    #[serde(default)]
    pub ringkasan: String,
    #[serde(default)]
    pub isi: String,
}

impl ArtikelInput {
    pub fn validate(&self) -> Result<(), String> {
        require("judul", &self.judul)?;
        require("penulis", &self.penulis)?;
        limit("judul", &self.judul, JUDUL_MAX)?;
        limit("penulis", &self.penulis, PENULIS_MAX)?;
        limit("ringkasan", &self.ringkasan, RINGKASAN_MAX)?;
        limit("isi", &self.isi, ISI_MAX)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Informasi (kegiatan / berita)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InformasiKategori {
    Kegiatan,
    Berita,
}

impl InformasiKategori {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            "kegiatan" => Ok(Self::Kegiatan),
            "berita" => Ok(Self::Berita),
            _ => Err("kategori must be 'kegiatan' or 'berita'".to_string()),
        }
    }

    /// Each kategori is stored in its own managed table.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Kegiatan => "kegiatan",
            Self::Berita => "berita",
        }
    }
}

/// A row from either informasi table. `jadwal` is only present on kegiatan
/// rows, `tanggal` only on berita rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Informasi {
    pub id: Uuid,
    pub judul: String,
    pub deskripsi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jadwal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tanggal: Option<NaiveDate>,
    pub media_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InformasiInput {
    pub kategori: InformasiKategori,
    pub judul: String,
    #[serde(default)]
    pub deskripsi: String,
    #[serde(default)]
    pub jadwal: Option<String>,
    #[serde(default)]
    pub tanggal: Option<NaiveDate>,
}

impl InformasiInput {
    pub fn validate(&self) -> Result<(), String> {
        require("judul", &self.judul)?;
        limit("judul", &self.judul, JUDUL_MAX)?;
        limit("deskripsi", &self.deskripsi, DESKRIPSI_MAX)?;
        match self.kategori {
            InformasiKategori::Kegiatan => {
                if self.jadwal.as_deref().map(str::trim).unwrap_or("").is_empty() {
                    return Err("jadwal wajib diisi untuk kegiatan".to_string());
                }
            }
            InformasiKategori::Berita => {
                if self.tanggal.is_none() {
                    return Err("tanggal wajib diisi untuk berita".to_string());
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Shalom
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShalomKategori {
    #[serde(rename = "renungan")]
    Renungan,
    #[serde(rename = "bacaan")]
    Bacaan,
    #[serde(rename = "pokok-doa")]
    PokokDoa,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shalom {
    pub id: Uuid,
    pub kategori: ShalomKategori,
    pub judul: String,
    pub ayat_alkitab: Option<String>,
    pub tampilan_pasal: Option<String>,
    /// Effective date; devotional lists sort on this, not on creation time.
    pub tanggal_berlaku: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShalomInput {
    pub kategori: ShalomKategori,
    pub judul: String,
    #[serde(default)]
    pub ayat_alkitab: Option<String>,
    #[serde(default)]
    pub tampilan_pasal: Option<String>,
    pub tanggal_berlaku: NaiveDate,
}

impl ShalomInput {
    pub fn validate(&self) -> Result<(), String> {
        require("judul", &self.judul)?;
        limit("judul", &self.judul, JUDUL_MAX)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Warta jemaat (weekly bulletin)
// ---------------------------------------------------------------------------

pub const WARTA_BUCKET: &str = "download";
pub const WARTA_PREFIX: &str = "public/warta-jemaat";
pub const LITURGI_PATH: &str = "public/liturgi-kebaktian-umum.pdf";
pub const LITURGI_NAME: &str = "Liturgi Kebaktian Umum";

/// A bulletin record. The date is stored on the row so listing never has to
/// parse it back out of the display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Warta {
    pub id: Uuid,
    pub name: String,
    pub path: String,
    pub published_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

const BULAN: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Bulletin file name for a given congregation-calendar date,
/// e.g. "WARTA JEMAAT 29 JUNI 2025.pdf". One bulletin per date: re-uploading
/// on the same day produces the same name and overwrites.
pub fn warta_file_name(date: NaiveDate) -> String {
    let bulan = BULAN[date.month0() as usize];
    format!(
        "WARTA JEMAAT {:02} {} {}.pdf",
        date.day(),
        bulan.to_uppercase(),
        date.year()
    )
}

/// Storage object path for the bulletin of `date`.
pub fn warta_object_path(date: NaiveDate) -> String {
    format!("{WARTA_PREFIX}/{}", warta_file_name(date))
}

/// The congregation's calendar day for a given instant.
pub fn jakarta_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Jakarta).date_naive()
}
