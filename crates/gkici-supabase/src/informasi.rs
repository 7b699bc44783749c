//! Announcement rows. Each kategori lives in its own managed table
//! (`kegiatan` or `berita`); the row shape differs in one date column.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::{Informasi, InformasiInput, InformasiKategori};

use crate::artikel::serde_with_double_option;
use crate::SupabaseClient;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct InformasiPatch {
    pub judul: Option<String>,
    pub deskripsi: Option<String>,
    pub jadwal: Option<String>,
    pub tanggal: Option<NaiveDate>,
    #[serde(default, with = "serde_with_double_option")]
    pub media_url: Option<Option<String>>,
}

impl InformasiPatch {
    pub fn validate(&self) -> Result<(), String> {
        use gkici_core::content::{DESKRIPSI_MAX, JUDUL_MAX};
        if let Some(judul) = &self.judul {
            if judul.chars().count() > JUDUL_MAX {
                return Err(format!("judul maksimal {JUDUL_MAX} karakter"));
            }
        }
        if let Some(deskripsi) = &self.deskripsi {
            if deskripsi.chars().count() > DESKRIPSI_MAX {
                return Err(format!("deskripsi maksimal {DESKRIPSI_MAX} karakter"));
            }
        }
        Ok(())
    }

    fn to_row(&self, kategori: InformasiKategori) -> serde_json::Value {
        let mut row = serde_json::Map::new();
        if let Some(v) = &self.judul {
            row.insert("judul".into(), json!(v));
        }
        if let Some(v) = &self.deskripsi {
            row.insert("deskripsi".into(), json!(v));
        }
        match kategori {
            InformasiKategori::Kegiatan => {
                if let Some(v) = &self.jadwal {
                    row.insert("jadwal".into(), json!(v));
                }
            }
            InformasiKategori::Berita => {
                if let Some(v) = &self.tanggal {
                    row.insert("tanggal".into(), json!(v));
                }
            }
        }
        if let Some(v) = &self.media_url {
            row.insert("media_url".into(), json!(v));
        }
        serde_json::Value::Object(row)
    }
}

impl SupabaseClient {
    /// All rows of one kategori, newest first.
    pub async fn list_informasi(&self, kategori: InformasiKategori) -> Result<Vec<Informasi>> {
        let rows = self.select(kategori.table(), "created_at.desc").await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).context("informasi row malformed"))
            .collect()
    }

    pub async fn insert_informasi(
        &self,
        input: &InformasiInput,
        media_url: Option<String>,
    ) -> Result<Informasi> {
        let mut row = json!({
            "judul": input.judul,
            "deskripsi": input.deskripsi,
            "media_url": media_url,
        });
        match input.kategori {
            InformasiKategori::Kegiatan => row["jadwal"] = json!(input.jadwal),
            InformasiKategori::Berita => row["tanggal"] = json!(input.tanggal),
        }
        let created = self.insert(input.kategori.table(), &row).await?;
        serde_json::from_value(created).context("informasi row malformed")
    }

    pub async fn update_informasi(
        &self,
        kategori: InformasiKategori,
        id: Uuid,
        patch: &InformasiPatch,
    ) -> Result<Option<Informasi>> {
        let updated = self
            .update(kategori.table(), id, &patch.to_row(kategori))
            .await?;
        updated
            .map(|row| serde_json::from_value(row).context("informasi row malformed"))
            .transpose()
    }

    pub async fn delete_informasi(&self, kategori: InformasiKategori, id: Uuid) -> Result<bool> {
        self.delete(kategori.table(), id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kegiatan_patch_ignores_berita_date() {
        let patch: InformasiPatch =
            serde_json::from_str(r#"{"jadwal":"Sabtu 19:00","tanggal":"2025-06-29"}"#)
                .expect("patch");
        assert_eq!(
            patch.to_row(InformasiKategori::Kegiatan),
            json!({ "jadwal": "Sabtu 19:00" })
        );
        assert_eq!(
            patch.to_row(InformasiKategori::Berita),
            json!({ "tanggal": "2025-06-29" })
        );
    }
}
