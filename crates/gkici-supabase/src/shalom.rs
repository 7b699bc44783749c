//! Devotional ("shalom") rows in the managed `shalom` table.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::{Shalom, ShalomInput, ShalomKategori};

use crate::SupabaseClient;

const TABLE: &str = "shalom";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShalomPatch {
    pub kategori: Option<ShalomKategori>,
    pub judul: Option<String>,
    pub ayat_alkitab: Option<String>,
    pub tampilan_pasal: Option<String>,
    pub tanggal_berlaku: Option<NaiveDate>,
}

impl ShalomPatch {
    pub fn validate(&self) -> Result<(), String> {
        use gkici_core::content::JUDUL_MAX;
        if let Some(judul) = &self.judul {
            if judul.trim().is_empty() {
                return Err("judul wajib diisi".to_string());
            }
            if judul.chars().count() > JUDUL_MAX {
                return Err(format!("judul maksimal {JUDUL_MAX} karakter"));
            }
        }
        Ok(())
    }

    fn to_row(&self) -> serde_json::Value {
        let mut row = serde_json::Map::new();
        if let Some(v) = &self.kategori {
            row.insert("kategori".into(), json!(v));
        }
        if let Some(v) = &self.judul {
            row.insert("judul".into(), json!(v));
        }
        if let Some(v) = &self.ayat_alkitab {
            row.insert("ayat_alkitab".into(), json!(v));
        }
        if let Some(v) = &self.tampilan_pasal {
            row.insert("tampilan_pasal".into(), json!(v));
        }
        if let Some(v) = &self.tanggal_berlaku {
            row.insert("tanggal_berlaku".into(), json!(v));
        }
        serde_json::Value::Object(row)
    }
}

impl SupabaseClient {
    /// All devotional posts, ordered by effective date (not creation time).
    pub async fn list_shalom(&self) -> Result<Vec<Shalom>> {
        let rows = self.select(TABLE, "tanggal_berlaku.desc").await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).context("shalom row malformed"))
            .collect()
    }

    pub async fn insert_shalom(&self, input: &ShalomInput) -> Result<Shalom> {
        let row = json!({
            "kategori": input.kategori,
            "judul": input.judul,
            "ayat_alkitab": input.ayat_alkitab,
            "tampilan_pasal": input.tampilan_pasal,
            "tanggal_berlaku": input.tanggal_berlaku,
        });
        let created = self.insert(TABLE, &row).await?;
        serde_json::from_value(created).context("shalom row malformed")
    }

    pub async fn update_shalom(&self, id: Uuid, patch: &ShalomPatch) -> Result<Option<Shalom>> {
        let updated = self.update(TABLE, id, &patch.to_row()).await?;
        updated
            .map(|row| serde_json::from_value(row).context("shalom row malformed"))
            .transpose()
    }

    pub async fn delete_shalom(&self, id: Uuid) -> Result<bool> {
        self.delete(TABLE, id).await
    }
}
