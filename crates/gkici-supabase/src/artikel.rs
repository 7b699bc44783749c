//! Article rows in the managed `artikel` table.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use gkici_core::content::{Artikel, ArtikelInput};

use crate::SupabaseClient;

const TABLE: &str = "artikel";

/// Fields an edit can change. Absent fields are left untouched;
/// `media_url` present-but-null clears the media.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtikelPatch {
    pub judul: Option<String>,
    pub penulis: Option<String>,
    pub ringkasan: Option<String>,
    pub isi: Option<String>,
    #[serde(default, with = "serde_with_double_option")]
    pub media_url: Option<Option<String>>,
}

impl ArtikelPatch {
    pub fn validate(&self) -> Result<(), String> {
        use gkici_core::content::{ISI_MAX, JUDUL_MAX, PENULIS_MAX, RINGKASAN_MAX};
        let limits = [
            (&self.judul, "judul", JUDUL_MAX),
            (&self.penulis, "penulis", PENULIS_MAX),
            (&self.ringkasan, "ringkasan", RINGKASAN_MAX),
            (&self.isi, "isi", ISI_MAX),
        ];
        for (value, field, max) in limits {
            if let Some(v) = value {
                if v.chars().count() > max {
                    return Err(format!("{field} maksimal {max} karakter"));
                }
            }
        }
        Ok(())
    }

    pub(crate) fn to_row(&self) -> serde_json::Value {
        let mut row = serde_json::Map::new();
        if let Some(v) = &self.judul {
            row.insert("judul".into(), json!(v));
        }
        if let Some(v) = &self.penulis {
            row.insert("penulis".into(), json!(v));
        }
        if let Some(v) = &self.ringkasan {
            row.insert("ringkasan".into(), json!(v));
        }
        if let Some(v) = &self.isi {
            row.insert("isi".into(), json!(v));
        }
        if let Some(v) = &self.media_url {
            row.insert("media_url".into(), json!(v));
        }
        serde_json::Value::Object(row)
    }
}

/// Distinguishes "field absent" from "field set to null" in patch bodies.
pub(crate) mod serde_with_double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

impl SupabaseClient {
    /// All articles, newest first.
    pub async fn list_artikel(&self) -> Result<Vec<Artikel>> {
        let rows = self.select(TABLE, "created_at.desc").await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).context("artikel row malformed"))
            .collect()
    }

    pub async fn insert_artikel(
        &self,
        input: &ArtikelInput,
        media_url: Option<String>,
    ) -> Result<Artikel> {
        let row = json!({
            "judul": input.judul,
            "penulis": input.penulis,
            "ringkasan": input.ringkasan,
            "isi": input.isi,
            "media_url": media_url,
        });
        let created = self.insert(TABLE, &row).await?;
        serde_json::from_value(created).context("artikel row malformed")
    }

    pub async fn update_artikel(&self, id: Uuid, patch: &ArtikelPatch) -> Result<Option<Artikel>> {
        let updated = self.update(TABLE, id, &patch.to_row()).await?;
        updated
            .map(|row| serde_json::from_value(row).context("artikel row malformed"))
            .transpose()
    }

    pub async fn delete_artikel(&self, id: Uuid) -> Result<bool> {
        self.delete(TABLE, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_row_only_carries_present_fields() {
        let patch: ArtikelPatch =
            serde_json::from_str(r#"{"judul":"Baru","media_url":null}"#).expect("patch");
        assert_eq!(
            patch.to_row(),
            json!({ "judul": "Baru", "media_url": null })
        );
    }

    #[test]
    fn absent_media_url_is_not_cleared() {
        let patch: ArtikelPatch = serde_json::from_str(r#"{"isi":"..."}"#).expect("patch");
        assert_eq!(patch.to_row(), json!({ "isi": "..." }));
    }

    #[test]
    fn patch_enforces_field_limits() {
        let patch = ArtikelPatch {
            judul: Some("j".repeat(101)),
            ..ArtikelPatch::default()
        };
        assert!(patch.validate().is_err());
    }
}
