//! Weekly bulletin ("warta jemaat") uploads and listing.
//!
//! The PDF goes to object storage under a name derived from the publication
//! date; one bulletin per date, re-uploads overwrite. The date is also
//! stored on a `warta` table row so listing sorts on a real column instead
//! of re-parsing the display name.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use gkici_core::content::{
    warta_file_name, warta_object_path, Warta, LITURGI_NAME, LITURGI_PATH, WARTA_BUCKET,
};

use crate::SupabaseClient;

const TABLE: &str = "warta";

/// One downloadable document as shown on the download page.
#[derive(Debug, Clone, Serialize)]
pub struct WartaEntry {
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_on: Option<NaiveDate>,
}

impl SupabaseClient {
    /// Store the bulletin PDF for `published_on` and upsert its record.
    pub async fn upload_warta(&self, pdf: Vec<u8>, published_on: NaiveDate) -> Result<Warta> {
        let path = warta_object_path(published_on);
        self.upload_object(WARTA_BUCKET, &path, pdf, "application/pdf", true)
            .await?;

        let row = json!({
            "name": warta_file_name(published_on),
            "path": path,
            "published_on": published_on,
        });
        let stored = self.upsert_on(TABLE, "published_on", &row).await?;
        serde_json::from_value(stored).context("warta row malformed")
    }

    /// Download page entries: the standing liturgy document first, then
    /// bulletins newest first.
    pub async fn list_warta(&self) -> Result<Vec<WartaEntry>> {
        let mut entries = vec![WartaEntry {
            name: LITURGI_NAME.to_string(),
            url: self.public_url(WARTA_BUCKET, LITURGI_PATH)?,
            published_on: None,
        }];

        let rows = self.select(TABLE, "published_on.desc").await?;
        for row in rows {
            let warta: Warta = serde_json::from_value(row).context("warta row malformed")?;
            entries.push(WartaEntry {
                name: warta.name.trim_end_matches(".pdf").to_string(),
                url: self.public_url(WARTA_BUCKET, &warta.path)?,
                published_on: Some(warta.published_on),
            });
        }
        Ok(entries)
    }

    /// Delete a bulletin record and its stored PDF. `false` when no record
    /// matched. A record whose object is already gone still deletes cleanly.
    pub async fn delete_warta(&self, id: uuid::Uuid) -> Result<bool> {
        let Some(row) = self.delete_returning(TABLE, id).await? else {
            return Ok(false);
        };
        let warta: Warta = serde_json::from_value(row).context("warta row malformed")?;
        if let Err(e) = self.remove_object(WARTA_BUCKET, &warta.path).await {
            tracing::warn!(path = %warta.path, error = %e, "bulletin object removal failed");
        }
        Ok(true)
    }
}
