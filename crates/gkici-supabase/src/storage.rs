//! Object storage operations: upload (optionally upsert), bucket listing,
//! public URL derivation.

use anyhow::{anyhow, Context, Result};
use reqwest::Url;
use serde::Deserialize;
use serde_json::json;

use crate::SupabaseClient;

/// One object as returned by the bucket listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageObject {
    pub name: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl SupabaseClient {
    /// Build a storage URL; `kind` is the sub-resource ("", "public", "list").
    /// Path segments are pushed one by one so names with spaces end up
    /// percent-encoded.
    fn storage_url(&self, kind: &str, bucket: &str, path: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("invalid backend URL")?;
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| anyhow!("backend URL cannot be a base"))?;
            segments.extend(["storage", "v1", "object"]);
            if !kind.is_empty() {
                segments.push(kind);
            }
            segments.push(bucket);
            if !path.is_empty() {
                segments.extend(path.split('/'));
            }
        }
        Ok(url)
    }

    /// Upload `bytes` to `bucket/path`. With `upsert` the same path is
    /// overwritten instead of erroring on conflict.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<()> {
        let url = self.storage_url("", bucket, path)?;
        let mut req = self
            .authed(self.http.post(url))
            .header("Content-Type", content_type)
            .body(bytes);
        if upsert {
            req = req.header("x-upsert", "true");
        }

        tracing::debug!(bucket, path, upsert, "uploading object");
        let resp = req
            .send()
            .await
            .with_context(|| format!("upload to {bucket}/{path} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("upload to {bucket}/{path} failed ({status}): {body}");
        }
        Ok(())
    }

    /// List the objects under `prefix` in `bucket`.
    pub async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<Vec<StorageObject>> {
        let url = self.storage_url("list", bucket, "")?;
        let resp = self
            .authed(self.http.post(url))
            .json(&json!({
                "prefix": prefix,
                "limit": 100,
                "sortBy": { "column": "name", "order": "asc" }
            }))
            .send()
            .await
            .with_context(|| format!("list {bucket}/{prefix} failed"))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("list {bucket}/{prefix} failed ({status}): {body}");
        }
        resp.json::<Vec<StorageObject>>()
            .await
            .context("list response malformed")
    }

    /// Remove one object from a bucket.
    pub async fn remove_object(&self, bucket: &str, path: &str) -> Result<()> {
        let url = self.storage_url("", bucket, path)?;
        let resp = self
            .authed(self.http.delete(url))
            .send()
            .await
            .with_context(|| format!("remove {bucket}/{path} failed"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("remove {bucket}/{path} failed ({status}): {body}");
        }
        Ok(())
    }

    /// Public URL for an object in a public bucket. Purely derived, no
    /// request is made.
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        Ok(self.storage_url("public", bucket, path)?.to_string())
    }
}
