//! Table operations over the backend's REST conventions (PostgREST).
//!
//! Filters are passed as query-string entries (`id=eq.<uuid>`), writes ask
//! for `return=representation` so the affected rows come back in the
//! response body.

use anyhow::{anyhow, Context, Result};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use uuid::Uuid;

use crate::SupabaseClient;

impl SupabaseClient {
    pub(crate) fn rest_url(&self, table: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).context("invalid backend URL")?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("backend URL cannot be a base"))?
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    pub(crate) fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    async fn expect_rows(resp: reqwest::Response, op: &str, table: &str) -> Result<Vec<Value>> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("{op} {table} failed ({status}): {body}");
        }
        resp.json::<Vec<Value>>()
            .await
            .with_context(|| format!("{op} {table}: malformed response"))
    }

    /// Fetch all rows of `table`, ordered by the given `column.direction`
    /// order expression.
    pub async fn select(&self, table: &str, order: &str) -> Result<Vec<Value>> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", order);

        let resp = self
            .authed(self.http.get(url))
            .send()
            .await
            .with_context(|| format!("select {table} request failed"))?;
        Self::expect_rows(resp, "select", table).await
    }

    /// Insert one row, returning it as created by the backend.
    pub async fn insert(&self, table: &str, row: &Value) -> Result<Value> {
        let url = self.rest_url(table)?;
        let resp = self
            .authed(self.http.post(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .with_context(|| format!("insert {table} request failed"))?;

        let mut rows = Self::expect_rows(resp, "insert", table).await?;
        rows.pop()
            .ok_or_else(|| anyhow!("insert {table}: no row returned"))
    }

    /// Insert-or-overwrite on a unique column.
    pub async fn upsert_on(&self, table: &str, on_conflict: &str, row: &Value) -> Result<Value> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut().append_pair("on_conflict", on_conflict);

        let resp = self
            .authed(self.http.post(url))
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(row)
            .send()
            .await
            .with_context(|| format!("upsert {table} request failed"))?;

        let mut rows = Self::expect_rows(resp, "upsert", table).await?;
        rows.pop()
            .ok_or_else(|| anyhow!("upsert {table}: no row returned"))
    }

    /// Patch the row with the given id. `Ok(None)` when no row matched.
    pub async fn update(&self, table: &str, id: Uuid, patch: &Value) -> Result<Option<Value>> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let resp = self
            .authed(self.http.patch(url))
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await
            .with_context(|| format!("update {table} request failed"))?;

        let mut rows = Self::expect_rows(resp, "update", table).await?;
        Ok(rows.pop())
    }

    /// Delete the row with the given id, returning it. `Ok(None)` when no
    /// row matched.
    pub async fn delete_returning(&self, table: &str, id: Uuid) -> Result<Option<Value>> {
        let mut url = self.rest_url(table)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        let resp = self
            .authed(self.http.delete(url))
            .header("Prefer", "return=representation")
            .send()
            .await
            .with_context(|| format!("delete {table} request failed"))?;

        let mut rows = Self::expect_rows(resp, "delete", table).await?;
        Ok(rows.pop())
    }

    /// Delete the row with the given id. `false` when no row matched.
    pub async fn delete(&self, table: &str, id: Uuid) -> Result<bool> {
        Ok(self.delete_returning(table, id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use crate::SupabaseClient;

    #[test]
    fn rest_url_targets_table_endpoint() {
        let client = SupabaseClient::new("https://abc.supabase.co/", "key");
        let url = client.rest_url("artikel").expect("url");
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/artikel");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = SupabaseClient::new("https://abc.supabase.co///", "key");
        assert_eq!(client.base_url(), "https://abc.supabase.co");
    }
}
