//! PostgREST operations on the `sites` table.

use anyhow::{Context, Result, bail};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde_json::Value;

use super::models::{Site, SiteRef};
use super::SITES_TABLE;
use crate::config::Config;

pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
}

impl SupabaseClient {
    /// Build a client with the service role key attached to every request.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.service_role_key))
            .context("service role key contains invalid header characters")?;
        auth.set_sensitive(true);
        let mut apikey = HeaderValue::from_str(&config.service_role_key)
            .context("service role key contains invalid header characters")?;
        apikey.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert("apikey", apikey);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, SITES_TABLE)
    }

    /// Select rows matching a title exactly, projecting the given columns.
    pub async fn find_sites_by_title(&self, title: &str, columns: &str) -> Result<Vec<SiteRef>> {
        let filter = format!("eq.{title}");
        let response = self
            .http
            .get(self.table_url())
            .query(&[("select", columns), ("title", filter.as_str())])
            .send()
            .await
            .with_context(|| format!("select on '{SITES_TABLE}' failed for title '{title}'"))?;

        let response = check_status(response, "select").await?;
        let rows: Vec<SiteRef> = response
            .json()
            .await
            .context("failed to decode select response")?;
        Ok(rows)
    }

    /// Insert one row.
    pub async fn insert_site(&self, site: &Site) -> Result<()> {
        let response = self
            .http
            .post(self.table_url())
            .header("Prefer", "return=minimal")
            .json(site)
            .send()
            .await
            .with_context(|| format!("insert into '{SITES_TABLE}' failed"))?;

        check_status(response, "insert").await?;
        Ok(())
    }

    /// Patch fields on every row matching the title.
    pub async fn update_site(&self, title: &str, data: &Value) -> Result<()> {
        let response = self
            .http
            .patch(self.table_url())
            .query(&[("title", &format!("eq.{title}"))])
            .header("Prefer", "return=minimal")
            .json(data)
            .send()
            .await
            .with_context(|| format!("update on '{SITES_TABLE}' failed for title '{title}'"))?;

        check_status(response, "update").await?;
        Ok(())
    }

    /// Delete every row matching the title. Succeeds when nothing matches.
    pub async fn delete_site(&self, title: &str) -> Result<()> {
        let response = self
            .http
            .delete(self.table_url())
            .query(&[("title", &format!("eq.{title}"))])
            .send()
            .await
            .with_context(|| format!("delete on '{SITES_TABLE}' failed for title '{title}'"))?;

        check_status(response, "delete").await?;
        Ok(())
    }
}

/// Map a non-2xx response to an error carrying status and body text.
pub(crate) async fn check_status(
    response: reqwest::Response,
    action: &str,
) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    bail!("{action} rejected by remote ({status}): {body}");
}
