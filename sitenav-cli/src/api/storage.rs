//! Storage bucket operations.

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;

use super::client::{SupabaseClient, check_status};

impl SupabaseClient {
    /// Upload an object in overwrite mode. Re-uploading the same object name
    /// replaces its content.
    pub async fn upload_object(
        &self,
        bucket: &str,
        object: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url(),
            bucket,
            urlencoding::encode(object)
        );

        let response = self
            .http()
            .post(&url)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .with_context(|| format!("upload of '{object}' to bucket '{bucket}' failed"))?;

        check_status(response, "upload").await?;
        Ok(())
    }

    /// Public URL for an object. Built locally; the bucket must be public
    /// for the link to resolve.
    pub fn public_url(&self, bucket: &str, object: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url(),
            bucket,
            urlencoding::encode(object)
        )
    }
}
