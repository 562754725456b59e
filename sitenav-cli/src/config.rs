//! Environment-based configuration.
//!
//! Credentials live in `.env.local` next to where the tool is run, shared
//! with the web frontend. The service role key is required because the sync
//! job performs writes that the anon key is not allowed to.

use anyhow::{Context, Result};

const URL_VAR: &str = "NEXT_PUBLIC_SUPABASE_URL";
const KEY_VAR: &str = "SUPABASE_SERVICE_ROLE_KEY";

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Supabase project, without a trailing slash.
    pub base_url: String,
    /// Service role key, sent as both `apikey` and bearer token.
    pub service_role_key: String,
}

impl Config {
    pub fn new(base_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            service_role_key: service_role_key.into(),
        }
    }

    /// Load configuration from `.env.local` and the process environment.
    ///
    /// A missing `.env.local` is tolerated (the variables may already be
    /// exported); missing variables are not.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");

        let base_url = std::env::var(URL_VAR)
            .with_context(|| format!("missing environment variable {URL_VAR}"))?;
        let service_role_key = std::env::var(KEY_VAR)
            .with_context(|| format!("missing environment variable {KEY_VAR}"))?;

        Ok(Self::new(base_url, service_role_key))
    }
}
