//! Supabase REST + Storage client.
//!
//! Thin wrapper over reqwest speaking PostgREST conventions for the `sites`
//! table and the storage object API for the image bucket. One client is
//! created per run; all calls are awaited sequentially.

pub mod client;
pub mod models;
pub mod storage;
#[cfg(test)]
pub mod stub;

pub use client::SupabaseClient;
pub use models::{Site, SiteRef};

/// Remote table holding one row per cataloged website.
pub const SITES_TABLE: &str = "sites";

/// Storage bucket holding uploaded site images.
pub const IMAGES_BUCKET: &str = "site-images";
