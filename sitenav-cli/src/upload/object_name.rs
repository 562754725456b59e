//! Filename-to-identity mapping for uploaded images.
//!
//! The file stem links a local image to a site row by title. The bucket
//! object name prefers the site's registrable domain label (stable and
//! human-readable); when the site has no parsable URL the name falls back
//! to an md5 of the original filename so unrelated files cannot collide.

use md5::{Digest, Md5};
use std::path::Path;

/// Filename without its extension; the lookup key for the site title.
pub fn title_from_filename(filename: &str) -> String {
    Path::new(filename)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Original extension including the dot, or "" when there is none.
fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default()
}

/// Second-level label of the URL's registrable domain.
///
/// `https://www.example.co.uk/page` yields `example`. Returns None for
/// empty input, unparsable URLs, IP hosts, and hosts without a public
/// suffix.
pub fn extract_domain_label(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url.trim()).ok()?;
    let host = match parsed.host() {
        Some(url::Host::Domain(host)) => host.to_string(),
        _ => return None,
    };
    let domain = psl::domain(host.as_bytes())?;
    // hosts like "localhost" or made-up TLDs still parse; require a real
    // public suffix before trusting the label
    if !domain.suffix().is_known() {
        return None;
    }
    let registrable = std::str::from_utf8(domain.as_bytes()).ok()?;
    let label = registrable.split('.').next()?;
    if label.is_empty() {
        return None;
    }
    Some(label.to_ascii_lowercase())
}

/// Bucket object name for an image: `<domain label><ext>` when the site URL
/// yields one, otherwise `<md5 of filename><ext>`.
pub fn object_name_for(site_url: &str, filename: &str) -> String {
    let ext = extension_of(filename);
    match extract_domain_label(site_url) {
        Some(label) => format!("{label}{ext}"),
        None => {
            let digest = Md5::digest(filename.as_bytes());
            format!("{}{ext}", hex::encode(digest))
        }
    }
}

/// MIME type from the file extension; generic binary when unrecognized.
pub fn content_type_for(filename: &str) -> String {
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
