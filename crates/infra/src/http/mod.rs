//! Shared HTTP transport

pub mod client;

use url::Url;
use timebot_domain::{Result, TimebotError};

pub use client::{HttpClient, HttpClientBuilder};

/// Parse `raw` as a base URL that relative paths can be joined onto
pub fn base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| TimebotError::Config(format!("Invalid base URL {raw:?}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
