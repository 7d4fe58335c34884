use anyhow::{Context, Result};
use reqwest::Url;

/// Client configuration loaded from environment variables.
/// Fails at startup if the backend origin is missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin of the generation backend (`/api/...` paths are resolved against it).
    pub api_url: Url,
    /// Origin serving `/preview` and `/portfolio-preview`. Defaults to `api_url`.
    pub preview_url: Url,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = require_env("CAREERDESK_API_URL")?;
        let preview_url =
            std::env::var("CAREERDESK_PREVIEW_URL").unwrap_or_else(|_| api_url.clone());
        let rust_log = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self::from_parts(&api_url, &preview_url, rust_log)
    }

    pub fn from_parts(api_url: &str, preview_url: &str, rust_log: String) -> Result<Self> {
        Ok(Config {
            api_url: Url::parse(api_url)
                .with_context(|| format!("CAREERDESK_API_URL '{api_url}' is not a valid URL"))?,
            preview_url: Url::parse(preview_url).with_context(|| {
                format!("CAREERDESK_PREVIEW_URL '{preview_url}' is not a valid URL")
            })?,
            rust_log,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
