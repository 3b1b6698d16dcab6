use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Endpoint of the optional IP-to-city lookup service. None disables
    /// city pre-fill entirely.
    pub geo_endpoint: Option<String>,
    /// How many palette styles to render on top of the base variants.
    pub announce_style_count: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            geo_endpoint: std::env::var("GEO_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty()),
            announce_style_count: std::env::var("ANNOUNCE_STYLE_COUNT")
                .unwrap_or_else(|_| "2".to_string())
                .parse::<usize>()
                .context("ANNOUNCE_STYLE_COUNT must be a non-negative integer")?,
        })
    }
}
