//! Geo-lookup collaborator — best-effort city resolution from the
//! client's network origin, used only to pre-fill a city the extractors
//! did not already find.
//!
//! A failed or slow lookup is never an error for the caller: every
//! failure path collapses to `None` and the flow continues without a
//! pre-filled city.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

const LOOKUP_TIMEOUT: Duration = Duration::from_secs(3);
/// Cache entries expire after this window; the collaborator owns the
/// cache and its expiry policy entirely.
const CACHE_TTL: Duration = Duration::from_secs(600);

/// Pluggable city lookup. Default: [`NoopGeoLookup`]. Swap to
/// [`HttpGeoLookup`] via the GEO_ENDPOINT env.
#[async_trait]
pub trait GeoLookup: Send + Sync {
    /// Resolves a client origin (IP) to a city name, or `None`.
    async fn city_for(&self, client_ip: &str) -> Option<String>;
}

/// Used when no endpoint is configured. Always resolves to nothing.
pub struct NoopGeoLookup;

#[async_trait]
impl GeoLookup for NoopGeoLookup {
    async fn city_for(&self, _client_ip: &str) -> Option<String> {
        None
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    city: Option<String>,
}

pub struct HttpGeoLookup {
    client: Client,
    endpoint: String,
    cache: Mutex<HashMap<String, (Instant, Option<String>)>>,
}

impl HttpGeoLookup {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            endpoint,
            cache: Mutex::new(HashMap::new()),
        }
    }

    fn cached(&self, client_ip: &str) -> Option<Option<String>> {
        let cache = self.cache.lock().ok()?;
        let (stored_at, city) = cache.get(client_ip)?;
        if stored_at.elapsed() > CACHE_TTL {
            return None;
        }
        Some(city.clone())
    }

    fn store(&self, client_ip: &str, city: Option<String>) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.retain(|_, (stored_at, _)| stored_at.elapsed() <= CACHE_TTL);
            cache.insert(client_ip.to_string(), (Instant::now(), city));
        }
    }
}

#[async_trait]
impl GeoLookup for HttpGeoLookup {
    async fn city_for(&self, client_ip: &str) -> Option<String> {
        if let Some(hit) = self.cached(client_ip) {
            debug!(client_ip, "geo cache hit");
            return hit;
        }

        let url = format!("{}/{}", self.endpoint.trim_end_matches('/'), client_ip);
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("geo lookup failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!(status = %response.status(), "geo lookup returned non-success");
            return None;
        }

        let city = match response.json::<GeoResponse>().await {
            Ok(body) => body.city.filter(|c| !c.trim().is_empty()),
            Err(e) => {
                warn!("geo response parse failed: {e}");
                None
            }
        };

        self.store(client_ip, city.clone());
        city
    }
}
