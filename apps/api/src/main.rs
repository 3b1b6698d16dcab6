mod announce;
mod config;
mod detect;
mod errors;
mod extract;
mod geo;
mod handlers;
mod intent;
mod interpret;
mod lexicon;
mod models;
mod routes;
mod state;
mod suggest;
mod text;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::geo::{GeoLookup, HttpGeoLookup, NoopGeoLookup};
use crate::lexicon::synonyms::SynonymTable;
use crate::lexicon::Lexicon;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let target = env!("CARGO_PKG_NAME").replace('-', "_");
            EnvFilter::new(format!("{}={}", target, &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TrouvExtra API v{}", env!("CARGO_PKG_VERSION"));

    // Static data first: a malformed catalog must abort startup, not
    // degrade detection silently.
    let lexicon = Arc::new(Lexicon::load()?);
    let synonyms = Arc::new(SynonymTable::build());
    info!(jobs = lexicon.entries().len(), "job lexicon loaded");

    let geo: Arc<dyn GeoLookup> = match &config.geo_endpoint {
        Some(endpoint) => {
            info!(%endpoint, "geo lookup enabled");
            Arc::new(HttpGeoLookup::new(endpoint.clone()))
        }
        None => Arc::new(NoopGeoLookup),
    };

    let state = AppState {
        lexicon,
        synonyms,
        geo,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
