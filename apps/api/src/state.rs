use std::sync::Arc;

use crate::config::Config;
use crate::geo::GeoLookup;
use crate::lexicon::synonyms::SynonymTable;
use crate::lexicon::Lexicon;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub lexicon: Arc<Lexicon>,
    pub synonyms: Arc<SynonymTable>,
    /// Pluggable city lookup. Default: NoopGeoLookup. Swap via GEO_ENDPOINT env.
    pub geo: Arc<dyn GeoLookup>,
    pub config: Config,
}
