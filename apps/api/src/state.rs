use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::Config;
use crate::places::{Geocoder, PlacesClient};
use crate::proposal::catalog::ServiceCatalog;
use crate::proposal::store::DraftStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Places API proxy for autocomplete, text search and place details.
    pub places: PlacesClient,
    /// Address-to-coordinates lookup used by the distance estimator. Production
    /// wires the Places client in here.
    pub geocoder: Arc<dyn Geocoder>,
    pub catalog: Arc<RwLock<ServiceCatalog>>,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new(config: Config, places: PlacesClient, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            config,
            places,
            geocoder,
            catalog: Arc::new(RwLock::new(ServiceCatalog::seeded())),
            drafts: DraftStore::new(),
        }
    }
}
