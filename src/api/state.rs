use std::sync::Arc;

use crate::{catalog::Catalog, services::providers::MetadataProvider};

/// Shared application state
///
/// Everything here is read-only after startup; cloning only bumps the
/// reference counts.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub provider: Arc<dyn MetadataProvider>,
    /// Similar movies returned per request
    pub recommendation_count: usize,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        provider: Arc<dyn MetadataProvider>,
        recommendation_count: usize,
    ) -> Self {
        Self {
            catalog,
            provider,
            recommendation_count,
        }
    }
}
