//! Shared handler state.

use std::sync::Arc;

use civic_auth::TokenVerifier;
use civic_db::service::CivicService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CivicService>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    #[must_use]
    pub fn new(store: CivicService, verifier: TokenVerifier) -> Self {
        Self {
            store: Arc::new(store),
            verifier: Arc::new(verifier),
        }
    }
}
