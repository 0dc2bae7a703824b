use std::sync::Arc;

use crate::config::Config;
use crate::gate::AnalysisGate;
use crate::profile_client::AnalysisService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Upstream analysis backend. `ProfileClient` in production.
    pub analysis: Arc<dyn AnalysisService>,
    pub gate: AnalysisGate,
}

impl AppState {
    pub fn new(config: Config, analysis: Arc<dyn AnalysisService>) -> Self {
        let gate = AnalysisGate::new(config.max_concurrent_analyses);
        Self {
            config,
            analysis,
            gate,
        }
    }
}
