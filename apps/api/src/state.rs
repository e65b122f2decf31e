use std::sync::Arc;

use crate::batch::BulkOrchestrator;
use crate::config::Config;
use crate::eligibility::EligibilityEngine;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    /// On-demand eligibility checks for single candidates. The batch runs
    /// hold their own reference through the orchestrator.
    pub eligibility: Arc<EligibilityEngine>,
    pub orchestrator: Arc<BulkOrchestrator>,
    pub config: Config,
}
