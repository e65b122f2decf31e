mod batch;
mod config;
mod db;
mod documents;
mod eligibility;
mod errors;
mod llm_client;
mod models;
mod quality;
mod routes;
mod scoring;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::batch::{BatchConfig, BulkOrchestrator};
use crate::config::Config;
use crate::db::create_pool;
use crate::documents::extraction::{DocumentTextSource, FsTextSource};
use crate::eligibility::{EligibilityConfig, EligibilityEngine};
use crate::llm_client::LlmClient;
use crate::quality::llm::LlmQualityScorer;
use crate::quality::rules::RuleBasedQualityScorer;
use crate::quality::{QualityScorer, TieredQualityScorer};
use crate::routes::build_router;
use crate::scoring::llm::LlmMatchScorer;
use crate::scoring::rules::{MatchConfig, RuleBasedMatchScorer};
use crate::scoring::{MatchScorer, TieredMatchScorer};
use crate::state::AppState;
use crate::store::postgres::PgStore;
use crate::store::Store;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GradBridge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and the store seam
    let pool = create_pool(&config.database_url).await?;
    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));

    // Initialize the LLM client when credentials exist; otherwise every
    // scoring engine runs its rule-based tier only.
    let llm = config.anthropic_api_key.clone().map(LlmClient::new);
    match &llm {
        Some(_) => info!("LLM client initialized (model: {})", llm_client::MODEL),
        None => warn!("ANTHROPIC_API_KEY not set — remote scoring tier disabled"),
    }

    // Engines: explicit immutable config in, trait objects out.
    let eligibility = Arc::new(EligibilityEngine::new(EligibilityConfig::default()));

    let remote_match: Option<Arc<dyn MatchScorer>> = llm
        .clone()
        .map(|client| Arc::new(LlmMatchScorer::new(client)) as Arc<dyn MatchScorer>);
    let match_scorer: Arc<dyn MatchScorer> = Arc::new(TieredMatchScorer::new(
        remote_match,
        RuleBasedMatchScorer::new(MatchConfig::default()),
    ));

    let remote_quality: Option<Arc<dyn QualityScorer>> = llm
        .clone()
        .map(|client| Arc::new(LlmQualityScorer::new(client)) as Arc<dyn QualityScorer>);
    let quality_scorer: Arc<dyn QualityScorer> = Arc::new(TieredQualityScorer::new(
        remote_quality,
        RuleBasedQualityScorer::new(),
    ));

    let text_source: Arc<dyn DocumentTextSource> =
        Arc::new(FsTextSource::new(&config.document_text_dir));

    let orchestrator = Arc::new(BulkOrchestrator::new(
        store.clone(),
        eligibility.clone(),
        match_scorer,
        quality_scorer,
        text_source,
        llm,
        BatchConfig::default(),
    ));

    // Build app state
    let state = AppState {
        store,
        eligibility,
        orchestrator,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
