use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{router, AppState, RestConfig};
use aurum_core::config::{path_from_env_value, resolve_knowledge_base};
use aurum_core::constants::DEFAULT_REST_ADDR;
use aurum_core::InteractionService;

/// Main entry point for the AurumRx application
///
/// Loads the interaction knowledge base once and serves the REST API on port 3000
/// (configurable via AURUM_REST_ADDR).
///
/// # Environment Variables
/// - `AURUM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `AURUM_KNOWLEDGE_BASE`: YAML file replacing the built-in interaction table
/// - `AURUM_RESPONSE_DELAY_MS`: artificial latency before each analysis (default: 0)
/// - `AURUM_REQUEST_TIMEOUT_SECS`: per-request timeout (default: 10)
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If configuration is invalid or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("aurum=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr: SocketAddr = std::env::var("AURUM_REST_ADDR")
        .unwrap_or_else(|_| DEFAULT_REST_ADDR.into())
        .parse()?;

    let knowledge_base =
        resolve_knowledge_base(path_from_env_value(std::env::var("AURUM_KNOWLEDGE_BASE").ok()))?;
    let config = RestConfig::from_env_values(
        std::env::var("AURUM_RESPONSE_DELAY_MS").ok(),
        std::env::var("AURUM_REQUEST_TIMEOUT_SECS").ok(),
    )?;

    tracing::info!(
        "++ Starting AurumRx REST on {} ({} interaction records, delay {:?}, timeout {:?})",
        rest_addr,
        knowledge_base.len(),
        config.response_delay,
        config.request_timeout
    );

    let interaction_service = InteractionService::new(Arc::new(knowledge_base));
    let app = router(AppState::new(interaction_service, config));

    let listener = tokio::net::TcpListener::bind(rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
