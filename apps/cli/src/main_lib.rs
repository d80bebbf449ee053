use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use finfolio_connect::{ApiClient, HoldingsService, HoldingsServiceTrait, SessionManager};

use crate::config::Config;
use crate::credentials::FileCredentialStore;

/// Everything a command needs, wired once at startup.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub client: Arc<ApiClient>,
    pub holdings: Arc<dyn HoldingsServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("FINFOLIO_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so tables and JSON output stay pipeable.
    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

pub fn build_context(config: &Config) -> anyhow::Result<AppContext> {
    tracing::debug!(
        "Using API at {} (data dir {})",
        config.api_url,
        config.data_dir.display()
    );
    let store = Arc::new(FileCredentialStore::new(config.credentials_path()));
    let session = Arc::new(SessionManager::new(store));

    // The session manager doubles as the invalidation handler: a 401 from
    // any session-gated endpoint drops the persisted credential.
    let client = Arc::new(ApiClient::new(
        &config.api_url,
        session.clone(),
        session.clone(),
    )?);
    let holdings: Arc<dyn HoldingsServiceTrait + Send + Sync> =
        Arc::new(HoldingsService::new(client.clone()));

    Ok(AppContext {
        session,
        client,
        holdings,
    })
}
