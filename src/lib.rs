pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod report;
pub mod state;

use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::state::ClinicState;

/// Startup failures, reported by `main` before exiting.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Database(#[from] db::DatabaseError),
    #[error("{0}")]
    Server(String),
}

/// Install the global tracing subscriber (`RUST_LOG`, else the default filter).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}

/// Resolve configuration, prepare storage, then serve until Ctrl-C.
pub async fn run() -> Result<(), StartupError> {
    init_tracing();
    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let config = Config::from_env()?;
    tracing::info!(
        database = %config.database_path.display(),
        bind = %config.bind_addr,
        seed_demo_data = config.seed_demo_data,
        "Configuration loaded"
    );

    let state = ClinicState::new(config);
    state.prepare_storage()?;

    let bind_addr = state.config().bind_addr;
    let mut server = api::start_server_on(state, bind_addr)
        .await
        .map_err(StartupError::Server)?;
    tracing::info!("Open http://{} in your browser", server.addr);

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Cannot listen for Ctrl-C: {e}");
    }
    server.shutdown();
    server.stopped().await;
    Ok(())
}
