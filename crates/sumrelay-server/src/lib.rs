//! Sumrelay HTTP relay — validation, dispatch, and error mapping.
//!
//! - [`dispatcher`] — validates bodies and routes to a provider adapter
//! - [`error`] — local error kinds and their HTTP statuses
//! - [`routes`] — the axum router for `POST /summarize`

pub mod dispatcher;
pub mod error;
pub mod routes;

pub use dispatcher::Dispatcher;
pub use error::{ErrorKind, RelayError};
pub use routes::{router, AppState};

use std::future::Future;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::info;

use sumrelay_core::config::Config;
use sumrelay_providers::ProviderRegistry;

/// Build the registry from `config`, bind, and serve until `shutdown` resolves.
pub async fn serve<F>(config: &Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let registry =
        ProviderRegistry::from_config(config).context("failed to build HTTP client")?;

    for (kind, configured) in registry.availability() {
        info!(
            provider = kind.as_str(),
            configured,
            "provider {}",
            if configured { "available" } else { "missing API key" }
        );
    }

    let app = router(AppState::new(Dispatcher::new(registry)));

    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %listener.local_addr()?, "relay listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    info!("relay stopped");
    Ok(())
}
