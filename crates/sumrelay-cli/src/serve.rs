//! `sumrelay serve` — load config once, then run the relay until Ctrl+C.

use anyhow::Result;
use tracing::{info, warn};

use sumrelay_core::config::{load_config, Config};

use crate::helpers;

/// Run the relay.
pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = apply_cli_overrides(load_config(None), host, port);

    helpers::print_banner();
    println!("  Listening: http://{}", config.server.bind_addr());
    println!(
        "  Providers: {}",
        helpers::availability_line(&config.providers)
    );
    println!();
    println!("  Ctrl+C to stop");
    println!();

    sumrelay_server::serve(&config, shutdown_signal()).await?;

    println!("  Relay stopped. Goodbye!");
    Ok(())
}

/// Command-line flags win over file and env.
fn apply_cli_overrides(mut config: Config, host: Option<String>, port: Option<u16>) -> Config {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            println!();
            println!("  Shutting down...");
            info!("received Ctrl+C, shutting down");
        }
        Err(e) => {
            // Without a signal handler, run until killed
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
