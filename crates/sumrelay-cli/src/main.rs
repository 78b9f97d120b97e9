//! Sumrelay CLI — entry point.
//!
//! # Commands
//!
//! - `sumrelay serve [--host H] [--port P] [--logs]` — run the HTTP relay
//! - `sumrelay status` — show configuration and provider status
//! - `sumrelay onboard` — write a default config file

mod helpers;
mod onboard;
mod serve;
mod status;

use anyhow::Result;
use clap::{Parser, Subcommand};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Sumrelay — summarization relay for OpenAI and Gemini
#[derive(Parser)]
#[command(name = "sumrelay", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP relay (POST /summarize)
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Create the default configuration file
    Onboard,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port, logs } => {
            init_logging(logs);
            serve::run(host, port).await
        }
        Commands::Status => status::run(),
        Commands::Onboard => onboard::run(),
    }
}

/// Initialize tracing/logging. `RUST_LOG` takes precedence when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("sumrelay=debug,info")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from(["sumrelay", "serve", "--port", "8080", "--logs"]).unwrap();
        match cli.command {
            Commands::Serve { host, port, logs } => {
                assert_eq!(host, None);
                assert_eq!(port, Some(8080));
                assert!(logs);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert!(Cli::try_parse_from(["sumrelay", "serve", "--port", "99999"]).is_err());
    }
}
