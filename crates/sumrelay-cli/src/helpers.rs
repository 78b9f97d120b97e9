//! Shared CLI helpers — banner and provider status formatting.

use colored::Colorize;

use sumrelay_core::config::ProvidersConfig;
use sumrelay_core::types::ProviderKind;

/// Print the banner shown when the relay starts.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Sumrelay".cyan().bold(), version.dimmed());
    println!();
}

/// One-line provider summary, e.g. `OpenAI ✓, Gemini ✗`.
pub fn availability_line(providers: &ProvidersConfig) -> String {
    ProviderKind::ALL
        .into_iter()
        .map(|kind| {
            let mark = if providers.get(kind).is_configured() {
                "✓".green().to_string()
            } else {
                "✗".red().to_string()
            };
            format!("{} {}", kind.display_name(), mark)
        })
        .collect::<Vec<_>>()
        .join(", ")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
