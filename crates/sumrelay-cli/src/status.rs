//! `sumrelay status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use sumrelay_core::config::{get_config_path, load_config, Config};
use sumrelay_core::types::ProviderKind;
use sumrelay_core::utils::mask_secret;
use sumrelay_providers::{gemini, openai};

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Sumrelay Status".cyan().bold());
    println!();

    // Config
    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        if config_path.exists() {
            "✓".green().to_string()
        } else {
            "(not found)".red().to_string()
        }
    );

    println!("  {:<18} {}", "Listen:".bold(), config.server.bind_addr());
    println!(
        "  {:<18} {}",
        "Timeouts:".bold(),
        format!(
            "connect {}s | request {}s",
            config.http.connect_timeout_secs, config.http.request_timeout_secs
        )
        .dimmed()
    );

    // Providers
    println!();
    println!("  {}", "Providers:".bold());
    for kind in ProviderKind::ALL {
        println!("    {}", provider_line(&config, kind));
    }

    println!();

    Ok(())
}

fn default_model(kind: ProviderKind) -> &'static str {
    match kind {
        ProviderKind::OpenAi => openai::DEFAULT_MODEL,
        ProviderKind::Gemini => gemini::DEFAULT_MODEL,
    }
}

fn provider_line(config: &Config, kind: ProviderKind) -> String {
    let provider = config.providers.get(kind);
    let model = provider.model.as_deref().unwrap_or(default_model(kind));
    let status = if provider.is_configured() {
        format!("{} (key {})", "✓".green(), mask_secret(&provider.api_key))
    } else {
        format!("{}", "· not configured".dimmed())
    };
    format!("{:<10} {:<26} {}", kind.display_name(), model, status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_line_masks_key() {
        colored::control::set_override(false);
        let mut config = Config::default();
        config.providers.gemini.api_key = "AIza-abcdef-9876".to_string();

        let line = provider_line(&config, ProviderKind::Gemini);
        assert!(line.contains("gemini-1.5-flash-latest"));
        assert!(line.contains("****9876"));
        assert!(!line.contains("AIza-abcdef"));
    }

    #[test]
    fn test_provider_line_not_configured() {
        colored::control::set_override(false);
        let line = provider_line(&Config::default(), ProviderKind::OpenAi);
        assert!(line.contains("gpt-3.5-turbo"));
        assert!(line.contains("not configured"));
    }
}
