//! `sumrelay onboard` — create `~/.sumrelay/config.json` with defaults.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use sumrelay_core::config::{get_config_path, save_config, Config};

/// Run the onboard command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "Sumrelay — Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    let created = write_default_config(&config_path)?;
    if created {
        println!(
            "  {} created config at {}",
            "✓".green(),
            config_path.display()
        );
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!("{}", "  Next steps:".bold());
    println!("    1. Add API keys under providers.openai / providers.gemini");
    println!("       (or set OPENAI_API_KEY / GEMINI_API_KEY)");
    println!("    2. Run: sumrelay serve");
    println!();

    Ok(())
}

/// Write a default config unless one exists. Returns whether a file was written.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config: {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        assert!(write_default_config(&path).unwrap());
        assert!(path.exists());

        std::fs::write(&path, "{\"server\":{\"port\":1234}}").unwrap();
        assert!(!write_default_config(&path).unwrap());
        // Existing file untouched
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("1234"));
    }
}
