//! Utility helpers — data paths and string shortening for logs.

use std::path::PathBuf;

/// Get the Sumrelay data directory (e.g. `~/.sumrelay/`).
pub fn get_data_path() -> PathBuf {
    let home = dirs_next::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".sumrelay")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// Mask a secret for display, keeping only the last four characters.
pub fn mask_secret(secret: &str) -> String {
    let count = secret.chars().count();
    if count <= 4 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(count - 4).collect();
    format!("****{tail}")
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
