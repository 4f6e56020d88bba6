//! Path utilities for plateful.
//!
//! All data lives under `~/.plateful/`:
//! - `~/.plateful/config.toml` - main configuration
//! - `~/.plateful/plateful.db` - marketplace database

use std::path::PathBuf;

/// Returns the plateful home directory (`~/.plateful/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".plateful")
}

/// Returns the default config file path (`~/.plateful/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.plateful/plateful.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("plateful.db")
}

/// Ensures the plateful home directory exists.
pub fn ensure_home_dir() -> std::io::Result<()> {
    std::fs::create_dir_all(home_dir())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_plateful_home() {
        let home = home_dir();
        let config = default_config();
        let db = default_database();

        assert!(home.to_string_lossy().contains(".plateful"));
        assert!(config.to_string_lossy().contains(".plateful"));
        assert!(db.to_string_lossy().contains(".plateful"));
    }
}
