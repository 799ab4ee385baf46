use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use anyhow::{Result, Context};
use lazy_static::lazy_static;
use std::sync::RwLock;

/// Account store configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StoreConfig {
    /// Path to the flat account record file
    pub accounts_path: String,
    /// Maximum number of accounts that may be created
    pub max_accounts: usize,
}

/// Transaction ledger configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    /// Path to the append-only transaction log file
    pub log_path: String,
}

/// Global application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Application version
    pub version: String,
    /// Account store configuration
    pub store: StoreConfig,
    /// Transaction ledger configuration
    pub ledger: LedgerConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "Flat-File Banking CLI".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: StoreConfig {
                accounts_path: "data/accounts.dat".to_string(),
                max_accounts: 100,
            },
            ledger: LedgerConfig {
                log_path: "data/transactions.log".to_string(),
            },
        }
    }
}

// Global configuration instance
lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::default());
}

/// Load configuration from file
pub fn load_config(path: &str) -> Result<()> {
    // Check if file exists
    if !Path::new(path).exists() {
        // If not, create default config and save it
        let default_config = Config::default();
        save_config(path, &default_config)?;
        *CONFIG.write().unwrap() = default_config;
        return Ok(());
    }

    // Read the config file
    let mut file = File::open(path).context(format!("Failed to open config file: {}", path))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).context("Failed to read config file")?;

    // Parse the config file
    let config: Config = match path.ends_with(".toml") {
        true => toml::from_str(&contents).context("Failed to parse TOML config")?,
        false => serde_json::from_str(&contents).context("Failed to parse JSON config")?,
    };

    // Update the global config
    *CONFIG.write().unwrap() = config;

    Ok(())
}

/// Save configuration to file
pub fn save_config(path: &str, config: &Config) -> Result<()> {
    // Create parent directory if it doesn't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }
    }

    // Serialize the config
    let serialized = match path.ends_with(".toml") {
        true => toml::to_string_pretty(config).context("Failed to serialize config to TOML")?,
        false => serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?,
    };

    // Write to file
    std::fs::write(path, serialized).context(format!("Failed to write config to file: {}", path))?;

    Ok(())
}

/// Get a reference to the current config
pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}

/// Update the current config
pub fn update_config(config: Config) -> Result<()> {
    *CONFIG.write().unwrap() = config;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "Flat-File Banking CLI");
        assert_eq!(config.store.max_accounts, 100);
        assert_eq!(config.store.accounts_path, "data/accounts.dat");
        assert_eq!(config.ledger.log_path, "data/transactions.log");
    }

    #[test]
    fn test_load_save_config() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("test_config.toml");
        let config_path_str = config_path.to_str().unwrap();

        // Test saving default config
        let config = Config::default();
        save_config(config_path_str, &config).unwrap();

        // Test loading saved config
        load_config(config_path_str).unwrap();
        let loaded_config = get_config();

        assert_eq!(loaded_config.app_name, config.app_name);
        assert_eq!(loaded_config.store.max_accounts, config.store.max_accounts);
        assert_eq!(loaded_config.store.accounts_path, config.store.accounts_path);
        assert_eq!(loaded_config.ledger.log_path, config.ledger.log_path);
    }
}
