use super::schemas::Config;
/// Configuration utilities - loading, environment overrides and access helpers
///
/// This module provides utility functions for working with the configuration system:
/// - Loading configuration from disk
/// - Overriding secrets from the environment (`.env` supported via dotenv)
/// - Thread-safe access helpers
use once_cell::sync::OnceCell;
use std::path::Path;
use std::sync::RwLock;

/// Global configuration instance
///
/// This is the single source of truth for all configuration values.
/// Access it using the helper functions below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Load configuration from a specific file path and initialize the global CONFIG
///
/// If the file doesn't exist, default values from the schema definitions are
/// used. Environment variables are applied on top in both cases.
///
/// # Returns
/// - `Ok(())` - Configuration loaded successfully
/// - `Err(String)` - Error message if loading failed
pub fn load_config_from_path(path: &Path) -> Result<(), String> {
    let mut config = read_config_file(path)?;
    apply_env_overrides(&mut config);

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    Ok(())
}

/// Parse a TOML config file, falling back to defaults when it does not exist
pub fn read_config_file(path: &Path) -> Result<Config, String> {
    if !path.exists() {
        eprintln!(
            "⚠️  Config file '{}' not found, using default values",
            path.display()
        );
        return Ok(Config::default());
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

    toml::from_str::<Config>(&contents)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
}

/// Apply overrides from process environment variables
pub fn apply_env_overrides(config: &mut Config) {
    apply_env_overrides_with(config, |key| std::env::var(key).ok());
}

/// Apply overrides using a custom variable lookup
///
/// Empty values are ignored so an unset `.env` entry never wipes a value
/// coming from the config file.
pub fn apply_env_overrides_with<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get("TELEGRAM_BOT_TOKEN") {
        config.telegram.bot_token = v;
    }
    if let Some(v) = get("MONGO_URI") {
        config.database.uri = v;
    }
    if let Some(v) = get("MONGO_DB") {
        config.database.database = v;
    }
    if let Some(v) = get("MONGO_COL_WALLETS") {
        config.database.wallets_collection = v;
    }
    if let Some(v) = get("MONGO_COL_TOKENS") {
        config.database.tokens_collection = v;
    }
    if let Some(v) = get("MONGO_COL_LIQUIDITIES") {
        config.database.liquidities_collection = v;
    }
    if let Some(v) = get("SOLANA_RPC_URL") {
        config.solana.rpc_url = v;
    }
    if let Some(v) = get("PIN_API_KEY") {
        config.pinata.api_key = v;
        config.pinata.enabled = true;
    }
    if let Some(v) = get("PIN_SECRET_KEY") {
        config.pinata.secret_key = v;
    }
}

/// Execute a function with read access to the configuration
///
/// This is the recommended way to read configuration values.
///
/// # Example
/// ```ignore
/// let cluster = with_config(|cfg| cfg.solana.cluster.clone());
/// ```
pub fn with_config<F, R>(f: F) -> R
where
    F: FnOnce(&Config) -> R,
{
    let config_lock = CONFIG
        .get()
        .expect("Config not initialized. Call load_config_from_path() first.");

    let config = config_lock
        .read()
        .expect("Failed to acquire config read lock");

    f(&config)
}

/// Serialize `config` to `path`
pub fn save_config(config: &Config, path: &Path) -> Result<(), String> {
    let config_str = toml::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(path, config_str)
        .map_err(|e| format!("Failed to write config file '{}': {}", path.display(), e))?;

    Ok(())
}

/// `--write-config`: rewrite the file with every key filled in
///
/// Only file values and defaults are written. Secrets coming from the
/// environment stay out of the file.
pub fn write_config_template(path: &Path) -> Result<(), String> {
    let config = read_config_file(path)?;
    save_config(&config, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[telegram]"));
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[liquidity]"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("TELEGRAM_BOT_TOKEN", "1:token"),
            ("MONGO_URI", "mongodb://db:27017"),
            ("MONGO_COL_TOKENS", "my_tokens"),
            ("PIN_API_KEY", "key"),
            ("PIN_SECRET_KEY", "secret"),
            ("MONGO_DB", "   "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        apply_env_overrides_with(&mut config, |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.telegram.bot_token, "1:token");
        assert_eq!(config.database.uri, "mongodb://db:27017");
        assert_eq!(config.database.tokens_collection, "my_tokens");
        // Blank values never override
        assert_eq!(config.database.database, "ziptos");
        assert!(config.pinata.enabled);
        assert_eq!(config.pinata.secret_key, "secret");
    }

    #[test]
    fn test_read_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read_config_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.database.backend, "mongo");
    }

    #[test]
    fn test_write_config_template_skips_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[telegram]\nsupport_contact = \"@desk\"\n").unwrap();
        std::env::set_var("PIN_SECRET_KEY", "env-only-secret");

        write_config_template(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("env-only-secret"));
        assert!(written.contains("[liquidity]"));
        let config = read_config_file(&path).unwrap();
        assert_eq!(config.telegram.support_contact, "@desk");
        assert!(config.pinata.secret_key.is_empty());
    }

    #[test]
    fn test_read_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[telegram\nbot_token = ").unwrap();
        assert!(read_config_file(&path).is_err());
    }
}
