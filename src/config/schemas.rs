/// Configuration schemas - all config structures defined once with defaults
///
/// Each struct is defined using the config_struct! macro which provides
/// single-source definitions, embedded defaults and serde support.
use crate::config_struct;

// ============================================================================
// TELEGRAM CONFIGURATION
// ============================================================================

config_struct! {
    /// Telegram bot configuration
    pub struct TelegramConfig {
        /// Bot token from @BotFather (env: TELEGRAM_BOT_TOKEN)
        bot_token: String = String::new(),

        /// Register the /start, /help... command menu on startup
        register_commands: bool = true,

        /// Contact shown on the support page
        support_contact: String = "@ziptos_support".to_string(),

        /// Telegram Bot API base URL (used for file downloads)
        api_url: String = "https://api.telegram.org".to_string(),
    }
}

// ============================================================================
// DATABASE CONFIGURATION
// ============================================================================

config_struct! {
    /// Persistence configuration
    pub struct DatabaseConfig {
        /// Storage backend: "mongo" or "memory"
        backend: String = "mongo".to_string(),

        /// MongoDB connection string (env: MONGO_URI)
        uri: String = String::new(),

        /// Database name (env: MONGO_DB)
        database: String = "ziptos".to_string(),

        /// Collection names (env: MONGO_COL_WALLETS / MONGO_COL_TOKENS / MONGO_COL_LIQUIDITIES)
        wallets_collection: String = "wallets".to_string(),
        tokens_collection: String = "tokens".to_string(),
        liquidities_collection: String = "liquidities".to_string(),
    }
}

// ============================================================================
// SOLANA CONFIGURATION
// ============================================================================

config_struct! {
    /// Solana RPC configuration
    pub struct SolanaConfig {
        /// JSON-RPC endpoint (env: SOLANA_RPC_URL)
        rpc_url: String = "https://api.devnet.solana.com".to_string(),

        /// Cluster name used for explorer links (devnet, testnet, mainnet-beta)
        cluster: String = "devnet".to_string(),

        /// Commitment level: processed, confirmed or finalized
        commitment: String = "confirmed".to_string(),

        /// Minimum wallet balance required to deploy a token (SOL)
        min_token_creation_balance_sol: f64 = 0.5,

        /// Seconds to wait for a transaction to confirm
        confirm_timeout_secs: u64 = 60,
    }
}

// ============================================================================
// LIQUIDITY CONFIGURATION
// ============================================================================

config_struct! {
    /// Raydium CPMM pool creation configuration (defaults target devnet)
    pub struct LiquidityConfig {
        /// Allow pool creation from the bot
        enabled: bool = true,

        /// Raydium CPMM program id
        cpmm_program_id: String = "CPMDWBwJDtYax9qW7AyRuVC19Cc4L4Vcy4n2BHAbHkCW".to_string(),

        /// AMM config account (fee tier) the pool is created under
        amm_config: String = "9zSzfkYy6awexsHvmggeH36pfVUdDGyCcwmjT3AQPBj6".to_string(),

        /// Account receiving the pool creation fee
        create_pool_fee_receiver: String = "G11FKBRaAkHAKuLCgLM6K6NUc9rTjPAznRCjZifrTQe2".to_string(),

        /// Delay between pool creation and trading open (seconds)
        open_time_delay_secs: u64 = 30,

        /// Compute unit limit for the pool initialize transaction
        compute_unit_limit: u32 = 400_000,
    }
}

// ============================================================================
// PINATA CONFIGURATION
// ============================================================================

config_struct! {
    /// Pinata IPFS pinning configuration
    pub struct PinataConfig {
        /// Upload token logos and metadata to IPFS
        enabled: bool = false,

        /// API credentials (env: PIN_API_KEY / PIN_SECRET_KEY)
        api_key: String = String::new(),
        secret_key: String = String::new(),

        api_url: String = "https://api.pinata.cloud".to_string(),
        gateway_url: String = "https://gateway.pinata.cloud".to_string(),

        /// Minimum logo width in pixels; the smallest Telegram photo size at
        /// least this wide is uploaded
        logo_min_width: u32 = 128,
    }
}

// ============================================================================
// WIZARD CONFIGURATION
// ============================================================================

config_struct! {
    /// Conversation (multi-step form) configuration
    pub struct WizardConfig {
        /// Minutes of inactivity after which an unfinished form is dropped
        session_timeout_minutes: i64 = 30,
    }
}

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Telegram configuration
        telegram: TelegramConfig = TelegramConfig::default(),

        /// Database configuration
        database: DatabaseConfig = DatabaseConfig::default(),

        /// Solana configuration
        solana: SolanaConfig = SolanaConfig::default(),

        /// Liquidity pool configuration
        liquidity: LiquidityConfig = LiquidityConfig::default(),

        /// Pinata configuration
        pinata: PinataConfig = PinataConfig::default(),

        /// Wizard configuration
        wizard: WizardConfig = WizardConfig::default(),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl DatabaseConfig {
    pub fn is_memory(&self) -> bool {
        self.backend.eq_ignore_ascii_case("memory")
    }
}

impl Config {
    /// Validate the configuration before the bot starts
    pub fn validate(&self) -> Result<(), String> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err("Missing Telegram bot token (telegram.bot_token / TELEGRAM_BOT_TOKEN)".to_string());
        }

        match self.database.backend.to_lowercase().as_str() {
            "memory" => {}
            "mongo" => {
                if self.database.uri.trim().is_empty() {
                    return Err("Missing MongoDB URI (database.uri / MONGO_URI)".to_string());
                }
                if self.database.database.trim().is_empty() {
                    return Err("Missing MongoDB database name (database.database / MONGO_DB)".to_string());
                }
            }
            other => {
                return Err(format!("Unknown database backend '{}'", other));
            }
        }

        if self.solana.rpc_url.trim().is_empty() {
            return Err("Solana RPC url cannot be empty".to_string());
        }

        if !matches!(
            self.solana.commitment.as_str(),
            "processed" | "confirmed" | "finalized"
        ) {
            return Err(format!(
                "Invalid commitment '{}' (expected processed, confirmed or finalized)",
                self.solana.commitment
            ));
        }

        if self.pinata.enabled
            && (self.pinata.api_key.is_empty() || self.pinata.secret_key.is_empty())
        {
            return Err("Pinata is enabled but PIN_API_KEY / PIN_SECRET_KEY are missing".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        let mut config = Config::default();
        config.telegram.bot_token = "123:abc".to_string();
        config.database.uri = "mongodb://localhost:27017".to_string();
        config
    }

    #[test]
    fn test_defaults_target_devnet() {
        let config = Config::default();
        assert_eq!(config.solana.rpc_url, "https://api.devnet.solana.com");
        assert_eq!(config.solana.cluster, "devnet");
        assert_eq!(config.solana.min_token_creation_balance_sol, 0.5);
        assert_eq!(config.liquidity.open_time_delay_secs, 30);
        assert!(!config.pinata.enabled);
    }

    #[test]
    fn test_validate_requires_bot_token() {
        let mut config = valid_config();
        config.telegram.bot_token.clear();
        assert!(config.validate().unwrap_err().contains("bot token"));
    }

    #[test]
    fn test_validate_mongo_requires_uri() {
        let mut config = valid_config();
        config.database.uri.clear();
        assert!(config.validate().is_err());

        config.database.backend = "memory".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_backend_and_commitment() {
        let mut config = valid_config();
        config.database.backend = "sqlite".to_string();
        assert!(config.validate().is_err());

        let mut config = valid_config();
        config.solana.commitment = "max".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [telegram]
            bot_token = "42:xyz"

            [solana]
            cluster = "mainnet-beta"
            "#,
        )
        .unwrap();

        assert_eq!(config.telegram.bot_token, "42:xyz");
        assert_eq!(config.solana.cluster, "mainnet-beta");
        assert_eq!(config.solana.commitment, "confirmed");
        assert_eq!(config.database.wallets_collection, "wallets");
    }
}
