use thiserror::Error;

/// Chat-facing text for failures that carry no user-specific explanation
pub const GENERIC_USER_ERROR: &str =
    "There was an error processing your request. Please try again later.";

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Liquidity error: {0}")]
    Liquidity(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Insufficient balance: need {needed} SOL, have {available} SOL")]
    InsufficientBalance { needed: f64, available: f64 },

    #[error("Insufficient token balance: need {needed}, have {available}")]
    InsufficientTokens { needed: String, available: String },

    #[error("Not found: {what}")]
    NotFound { what: String },

    #[error("{authority} authority already revoked")]
    AlreadyRevoked { authority: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BotError {
    /// Text shown to the user in chat
    pub fn user_message(&self) -> String {
        match self {
            BotError::InsufficientBalance { needed, available } => format!(
                "🟡 Insufficient SOL balance. You need at least {} SOL to continue, your wallet holds {:.4} SOL.",
                needed, available
            ),
            BotError::InsufficientTokens { needed, available } => format!(
                "🟡 Insufficient token balance. Requested {}, your wallet holds {}.",
                needed, available
            ),
            BotError::NotFound { what } => format!("🟡 {} not found.", capitalize(what)),
            BotError::AlreadyRevoked { authority } => {
                format!("🟡 The {} authority is already disabled.", authority)
            }
            BotError::Validation(message) => format!("🟡 {}", message),
            _ => GENERIC_USER_ERROR.to_string(),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

impl From<mongodb::error::Error> for BotError {
    fn from(e: mongodb::error::Error) -> Self {
        BotError::Database(e.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for BotError {
    fn from(e: solana_client::client_error::ClientError) -> Self {
        BotError::Rpc(e.to_string())
    }
}

impl From<solana_sdk::program_error::ProgramError> for BotError {
    fn from(e: solana_sdk::program_error::ProgramError) -> Self {
        BotError::Rpc(e.to_string())
    }
}

impl From<teloxide::RequestError> for BotError {
    fn from(e: teloxide::RequestError) -> Self {
        BotError::Telegram(e.to_string())
    }
}

pub type BotResult<T> = Result<T, BotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_balance_message() {
        let err = BotError::InsufficientBalance {
            needed: 0.5,
            available: 0.12,
        };
        let text = err.user_message();
        assert!(text.contains("0.5 SOL"));
        assert!(text.contains("0.1200 SOL"));
    }

    #[test]
    fn test_internal_errors_are_generic() {
        assert_eq!(
            BotError::Rpc("node down".into()).user_message(),
            GENERIC_USER_ERROR
        );
        assert_eq!(
            BotError::Database("timeout".into()).user_message(),
            GENERIC_USER_ERROR
        );
    }

    #[test]
    fn test_specific_messages() {
        let err = BotError::NotFound {
            what: "token".into(),
        };
        assert_eq!(err.user_message(), "🟡 Token not found.");

        let err = BotError::AlreadyRevoked {
            authority: "mint".into(),
        };
        assert!(err.user_message().contains("mint authority is already disabled"));
    }
}
