//! Persisted documents
//!
//! Field names are camelCase on disk so existing collections stay readable.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Custodial wallet owned by one Telegram user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletRecord {
    /// Telegram chat id of the owner
    pub tg_id: String,
    /// `@username`, or the first name when the user has none
    pub username: String,
    /// Base58 public key
    pub account: String,
    /// 64-byte ed25519 keypair (secret followed by public half)
    pub secret_key: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

/// SPL token created through the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRecord {
    pub tg_id: String,
    pub token_name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole tokens, as entered in the wizard
    pub total_supply: u64,
    pub token_description: String,
    pub mint_address: String,
    /// IPFS gateway url of the logo, or the Telegram file id when pinning is off
    pub logo_url: String,
    #[serde(default)]
    pub metadata_uri: String,
    /// True while the mint authority is still held
    pub mint_authority: bool,
    /// True while the freeze authority is still held
    pub freeze_authority: bool,
    pub created_at: DateTime<Utc>,
}

/// Liquidity pool created through the bot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityRecord {
    pub tg_id: String,
    pub mint_address: String,
    pub token_name: String,
    pub pool_id: String,
    pub lp_mint: String,
    /// Whole tokens deposited (decimal string as entered)
    pub token_amount: String,
    /// SOL deposited (decimal string as entered)
    pub sol_amount: String,
    pub signature: String,
    pub created_at: DateTime<Utc>,
}

/// The two revocable authorities of an SPL mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorityKind {
    Mint,
    Freeze,
}

impl AuthorityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthorityKind::Mint => "mint",
            AuthorityKind::Freeze => "freeze",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "mint" => Some(AuthorityKind::Mint),
            "freeze" => Some(AuthorityKind::Freeze),
            _ => None,
        }
    }

    /// Name of the boolean field on `TokenRecord`
    pub fn record_field(&self) -> &'static str {
        match self {
            AuthorityKind::Mint => "mintAuthority",
            AuthorityKind::Freeze => "freezeAuthority",
        }
    }
}

impl TokenRecord {
    pub fn authority_enabled(&self, kind: AuthorityKind) -> bool {
        match kind {
            AuthorityKind::Mint => self.mint_authority,
            AuthorityKind::Freeze => self.freeze_authority,
        }
    }

    pub fn set_authority(&mut self, kind: AuthorityKind, enabled: bool) {
        match kind {
            AuthorityKind::Mint => self.mint_authority = enabled,
            AuthorityKind::Freeze => self.freeze_authority = enabled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wallet_record_field_names() {
        let record = WalletRecord {
            tg_id: "42".to_string(),
            username: "@alice".to_string(),
            account: "Acc111".to_string(),
            secret_key: vec![1, 2, 3],
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["tgId"], "42");
        assert_eq!(value["secretKey"], serde_json::json!([1, 2, 3]));
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_token_record_without_metadata_uri() {
        let value = serde_json::json!({
            "tgId": "42",
            "tokenName": "Moon",
            "symbol": "MOON",
            "decimals": 6,
            "totalSupply": 1000,
            "tokenDescription": "",
            "mintAddress": "Mint111",
            "logoUrl": "file-id",
            "mintAuthority": true,
            "freezeAuthority": false,
            "createdAt": "2024-05-01T10:00:00Z"
        });
        let record: TokenRecord = serde_json::from_value(value).unwrap();
        assert_eq!(record.metadata_uri, "");
        assert!(record.authority_enabled(AuthorityKind::Mint));
        assert!(!record.authority_enabled(AuthorityKind::Freeze));
    }

    #[test]
    fn test_authority_kind_fields() {
        assert_eq!(AuthorityKind::parse("freeze"), Some(AuthorityKind::Freeze));
        assert_eq!(AuthorityKind::parse("owner"), None);
        assert_eq!(AuthorityKind::Mint.record_field(), "mintAuthority");
    }
}
