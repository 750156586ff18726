/// Custodial wallets: one generated keypair per Telegram user
use crate::database::{Store, WalletRecord};
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use chrono::Utc;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

/// A user's wallet record together with its decoded keypair
pub struct CustodialWallet {
    pub record: WalletRecord,
    pub keypair: Keypair,
}

impl CustodialWallet {
    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

/// Return the stored wallet of `tg_id`, generating and persisting one on first use
pub async fn get_or_create_wallet(
    store: &dyn Store,
    tg_id: &str,
    username: &str,
) -> BotResult<CustodialWallet> {
    if let Some(record) = store.find_wallet(tg_id).await? {
        let keypair = keypair_from_record(&record)?;
        return Ok(CustodialWallet { record, keypair });
    }

    let keypair = Keypair::new();
    let record = WalletRecord {
        tg_id: tg_id.to_string(),
        username: username.to_string(),
        account: keypair.pubkey().to_string(),
        secret_key: keypair.to_bytes().to_vec(),
        created_at: Utc::now(),
    };
    store.insert_wallet(&record).await?;

    logger::info(
        LogTag::Wallet,
        &format!("Generated wallet {} for {} ({})", record.account, username, tg_id),
    );

    Ok(CustodialWallet { record, keypair })
}

/// Decode the stored 64-byte keypair and check it matches the stored address
pub fn keypair_from_record(record: &WalletRecord) -> BotResult<Keypair> {
    let keypair = Keypair::try_from(&record.secret_key[..])
        .map_err(|e| BotError::Wallet(format!("Invalid keypair for {}: {}", record.tg_id, e)))?;

    if keypair.pubkey().to_string() != record.account {
        return Err(BotError::Wallet(format!(
            "Stored keypair for {} does not match account {}",
            record.tg_id, record.account
        )));
    }

    Ok(keypair)
}

/// Secret key as a comma-separated byte list, the format wallets import from JSON files
pub fn secret_key_bytes_display(record: &WalletRecord) -> String {
    let bytes: Vec<String> = record.secret_key.iter().map(|b| b.to_string()).collect();
    format!("[{}]", bytes.join(","))
}

/// Secret key as base58, the format Phantom and Solflare import
pub fn secret_key_base58(record: &WalletRecord) -> String {
    bs58::encode(&record.secret_key).into_string()
}

/// `@username`, falling back to the first name
pub fn display_username(username: Option<&str>, first_name: &str) -> String {
    match username {
        Some(name) if !name.is_empty() => format!("@{}", name),
        _ => first_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn test_get_or_create_is_stable() {
        let store = MemoryStore::new();
        let first = get_or_create_wallet(&store, "7", "@bob").await.unwrap();
        let second = get_or_create_wallet(&store, "7", "@bob").await.unwrap();

        assert_eq!(first.pubkey(), second.pubkey());
        assert_eq!(first.record.secret_key.len(), 64);
        assert_eq!(first.record.account, first.pubkey().to_string());

        let other = get_or_create_wallet(&store, "8", "@eve").await.unwrap();
        assert_ne!(first.pubkey(), other.pubkey());
    }

    #[test]
    fn test_keypair_from_record_rejects_mismatch() {
        let keypair = Keypair::new();
        let mut record = WalletRecord {
            tg_id: "1".to_string(),
            username: "@a".to_string(),
            account: Keypair::new().pubkey().to_string(),
            secret_key: keypair.to_bytes().to_vec(),
            created_at: Utc::now(),
        };
        assert!(keypair_from_record(&record).is_err());

        record.account = keypair.pubkey().to_string();
        assert_eq!(keypair_from_record(&record).unwrap().pubkey(), keypair.pubkey());

        record.secret_key.truncate(10);
        assert!(keypair_from_record(&record).is_err());
    }

    #[test]
    fn test_secret_key_formats() {
        let keypair = Keypair::new();
        let record = WalletRecord {
            tg_id: "1".to_string(),
            username: "@a".to_string(),
            account: keypair.pubkey().to_string(),
            secret_key: keypair.to_bytes().to_vec(),
            created_at: Utc::now(),
        };
        let listed = secret_key_bytes_display(&record);
        assert!(listed.starts_with('['));
        assert_eq!(listed.matches(',').count(), 63);
        assert_eq!(secret_key_base58(&record), keypair.to_base58_string());
    }

    #[test]
    fn test_display_username() {
        assert_eq!(display_username(Some("alice"), "Alice"), "@alice");
        assert_eq!(display_username(None, "Alice"), "Alice");
    }
}
