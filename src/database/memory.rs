use super::models::{AuthorityKind, LiquidityRecord, TokenRecord, WalletRecord};
use super::Store;
use crate::errors::{BotError, BotResult};
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process store
#[derive(Default)]
pub struct MemoryStore {
    wallets: RwLock<Vec<WalletRecord>>,
    tokens: RwLock<Vec<TokenRecord>>,
    liquidities: RwLock<Vec<LiquidityRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn find_wallet(&self, tg_id: &str) -> BotResult<Option<WalletRecord>> {
        let wallets = self.wallets.read().await;
        Ok(wallets.iter().find(|w| w.tg_id == tg_id).cloned())
    }

    async fn insert_wallet(&self, record: &WalletRecord) -> BotResult<()> {
        self.wallets.write().await.push(record.clone());
        Ok(())
    }

    async fn list_tokens(&self, tg_id: &str) -> BotResult<Vec<TokenRecord>> {
        let tokens = self.tokens.read().await;
        Ok(tokens.iter().filter(|t| t.tg_id == tg_id).cloned().collect())
    }

    async fn find_token(&self, tg_id: &str, mint_address: &str) -> BotResult<Option<TokenRecord>> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .iter()
            .find(|t| t.tg_id == tg_id && t.mint_address == mint_address)
            .cloned())
    }

    async fn insert_token(&self, record: &TokenRecord) -> BotResult<()> {
        self.tokens.write().await.push(record.clone());
        Ok(())
    }

    async fn set_token_authority(
        &self,
        tg_id: &str,
        mint_address: &str,
        kind: AuthorityKind,
        enabled: bool,
    ) -> BotResult<()> {
        let mut tokens = self.tokens.write().await;
        let token = tokens
            .iter_mut()
            .find(|t| t.tg_id == tg_id && t.mint_address == mint_address)
            .ok_or_else(|| BotError::NotFound {
                what: "token".to_string(),
            })?;
        token.set_authority(kind, enabled);
        Ok(())
    }

    async fn list_liquidities(&self, tg_id: &str) -> BotResult<Vec<LiquidityRecord>> {
        let pools = self.liquidities.read().await;
        Ok(pools.iter().filter(|p| p.tg_id == tg_id).cloned().collect())
    }

    async fn insert_liquidity(&self, record: &LiquidityRecord) -> BotResult<()> {
        self.liquidities.write().await.push(record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn token(tg_id: &str, name: &str, mint: &str) -> TokenRecord {
        TokenRecord {
            tg_id: tg_id.to_string(),
            token_name: name.to_string(),
            symbol: "TST".to_string(),
            decimals: 6,
            total_supply: 1_000,
            token_description: String::new(),
            mint_address: mint.to_string(),
            logo_url: String::new(),
            metadata_uri: String::new(),
            mint_authority: true,
            freeze_authority: true,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_tokens_are_scoped_and_ordered() {
        let store = MemoryStore::new();
        store.insert_token(&token("1", "First", "M1")).await.unwrap();
        store.insert_token(&token("2", "Other", "M2")).await.unwrap();
        store.insert_token(&token("1", "Second", "M3")).await.unwrap();

        let names: Vec<String> = store
            .list_tokens("1")
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.token_name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert!(store.find_token("2", "M1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_token_authority() {
        let store = MemoryStore::new();
        store.insert_token(&token("1", "First", "M1")).await.unwrap();

        store
            .set_token_authority("1", "M1", AuthorityKind::Freeze, false)
            .await
            .unwrap();
        let record = store.find_token("1", "M1").await.unwrap().unwrap();
        assert!(record.mint_authority);
        assert!(!record.freeze_authority);

        let missing = store
            .set_token_authority("1", "nope", AuthorityKind::Mint, false)
            .await;
        assert!(matches!(missing, Err(BotError::NotFound { .. })));
    }
}
