//! Persistence for wallets, tokens and liquidity pools
//!
//! Handlers only see the `Store` trait. `MongoStore` is the production
//! backend, `MemoryStore` keeps everything in process for development and
//! tests. Lists come back in insertion order; callback data refers to list
//! positions.

pub mod memory;
pub mod models;
pub mod mongo;

pub use memory::MemoryStore;
pub use models::{AuthorityKind, LiquidityRecord, TokenRecord, WalletRecord};
pub use mongo::MongoStore;

use crate::config::DatabaseConfig;
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    async fn find_wallet(&self, tg_id: &str) -> BotResult<Option<WalletRecord>>;

    async fn insert_wallet(&self, record: &WalletRecord) -> BotResult<()>;

    async fn list_tokens(&self, tg_id: &str) -> BotResult<Vec<TokenRecord>>;

    async fn find_token(&self, tg_id: &str, mint_address: &str) -> BotResult<Option<TokenRecord>>;

    async fn insert_token(&self, record: &TokenRecord) -> BotResult<()>;

    /// Record whether one authority of a token is still held
    async fn set_token_authority(
        &self,
        tg_id: &str,
        mint_address: &str,
        kind: AuthorityKind,
        enabled: bool,
    ) -> BotResult<()>;

    async fn list_liquidities(&self, tg_id: &str) -> BotResult<Vec<LiquidityRecord>>;

    async fn insert_liquidity(&self, record: &LiquidityRecord) -> BotResult<()>;
}

/// Open the backend selected in the configuration
pub async fn connect_store(config: &DatabaseConfig) -> BotResult<Arc<dyn Store>> {
    if config.is_memory() {
        logger::warning(
            LogTag::Database,
            "Using in-memory store, nothing will survive a restart",
        );
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = MongoStore::connect(config).await?;
    Ok(Arc::new(store))
}
