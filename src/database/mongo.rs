use super::models::{AuthorityKind, LiquidityRecord, TokenRecord, WalletRecord};
use super::Store;
use crate::config::DatabaseConfig;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Document};
use mongodb::options::FindOptions;
use mongodb::{Client, Collection, Database};

/// MongoDB-backed store, one collection per record type
pub struct MongoStore {
    wallets: Collection<WalletRecord>,
    tokens: Collection<TokenRecord>,
    liquidities: Collection<LiquidityRecord>,
}

impl MongoStore {
    /// Connect and ping the server; an unreachable server is a startup error
    pub async fn connect(config: &DatabaseConfig) -> BotResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| BotError::Database(format!("Failed to create MongoDB client: {}", e)))?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| BotError::Database(format!("MongoDB ping failed: {}", e)))?;

        logger::info(
            LogTag::Database,
            &format!("Connected to MongoDB database '{}'", config.database),
        );

        Ok(Self::from_database(&db, config))
    }

    fn from_database(db: &Database, config: &DatabaseConfig) -> Self {
        Self {
            wallets: db.collection(&config.wallets_collection),
            tokens: db.collection(&config.tokens_collection),
            liquidities: db.collection(&config.liquidities_collection),
        }
    }

    /// Oldest first
    fn insertion_order() -> FindOptions {
        FindOptions::builder().sort(doc! { "_id": 1 }).build()
    }
}

#[async_trait]
impl Store for MongoStore {
    fn name(&self) -> &'static str {
        "mongo"
    }

    async fn find_wallet(&self, tg_id: &str) -> BotResult<Option<WalletRecord>> {
        Ok(self.wallets.find_one(doc! { "tgId": tg_id }, None).await?)
    }

    async fn insert_wallet(&self, record: &WalletRecord) -> BotResult<()> {
        self.wallets.insert_one(record, None).await?;
        logger::debug(
            LogTag::Database,
            &format!("Stored wallet {} for {}", record.account, record.tg_id),
        );
        Ok(())
    }

    async fn list_tokens(&self, tg_id: &str) -> BotResult<Vec<TokenRecord>> {
        let cursor = self
            .tokens
            .find(doc! { "tgId": tg_id }, Self::insertion_order())
            .await?;
        let tokens: Vec<TokenRecord> = cursor.try_collect().await?;
        Ok(tokens)
    }

    async fn find_token(&self, tg_id: &str, mint_address: &str) -> BotResult<Option<TokenRecord>> {
        Ok(self
            .tokens
            .find_one(doc! { "tgId": tg_id, "mintAddress": mint_address }, None)
            .await?)
    }

    async fn insert_token(&self, record: &TokenRecord) -> BotResult<()> {
        self.tokens.insert_one(record, None).await?;
        logger::debug(
            LogTag::Database,
            &format!("Stored token {} for {}", record.mint_address, record.tg_id),
        );
        Ok(())
    }

    async fn set_token_authority(
        &self,
        tg_id: &str,
        mint_address: &str,
        kind: AuthorityKind,
        enabled: bool,
    ) -> BotResult<()> {
        let mut fields = Document::new();
        fields.insert(kind.record_field(), enabled);

        let result = self
            .tokens
            .update_one(
                doc! { "tgId": tg_id, "mintAddress": mint_address },
                doc! { "$set": fields },
                None,
            )
            .await?;

        if result.matched_count == 0 {
            return Err(BotError::NotFound {
                what: "token".to_string(),
            });
        }
        Ok(())
    }

    async fn list_liquidities(&self, tg_id: &str) -> BotResult<Vec<LiquidityRecord>> {
        let cursor = self
            .liquidities
            .find(doc! { "tgId": tg_id }, Self::insertion_order())
            .await?;
        let pools: Vec<LiquidityRecord> = cursor.try_collect().await?;
        Ok(pools)
    }

    async fn insert_liquidity(&self, record: &LiquidityRecord) -> BotResult<()> {
        self.liquidities.insert_one(record, None).await?;
        logger::debug(
            LogTag::Database,
            &format!("Stored pool {} for {}", record.pool_id, record.tg_id),
        );
        Ok(())
    }
}
