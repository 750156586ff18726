//! Token logo and metadata hosting
//!
//! With Pinata enabled the chosen photo size is downloaded from Telegram and
//! pinned, then a metadata JSON document pointing at it is pinned as well.
//! Without Pinata the Telegram file id is kept as the logo reference and the
//! metadata uri stays empty.

pub mod pinata;
pub mod telegram_file;

pub use pinata::PinataClient;

use crate::config::{PinataConfig, TelegramConfig};
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use serde_json::{json, Value};

/// One size of a photo sent to the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef {
    pub file_id: String,
    pub width: u32,
    pub height: u32,
}

/// Logo location plus metadata uri for a new token
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenAssets {
    pub logo_url: String,
    pub metadata_uri: String,
}

/// Smallest size at least `min_width` wide, or the largest one available
pub fn select_logo_photo(sizes: &[PhotoRef], min_width: u32) -> Option<&PhotoRef> {
    sizes
        .iter()
        .filter(|p| p.width >= min_width)
        .min_by_key(|p| p.width)
        .or_else(|| sizes.iter().max_by_key(|p| p.width))
}

/// Off-chain metadata document referenced by the Metaplex account
pub fn token_metadata_json(name: &str, symbol: &str, description: &str, image: &str) -> Value {
    json!({
        "name": name,
        "symbol": symbol,
        "description": description,
        "image": image,
    })
}

pub struct AssetUploader {
    pinata: Option<PinataClient>,
    http: reqwest::Client,
    telegram_api_url: String,
    bot_token: String,
    logo_min_width: u32,
}

impl AssetUploader {
    pub fn new(pinata: &PinataConfig, telegram: &TelegramConfig) -> BotResult<Self> {
        let client = if pinata.enabled {
            logger::info(LogTag::Upload, "Pinata enabled, logos and metadata go to IPFS");
            Some(PinataClient::new(pinata)?)
        } else {
            logger::warning(
                LogTag::Upload,
                "Pinata disabled, tokens are created with an empty metadata uri",
            );
            None
        };

        Ok(Self {
            pinata: client,
            http: reqwest::Client::new(),
            telegram_api_url: telegram.api_url.clone(),
            bot_token: telegram.bot_token.clone(),
            logo_min_width: pinata.logo_min_width,
        })
    }

    pub fn logo_min_width(&self) -> u32 {
        self.logo_min_width
    }

    /// Host the logo and metadata of a token about to be created
    pub async fn upload_token_assets(
        &self,
        logo: &PhotoRef,
        name: &str,
        symbol: &str,
        description: &str,
    ) -> BotResult<TokenAssets> {
        let Some(pinata) = &self.pinata else {
            return Ok(TokenAssets {
                logo_url: logo.file_id.clone(),
                metadata_uri: String::new(),
            });
        };

        let bytes = telegram_file::download_telegram_file(
            &self.http,
            &self.telegram_api_url,
            &self.bot_token,
            &logo.file_id,
        )
        .await?;

        let file_name = format!("{}.jpg", symbol.to_lowercase());
        let logo_url = pinata.pin_file(bytes, &file_name).await?;

        let metadata = token_metadata_json(name, symbol, description, &logo_url);
        let metadata_uri = pinata
            .pin_json(&metadata, &format!("{}-metadata.json", symbol.to_lowercase()))
            .await?;

        logger::info(
            LogTag::Upload,
            &format!("Uploaded assets for {}: {}", symbol, metadata_uri),
        );

        Ok(TokenAssets {
            logo_url,
            metadata_uri,
        })
    }
}
