//! Command, callback and conversation handlers
//!
//! Every handler builds a `Page` for the user it serves, runs one page
//! function and turns any `BotError` into a logged error plus a chat reply.
//! Records and sessions belong to the sender; the chat is only where
//! replies go.

pub mod callbacks;
pub mod conversation;
pub mod liquidity;
pub mod menu;
pub mod tokens;
pub mod wallet;

use super::keyboards;
use super::messaging::{replace_message, send_html};
use crate::database::TokenRecord;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use crate::solana::wallet::display_username;
use crate::solana::{get_or_create_wallet, CustodialWallet};
use crate::state::AppState;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, InlineKeyboardMarkup, MessageId, UserId};
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start the bot and get your Solana account info")]
    Start,
    #[command(description = "Get a list of available commands")]
    Help,
    #[command(description = "Show your wallet and balance")]
    Wallet,
    #[command(description = "List the tokens you created")]
    Tokens,
    #[command(description = "Abort the current form")]
    Cancel,
}

/// The user a handler is serving, the chat it answers in and the message
/// it may edit
pub struct Page<'a> {
    pub bot: &'a Bot,
    pub state: &'a AppState,
    pub chat_id: ChatId,
    /// Owner of the wallet, tokens, pools and conversation
    pub user_id: UserId,
    /// Message to replace; `None` sends fresh messages
    pub message_id: Option<MessageId>,
    pub first_name: String,
    pub username: Option<String>,
}

impl<'a> Page<'a> {
    /// `None` for messages without a sender (channel posts)
    pub fn from_message(bot: &'a Bot, state: &'a AppState, msg: &Message) -> Option<Self> {
        let user = msg.from.as_ref()?;
        Some(Self {
            bot,
            state,
            chat_id: msg.chat.id,
            user_id: user.id,
            message_id: None,
            first_name: user.first_name.clone(),
            username: user.username.clone(),
        })
    }

    /// `None` when the button's message is no longer known to Telegram
    pub fn from_callback(bot: &'a Bot, state: &'a AppState, query: &CallbackQuery) -> Option<Self> {
        let message = query.message.as_ref()?;
        Some(Self {
            bot,
            state,
            chat_id: message.chat().id,
            user_id: query.from.id,
            message_id: Some(message.id()),
            first_name: query.from.first_name.clone(),
            username: query.from.username.clone(),
        })
    }

    /// Key the user's records are stored under
    pub fn owner_id(&self) -> String {
        self.user_id.0.to_string()
    }

    /// Key of the user's conversation
    pub fn session_key(&self) -> u64 {
        self.user_id.0
    }

    pub async fn wallet(&self) -> BotResult<CustodialWallet> {
        let username = display_username(self.username.as_deref(), &self.first_name);
        get_or_create_wallet(self.state.store.as_ref(), &self.owner_id(), &username).await
    }

    pub async fn tokens(&self) -> BotResult<Vec<TokenRecord>> {
        self.state.store.list_tokens(&self.owner_id()).await
    }

    /// Token at list position `index`
    pub async fn token_at(&self, index: usize) -> BotResult<TokenRecord> {
        self.tokens()
            .await?
            .into_iter()
            .nth(index)
            .ok_or_else(|| BotError::NotFound {
                what: "token".to_string(),
            })
    }

    /// The user's token with mint `mint_address`
    pub async fn token_by_mint(&self, mint_address: &str) -> BotResult<TokenRecord> {
        self.state
            .store
            .find_token(&self.owner_id(), mint_address)
            .await?
            .ok_or_else(|| BotError::NotFound {
                what: "token".to_string(),
            })
    }

    /// Replace the current message (or send one) with `text`
    pub async fn show(&self, text: &str, keyboard: InlineKeyboardMarkup) -> BotResult<()> {
        replace_message(self.bot, self.chat_id, self.message_id, text, keyboard).await
    }

    /// Always send a new message
    pub async fn send(&self, text: &str, keyboard: Option<InlineKeyboardMarkup>) -> BotResult<()> {
        send_html(self.bot, self.chat_id, text, keyboard).await?;
        Ok(())
    }

    /// Log a failed action and tell the user what went wrong
    pub async fn report(&self, tag: LogTag, action: &str, error: &BotError) {
        let line = format!(
            "{} failed for user {} in chat {}: {}",
            action, self.user_id.0, self.chat_id.0, error
        );
        match error {
            BotError::InsufficientBalance { .. }
            | BotError::InsufficientTokens { .. }
            | BotError::NotFound { .. }
            | BotError::AlreadyRevoked { .. }
            | BotError::Validation(_) => logger::warning(tag, &line),
            _ => logger::error(tag, &line),
        }

        if let Err(e) = self
            .send(&error.user_message(), Some(keyboards::back_home()))
            .await
        {
            logger::error(
                tag,
                &format!("Could not report error to chat {}: {}", self.chat_id.0, e),
            );
        }
    }
}

/// Entry point for `/commands`
pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: Arc<AppState>,
) -> ResponseResult<()> {
    let Some(page) = Page::from_message(&bot, &state, &msg) else {
        logger::debug(
            LogTag::Telegram,
            &format!("Ignoring {:?} without a sender in chat {}", cmd, msg.chat.id.0),
        );
        return Ok(());
    };
    logger::debug(
        LogTag::Telegram,
        &format!(
            "Command {:?} from user {} in chat {}",
            cmd, page.user_id.0, page.chat_id.0
        ),
    );

    let (tag, result) = match cmd {
        Command::Start => (LogTag::Wallet, menu::show_dashboard(&page).await),
        Command::Help => (LogTag::Telegram, menu::show_help(&page).await),
        Command::Wallet => (LogTag::Wallet, wallet::show_wallet(&page).await),
        Command::Tokens => (LogTag::Token, tokens::show_tokens(&page).await),
        Command::Cancel => (LogTag::Telegram, conversation::cancel(&page).await),
    };

    if let Err(e) = result {
        page.report(tag, &format!("/{:?}", cmd).to_lowercase(), &e).await;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PinataConfig, SolanaConfig, TelegramConfig};
    use crate::database::MemoryStore;
    use crate::solana::ChainClient;
    use crate::telegram::SessionStore;
    use crate::upload::AssetUploader;

    fn memory_state() -> AppState {
        AppState::new(
            Arc::new(MemoryStore::new()),
            ChainClient::new(&SolanaConfig::default()).unwrap(),
            AssetUploader::new(&PinataConfig::default(), &TelegramConfig::default()).unwrap(),
            SessionStore::new(None),
        )
    }

    fn group_message(user_id: u64, first_name: &str) -> Message {
        serde_json::from_value(serde_json::json!({
            "message_id": 1,
            "date": 1_700_000_000,
            "chat": { "id": -100123, "type": "supergroup", "title": "Launch club" },
            "from": { "id": user_id, "is_bot": false, "first_name": first_name },
            "text": "/start"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_group_members_get_their_own_wallets() {
        let bot = Bot::new("1:test");
        let state = memory_state();
        let alice_msg = group_message(111, "Alice");
        let bob_msg = group_message(222, "Bob");

        let alice = Page::from_message(&bot, &state, &alice_msg).unwrap();
        let bob = Page::from_message(&bot, &state, &bob_msg).unwrap();
        assert_eq!(alice.chat_id, bob.chat_id);
        assert_eq!(alice.owner_id(), "111");
        assert_eq!(bob.session_key(), 222);

        let alice_wallet = alice.wallet().await.unwrap();
        let bob_wallet = bob.wallet().await.unwrap();
        assert_ne!(alice_wallet.pubkey(), bob_wallet.pubkey());
        assert_eq!(alice.wallet().await.unwrap().pubkey(), alice_wallet.pubkey());
    }
}
