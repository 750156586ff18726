//! Telegram bot startup and update dispatching

use super::commands::{self, callbacks, conversation, Command};
use crate::config::with_config;
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use crate::state::AppState;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

/// Connect with the configured token and serve updates until Ctrl-C
pub async fn run_bot(state: Arc<AppState>) -> BotResult<()> {
    let (token, register_commands) =
        with_config(|c| (c.telegram.bot_token.clone(), c.telegram.register_commands));

    let bot = Bot::new(token);

    // Validate token by calling getMe
    let me = bot.get_me().await?;
    logger::info(
        LogTag::Telegram,
        &format!(
            "Bot initialized: @{} (ID: {})",
            me.username.as_deref().unwrap_or("unknown"),
            me.id
        ),
    );

    if register_commands {
        bot.set_my_commands(Command::bot_commands()).await?;
        logger::debug(LogTag::Telegram, "Command menu registered");
    }

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .branch(
                    dptree::entry()
                        .filter_command::<Command>()
                        .endpoint(commands::handle_command),
                )
                .branch(dptree::endpoint(conversation::handle_message)),
        )
        .branch(Update::filter_callback_query().endpoint(callbacks::handle_callback));

    logger::info(LogTag::Telegram, "Polling for updates");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .default_handler(|update| async move {
            logger::verbose(
                LogTag::Telegram,
                &format!("Unhandled update {:?}", update.id),
            );
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    logger::info(LogTag::Telegram, "Dispatcher stopped");
    Ok(())
}
