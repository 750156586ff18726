//! Sending and replacing bot messages
//!
//! Menu navigation edits the message the button belongs to. When that is
//! impossible (the message is a photo, too old, or was deleted) the old
//! message is removed and a fresh one sent instead.

use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardMarkup, LinkPreviewOptions, MessageId, ParseMode};
use teloxide::{ApiError, RequestError};

fn no_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// Send an HTML message, optionally with an inline keyboard
pub async fn send_html(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    keyboard: Option<InlineKeyboardMarkup>,
) -> BotResult<Message> {
    let mut request = bot
        .send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .link_preview_options(no_preview());
    if let Some(keyboard) = keyboard {
        request = request.reply_markup(keyboard);
    }
    Ok(request.await?)
}

/// Edit `message_id` in place, or delete it and send a new message
pub async fn replace_message(
    bot: &Bot,
    chat_id: ChatId,
    message_id: Option<MessageId>,
    text: &str,
    keyboard: InlineKeyboardMarkup,
) -> BotResult<()> {
    if let Some(message_id) = message_id {
        let edited = bot
            .edit_message_text(chat_id, message_id, text)
            .parse_mode(ParseMode::Html)
            .link_preview_options(no_preview())
            .reply_markup(keyboard.clone())
            .await;

        match edited {
            Ok(_) | Err(RequestError::Api(ApiError::MessageNotModified)) => return Ok(()),
            Err(e) => {
                logger::debug(
                    LogTag::Telegram,
                    &format!("Edit of {} failed ({}), sending a new message", message_id.0, e),
                );
                if let Err(e) = bot.delete_message(chat_id, message_id).await {
                    logger::debug(
                        LogTag::Telegram,
                        &format!("Could not delete message {}: {}", message_id.0, e),
                    );
                }
            }
        }
    }

    send_html(bot, chat_id, text, Some(keyboard)).await?;
    Ok(())
}
