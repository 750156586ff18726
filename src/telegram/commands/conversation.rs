//! Free-text and photo replies routed to the sender's active conversation
//!
//! `advance` decides what a message does to a conversation without touching
//! Telegram or the chain; the async handlers only carry the decision out.

use super::{liquidity, tokens, Page};
use crate::database::{AuthorityKind, TokenRecord};
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use crate::state::AppState;
use crate::telegram::formatters;
use crate::telegram::keyboards;
use crate::telegram::session::{Conversation, SessionStore, Taken};
use crate::telegram::validation::{find_owned_token, INVALID_INPUT};
use crate::telegram::wizards::{BurnDraft, LiquidityDraft, Step, TokenDraft, WizardInput};
use crate::upload::PhotoRef;
use std::sync::Arc;
use teloxide::prelude::*;

/// Answer sent when the conversation goes on
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Next question or a 🟡 retry, with the cancel button
    Prompt(String),
    /// Ask again for ✅ / ❌ on the reviewed request
    ConfirmAgain,
}

/// What one message does to a conversation
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// Store the conversation again and answer
    Continue(Conversation, Reply),
    CreateToken(TokenDraft),
    ReviewPool(LiquidityDraft),
    ReviewBurn(BurnDraft),
    /// The typed mint is the user's token at `index`
    ConfirmRevoke { index: usize, kind: AuthorityKind },
}

/// Outcome of ✅ on whatever is active
#[derive(Debug, Clone, PartialEq)]
pub enum Confirmed {
    Pool(LiquidityDraft),
    Burn(BurnDraft),
    /// Nothing was waiting for confirmation; the conversation stays
    NotPending(Conversation),
}

/// Feed one message to a conversation
///
/// `tokens` is the sender's token list; only revoke-by-address reads it.
pub fn advance(
    conversation: Conversation,
    input: WizardInput<'_>,
    tokens: &[TokenRecord],
) -> Transition {
    match conversation {
        Conversation::CreateToken(mut wizard) => match wizard.advance(input) {
            Step::Done(draft) => Transition::CreateToken(draft),
            Step::Prompt(text) | Step::Retry(text) => {
                Transition::Continue(Conversation::CreateToken(wizard), Reply::Prompt(text))
            }
        },
        Conversation::AddLiquidity(mut wizard) => match wizard.advance(input) {
            Step::Done(draft) => Transition::ReviewPool(draft),
            Step::Prompt(text) | Step::Retry(text) => {
                Transition::Continue(Conversation::AddLiquidity(wizard), Reply::Prompt(text))
            }
        },
        Conversation::Burn(mut wizard) => match wizard.advance(input) {
            Step::Done(draft) => Transition::ReviewBurn(draft),
            Step::Prompt(text) | Step::Retry(text) => {
                Transition::Continue(Conversation::Burn(wizard), Reply::Prompt(text))
            }
        },
        Conversation::RevokeByAddress(kind) => {
            let retry = |message: String| {
                Transition::Continue(Conversation::RevokeByAddress(kind), Reply::Prompt(message))
            };
            match input {
                WizardInput::Text(text) => match find_owned_token(tokens, text) {
                    Ok(index) => Transition::ConfirmRevoke { index, kind },
                    Err(message) => retry(message),
                },
                WizardInput::Photo(_) => retry(INVALID_INPUT.to_string()),
            }
        }
        pending @ (Conversation::PendingLiquidity(_) | Conversation::PendingBurn(_)) => {
            Transition::Continue(pending, Reply::ConfirmAgain)
        }
    }
}

pub fn confirmed(conversation: Conversation) -> Confirmed {
    match conversation {
        Conversation::PendingLiquidity(draft) => Confirmed::Pool(draft),
        Conversation::PendingBurn(draft) => Confirmed::Burn(draft),
        other => Confirmed::NotPending(other),
    }
}

/// Log tag of the area a conversation belongs to
pub fn conversation_tag(conversation: &Conversation) -> LogTag {
    match conversation {
        Conversation::AddLiquidity(_) | Conversation::PendingLiquidity(_) => LogTag::Liquidity,
        _ => LogTag::Token,
    }
}

/// Entry point for every message that is not a command
pub async fn handle_message(bot: Bot, msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(page) = Page::from_message(&bot, &state, &msg) else {
        return Ok(());
    };

    let conversation = match state.sessions.take(page.session_key()).await {
        Taken::Active(conversation) => conversation,
        Taken::Expired => {
            let notice = page
                .send(formatters::SESSION_EXPIRED, Some(keyboards::back_home()))
                .await;
            if let Err(e) = notice {
                logger::error(
                    LogTag::Telegram,
                    &format!("Failed to send expiry notice: {}", e),
                );
            }
            return Ok(());
        }
        Taken::Empty => {
            logger::debug(
                LogTag::Telegram,
                &format!(
                    "Ignoring message from user {} without a conversation",
                    page.user_id.0
                ),
            );
            return Ok(());
        }
    };

    let photos: Vec<PhotoRef> = msg
        .photo()
        .map(|sizes| {
            sizes
                .iter()
                .map(|size| PhotoRef {
                    file_id: size.file.id.to_string(),
                    width: size.width,
                    height: size.height,
                })
                .collect()
        })
        .unwrap_or_default();

    let input = match msg.text() {
        Some(text) => WizardInput::Text(text),
        None => WizardInput::Photo(&photos),
    };

    let name = conversation.name();
    let tag = conversation_tag(&conversation);
    if let Err(e) = continue_conversation(&page, conversation, input).await {
        page.report(tag, name, &e).await;
    }
    Ok(())
}

async fn continue_conversation(
    page: &Page<'_>,
    conversation: Conversation,
    input: WizardInput<'_>,
) -> BotResult<()> {
    let owned = match conversation {
        Conversation::RevokeByAddress(_) => page.tokens().await?,
        _ => Vec::new(),
    };

    match advance(conversation, input, &owned) {
        Transition::Continue(conversation, reply) => {
            page.state.sessions.put(page.session_key(), conversation).await;
            match reply {
                Reply::Prompt(text) => page.send(&text, Some(keyboards::wizard_cancel())).await,
                Reply::ConfirmAgain => {
                    page.send(
                        &formatters::confirm_action(),
                        Some(keyboards::confirm_pending()),
                    )
                    .await
                }
            }
        }
        Transition::CreateToken(draft) => tokens::create_from_draft(page, draft).await,
        Transition::ReviewPool(draft) => liquidity::confirm_pool(page, draft).await,
        Transition::ReviewBurn(draft) => tokens::confirm_burn(page, draft).await,
        Transition::ConfirmRevoke { index, kind } => {
            tokens::ask_revoke(page, index, &owned[index], kind).await
        }
    }
}

/// ✅ on a reviewed pool or burn
pub async fn confirm_pending(page: &Page<'_>) -> BotResult<()> {
    let sessions = &page.state.sessions;
    let conversation = match sessions.take(page.session_key()).await {
        Taken::Active(conversation) => conversation,
        Taken::Expired | Taken::Empty => {
            return page
                .show(formatters::SESSION_EXPIRED, keyboards::back_home())
                .await;
        }
    };

    match confirmed(conversation) {
        Confirmed::Pool(draft) => liquidity::create_from_draft(page, draft).await,
        Confirmed::Burn(draft) => tokens::burn_from_draft(page, draft).await,
        Confirmed::NotPending(other) => {
            sessions.put(page.session_key(), other).await;
            Ok(())
        }
    }
}

/// Drop the user's conversation and pick the matching notice
pub async fn cancel_text(sessions: &SessionStore, user_id: u64) -> &'static str {
    if sessions.clear(user_id).await {
        formatters::WIZARD_CANCELLED
    } else {
        formatters::NOTHING_TO_CANCEL
    }
}

/// `/cancel` and the ❌ buttons of every form
pub async fn cancel(page: &Page<'_>) -> BotResult<()> {
    let text = cancel_text(&page.state.sessions, page.session_key()).await;
    page.show(text, keyboards::back_home()).await
}
