//! Callback query handlers for inline keyboard buttons

use super::{conversation, liquidity, menu, tokens, wallet, Page};
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use crate::state::AppState;
use crate::telegram::actions::CallbackAction;
use crate::telegram::session::SessionStore;
use std::sync::Arc;
use teloxide::prelude::*;

/// Handle a button press
pub async fn handle_callback(bot: Bot, query: CallbackQuery, state: Arc<AppState>) -> ResponseResult<()> {
    // Always answer first to remove the loading indicator
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        logger::debug(
            LogTag::Telegram,
            &format!("Failed to answer callback: {}", e),
        );
    }

    let data = query.data.as_deref().unwrap_or("");
    let Some(action) = CallbackAction::parse(data) else {
        logger::debug(
            LogTag::Telegram,
            &format!("Ignoring unknown callback data '{}'", data),
        );
        return Ok(());
    };

    let Some(page) = Page::from_callback(&bot, &state, &query) else {
        logger::debug(
            LogTag::Telegram,
            &format!("Callback '{}' without message context", data),
        );
        return Ok(());
    };

    logger::debug(
        LogTag::Telegram,
        &format!(
            "Callback {:?} from user {} in chat {}",
            action, page.user_id.0, page.chat_id.0
        ),
    );

    // ✅ consumes the session, so its tag is read first
    let tag = error_tag(&state.sessions, page.session_key(), action).await;
    if let Err(e) = route(&page, action).await {
        page.report(tag, data, &e).await;
    }
    Ok(())
}

async fn route(page: &Page<'_>, action: CallbackAction) -> BotResult<()> {
    match action {
        CallbackAction::Dashboard | CallbackAction::RefreshBalance => {
            menu::show_dashboard(page).await
        }
        CallbackAction::Faq => menu::show_faq(page).await,
        CallbackAction::Support => menu::show_support(page).await,
        CallbackAction::Help => menu::show_help(page).await,

        CallbackAction::Wallet => wallet::show_wallet(page).await,
        CallbackAction::SecretKey => wallet::show_secret_key(page).await,

        CallbackAction::Tokens => tokens::show_tokens(page).await,
        CallbackAction::CreateToken => tokens::start_create_token(page).await,
        CallbackAction::TokenDetail(index) => tokens::show_token_detail(page, index).await,
        CallbackAction::ToggleAuthority(index, kind) => {
            tokens::toggle_authority(page, index, kind).await
        }
        CallbackAction::BurnToken(index) => tokens::start_burn(page, index).await,
        CallbackAction::RevokeByAddress(kind) => tokens::start_revoke_by_address(page, kind).await,
        CallbackAction::ConfirmRevoke(index, kind) => tokens::revoke(page, index, kind).await,
        CallbackAction::CancelRevoke(index) => tokens::show_token_detail(page, index).await,

        CallbackAction::Liquidities => liquidity::show_liquidities(page).await,
        CallbackAction::PickLiquidityToken => liquidity::pick_token(page).await,
        CallbackAction::AddLiquidity(index) => liquidity::start_add_liquidity(page, index).await,
        CallbackAction::LiquidityDetail(index) => {
            liquidity::show_liquidity_detail(page, index).await
        }

        CallbackAction::ConfirmPending => conversation::confirm_pending(page).await,
        CallbackAction::CancelWizard => conversation::cancel(page).await,

        CallbackAction::Noop => Ok(()),
    }
}

/// Log tag of the area an action belongs to
fn action_tag(action: CallbackAction) -> LogTag {
    match action {
        CallbackAction::Dashboard
        | CallbackAction::RefreshBalance
        | CallbackAction::Wallet
        | CallbackAction::SecretKey => LogTag::Wallet,
        CallbackAction::Tokens
        | CallbackAction::CreateToken
        | CallbackAction::TokenDetail(_)
        | CallbackAction::ToggleAuthority(..)
        | CallbackAction::BurnToken(_)
        | CallbackAction::RevokeByAddress(_)
        | CallbackAction::ConfirmRevoke(..)
        | CallbackAction::CancelRevoke(_) => LogTag::Token,
        CallbackAction::Liquidities
        | CallbackAction::PickLiquidityToken
        | CallbackAction::AddLiquidity(_)
        | CallbackAction::LiquidityDetail(_) => LogTag::Liquidity,
        CallbackAction::ConfirmPending
        | CallbackAction::Faq
        | CallbackAction::Support
        | CallbackAction::Help
        | CallbackAction::CancelWizard
        | CallbackAction::Noop => LogTag::Telegram,
    }
}

/// Tag for errors of `action`; ✅ takes the area of the request it confirms
async fn error_tag(sessions: &SessionStore, user_id: u64, action: CallbackAction) -> LogTag {
    match action {
        CallbackAction::ConfirmPending => sessions
            .inspect(user_id, conversation::conversation_tag)
            .await
            .unwrap_or(LogTag::Telegram),
        _ => action_tag(action),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::AuthorityKind;
    use crate::telegram::session::Conversation;
    use crate::telegram::wizards::{BurnDraft, LiquidityDraft};

    #[test]
    fn test_action_tags() {
        assert_eq!(action_tag(CallbackAction::SecretKey), LogTag::Wallet);
        assert_eq!(
            action_tag(CallbackAction::ConfirmRevoke(0, AuthorityKind::Mint)),
            LogTag::Token
        );
        assert_eq!(action_tag(CallbackAction::AddLiquidity(2)), LogTag::Liquidity);
        assert_eq!(action_tag(CallbackAction::Noop), LogTag::Telegram);
    }

    #[tokio::test]
    async fn test_confirm_tag_follows_pending_request() {
        let sessions = SessionStore::new(None);
        assert_eq!(
            error_tag(&sessions, 1, CallbackAction::ConfirmPending).await,
            LogTag::Telegram
        );

        sessions
            .put(
                1,
                Conversation::PendingBurn(BurnDraft {
                    token_index: 0,
                    mint_address: "Mint1".into(),
                    amount: "5".into(),
                }),
            )
            .await;
        assert_eq!(
            error_tag(&sessions, 1, CallbackAction::ConfirmPending).await,
            LogTag::Token
        );

        sessions
            .put(
                1,
                Conversation::PendingLiquidity(LiquidityDraft {
                    token_index: 0,
                    mint_address: "Mint1".into(),
                    token_amount: "100".into(),
                    sol_amount: "1".into(),
                }),
            )
            .await;
        assert_eq!(
            error_tag(&sessions, 1, CallbackAction::ConfirmPending).await,
            LogTag::Liquidity
        );
        assert_eq!(
            error_tag(&sessions, 1, CallbackAction::SecretKey).await,
            LogTag::Wallet
        );
    }
}
