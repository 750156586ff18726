//! Liquidity pages: pool list, pool detail and pool creation

use super::Page;
use crate::config::with_config;
use crate::errors::{BotError, BotResult};
use crate::solana::explorer::address_link;
use crate::solana::liquidity::create_pool;
use crate::telegram::session::Conversation;
use crate::telegram::wizards::{LiquidityDraft, LiquidityWizard};
use crate::telegram::{formatters, keyboards};

pub async fn show_liquidities(page: &Page<'_>) -> BotResult<()> {
    let pools = page.state.store.list_liquidities(&page.owner_id()).await?;
    let names: Vec<String> = pools.iter().map(|p| p.token_name.clone()).collect();

    let text = if pools.is_empty() {
        formatters::no_liquidity()
    } else {
        formatters::liquidity_header()
    };
    page.show(&text, keyboards::liquidity_list(&names)).await
}

pub async fn show_liquidity_detail(page: &Page<'_>, index: usize) -> BotResult<()> {
    let pool = page
        .state
        .store
        .list_liquidities(&page.owner_id())
        .await?
        .into_iter()
        .nth(index)
        .ok_or_else(|| BotError::NotFound {
            what: "liquidity pool".to_string(),
        })?;

    let pool_link = address_link(&pool.pool_id, page.state.chain.cluster());
    page.show(
        &formatters::liquidity_detail(&pool),
        keyboards::liquidity_detail(&pool_link),
    )
    .await
}

/// Choose the token to pair with SOL
pub async fn pick_token(page: &Page<'_>) -> BotResult<()> {
    let tokens = page.tokens().await?;
    if tokens.is_empty() {
        return page
            .show(&formatters::no_tokens(), keyboards::no_tokens())
            .await;
    }

    let names: Vec<String> = tokens.iter().map(|t| t.token_name.clone()).collect();
    page.show(
        &formatters::pick_liquidity_token(),
        keyboards::liquidity_token_picker(&names),
    )
    .await
}

pub async fn start_add_liquidity(page: &Page<'_>, index: usize) -> BotResult<()> {
    if !with_config(|c| c.liquidity.enabled) {
        return Err(BotError::Validation(
            "Liquidity pools are not available right now.".to_string(),
        ));
    }

    let token = page.token_at(index).await?;
    let wizard = LiquidityWizard::new(
        index,
        token.mint_address.clone(),
        token.symbol.clone(),
        token.decimals,
    );
    let prompt = wizard.first_prompt();

    page.state
        .sessions
        .put(page.session_key(), Conversation::AddLiquidity(wizard))
        .await;
    page.send(&prompt, Some(keyboards::wizard_cancel())).await
}

/// Show the pool summary and wait for ✅ / ❌
pub async fn confirm_pool(page: &Page<'_>, draft: LiquidityDraft) -> BotResult<()> {
    let token = page.token_by_mint(&draft.mint_address).await?;
    let text = formatters::liquidity_summary(&token, &draft.token_amount, &draft.sol_amount);

    page.state
        .sessions
        .put(page.session_key(), Conversation::PendingLiquidity(draft))
        .await;
    page.send(&text, Some(keyboards::confirm_pending())).await
}

pub async fn create_from_draft(page: &Page<'_>, draft: LiquidityDraft) -> BotResult<()> {
    let token = page.token_by_mint(&draft.mint_address).await?;

    let wallet = page.wallet().await?;
    let config = with_config(|c| c.liquidity.clone());

    page.show(formatters::PROCESSING_TRANSACTION, keyboards::back_to_liquidity())
        .await?;

    let pool = create_pool(
        &page.state.chain,
        page.state.store.as_ref(),
        &wallet,
        &token,
        &draft.token_amount,
        &draft.sol_amount,
        &config,
    )
    .await?;

    page.show(&formatters::pool_created(&pool), keyboards::back_to_liquidity())
        .await
}
