//! Token pages: list, detail, creation, authority revocation and burning

use super::Page;
use crate::config::with_config;
use crate::database::{AuthorityKind, TokenRecord};
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use crate::solana::authority::{self, parse_pubkey};
use crate::solana::burn::burn_tokens;
use crate::solana::explorer::address_link;
use crate::solana::token::{create_token, ensure_balance, CreateTokenRequest};
use crate::telegram::session::Conversation;
use crate::telegram::wizards::{BurnDraft, BurnWizard, TokenDraft, TokenWizard};
use crate::telegram::{formatters, keyboards};
use crate::upload::select_logo_photo;

pub async fn show_tokens(page: &Page<'_>) -> BotResult<()> {
    let tokens = page.tokens().await?;
    if tokens.is_empty() {
        return page
            .show(&formatters::no_tokens(), keyboards::no_tokens())
            .await;
    }

    let names: Vec<String> = tokens.iter().map(|t| t.token_name.clone()).collect();
    page.show(&formatters::tokens_header(), keyboards::token_list(&names))
        .await
}

pub async fn show_token_detail(page: &Page<'_>, index: usize) -> BotResult<()> {
    let token = page.token_at(index).await?;
    let explorer = address_link(&token.mint_address, page.state.chain.cluster());
    page.show(
        &formatters::token_detail(&token),
        keyboards::token_detail(index, token.mint_authority, token.freeze_authority, &explorer),
    )
    .await
}

// ============================================================================
// CREATION
// ============================================================================

/// Open the creation form after checking the wallet can pay for it
pub async fn start_create_token(page: &Page<'_>) -> BotResult<()> {
    let wallet = page.wallet().await?;
    let min_balance = with_config(|c| c.solana.min_token_creation_balance_sol);
    let balance = page.state.chain.get_balance_sol(&wallet.pubkey()).await?;
    ensure_balance(min_balance, balance)?;

    page.state
        .sessions
        .put(page.session_key(), Conversation::CreateToken(TokenWizard::new()))
        .await;
    page.send(TokenWizard::first_prompt(), Some(keyboards::wizard_cancel()))
        .await
}

/// Upload the logo and metadata, then deploy the token
pub async fn create_from_draft(page: &Page<'_>, draft: TokenDraft) -> BotResult<()> {
    page.send(formatters::PROCESSING_METADATA, None).await?;

    let uploader = &page.state.uploader;
    let photo = select_logo_photo(&draft.photos, uploader.logo_min_width()).ok_or_else(|| {
        BotError::Validation("Please upload the logo as a photo.".to_string())
    })?;
    let assets = uploader
        .upload_token_assets(photo, &draft.name, &draft.symbol, &draft.description)
        .await?;

    let request = CreateTokenRequest {
        name: draft.name,
        symbol: draft.symbol,
        decimals: draft.decimals,
        supply: draft.supply,
        description: draft.description,
        logo_url: assets.logo_url,
        metadata_uri: assets.metadata_uri,
    };

    let wallet = page.wallet().await?;
    let min_balance = with_config(|c| c.solana.min_token_creation_balance_sol);
    let created = create_token(
        &page.state.chain,
        page.state.store.as_ref(),
        &wallet,
        &request,
        min_balance,
    )
    .await?;

    page.send(
        &formatters::token_created(&created),
        Some(keyboards::back_to_tokens()),
    )
    .await
}

// ============================================================================
// AUTHORITIES
// ============================================================================

/// Tapping a 🔵/🔴 button: ask for confirmation while the authority is held
///
/// An authority already gone on-chain only brings the stored flag in line.
pub async fn toggle_authority(page: &Page<'_>, index: usize, kind: AuthorityKind) -> BotResult<()> {
    let token = page.token_at(index).await?;
    let mint = parse_pubkey(&token.mint_address)?;

    let enabled = match kind {
        AuthorityKind::Mint => authority::mint_authority_enabled(&page.state.chain, &mint).await?,
        AuthorityKind::Freeze => {
            authority::freeze_authority_enabled(&page.state.chain, &mint).await?
        }
    };

    if enabled {
        return ask_revoke(page, index, &token, kind).await;
    }

    if token.authority_enabled(kind) {
        page.state
            .store
            .set_token_authority(&page.owner_id(), &token.mint_address, kind, false)
            .await?;
        logger::info(
            LogTag::Token,
            &format!(
                "Synced revoked {} authority of {}",
                kind.as_str(),
                token.mint_address
            ),
        );
    }

    show_token_detail(page, index).await?;
    let notice = BotError::AlreadyRevoked {
        authority: kind.as_str().to_string(),
    };
    page.send(&notice.user_message(), None).await
}

pub async fn ask_revoke(
    page: &Page<'_>,
    index: usize,
    token: &TokenRecord,
    kind: AuthorityKind,
) -> BotResult<()> {
    page.show(
        &formatters::confirm_revoke(token, kind),
        keyboards::confirm_revoke(index, kind),
    )
    .await
}

pub async fn revoke(page: &Page<'_>, index: usize, kind: AuthorityKind) -> BotResult<()> {
    let token = page.token_at(index).await?;
    let wallet = page.wallet().await?;

    page.show(formatters::PROCESSING_TRANSACTION, keyboards::back_to_token(index))
        .await?;

    let revoked = authority::revoke_authority(
        &page.state.chain,
        page.state.store.as_ref(),
        &wallet,
        &token.mint_address,
        kind,
    )
    .await?;

    page.show(
        &formatters::authority_revoked(&token.mint_address, &revoked),
        keyboards::back_to_token(index),
    )
    .await
}

/// List authority status and wait for a typed mint address
pub async fn start_revoke_by_address(page: &Page<'_>, kind: AuthorityKind) -> BotResult<()> {
    let tokens = page.tokens().await?;
    if tokens.is_empty() {
        return page
            .show(&formatters::no_tokens(), keyboards::no_tokens())
            .await;
    }

    page.state
        .sessions
        .put(page.session_key(), Conversation::RevokeByAddress(kind))
        .await;
    page.show(
        &formatters::authority_overview(&tokens, kind),
        keyboards::wizard_cancel(),
    )
    .await
}

// ============================================================================
// BURN
// ============================================================================

pub async fn start_burn(page: &Page<'_>, index: usize) -> BotResult<()> {
    let token = page.token_at(index).await?;
    let wizard = BurnWizard::new(
        index,
        token.mint_address.clone(),
        token.symbol.clone(),
        token.decimals,
    );
    let prompt = wizard.first_prompt();

    page.state
        .sessions
        .put(page.session_key(), Conversation::Burn(wizard))
        .await;
    page.send(&prompt, Some(keyboards::wizard_cancel())).await
}

/// Show the burn summary and wait for ✅ / ❌
pub async fn confirm_burn(page: &Page<'_>, draft: BurnDraft) -> BotResult<()> {
    let token = page.token_by_mint(&draft.mint_address).await?;
    let text = formatters::burn_summary(&token, &draft.amount);

    page.state
        .sessions
        .put(page.session_key(), Conversation::PendingBurn(draft))
        .await;
    page.send(&text, Some(keyboards::confirm_pending())).await
}

pub async fn burn_from_draft(page: &Page<'_>, draft: BurnDraft) -> BotResult<()> {
    let token = page.token_by_mint(&draft.mint_address).await?;

    let mint = parse_pubkey(&token.mint_address)?;
    let wallet = page.wallet().await?;

    page.show(formatters::PROCESSING_TRANSACTION, keyboards::back_to_token(draft.token_index))
        .await?;

    let receipt = burn_tokens(&page.state.chain, &wallet, &mint, &draft.amount).await?;

    page.show(
        &formatters::tokens_burned(&token, &receipt),
        keyboards::back_to_token(draft.token_index),
    )
    .await
}
