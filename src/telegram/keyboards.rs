//! Inline keyboard builders for Ziptos
//!
//! Every button carries a `CallbackAction`; nothing here builds callback
//! strings by hand.

use super::actions::CallbackAction;
use crate::database::AuthorityKind;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

// === HELPER FUNCTIONS ===

/// Create a callback button
fn btn(text: &str, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton::callback(text.to_string(), action.data())
}

/// Create a URL button (returns a no-op callback button if the URL is invalid)
fn url_btn(text: &str, url: &str) -> InlineKeyboardButton {
    match url.parse() {
        Ok(parsed_url) => InlineKeyboardButton::url(text.to_string(), parsed_url),
        Err(_) => btn(text, CallbackAction::Noop),
    }
}

/// Two buttons per row, one per list entry
fn two_per_row(
    names: &[String],
    prefix: &str,
    action: impl Fn(usize) -> CallbackAction,
) -> Vec<Vec<InlineKeyboardButton>> {
    names
        .chunks(2)
        .enumerate()
        .map(|(row, chunk)| {
            chunk
                .iter()
                .enumerate()
                .map(|(col, name)| btn(&format!("{} {}", prefix, name), action(row * 2 + col)))
                .collect()
        })
        .collect()
}

fn home_btn() -> InlineKeyboardButton {
    btn("🏘 Home", CallbackAction::Dashboard)
}

// === MENUS ===

pub fn dashboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn("💫 Refresh Balance", CallbackAction::RefreshBalance)],
        vec![btn("🗝 Wallet", CallbackAction::Wallet)],
        vec![btn("💰 Your Tokens", CallbackAction::Tokens)],
        vec![btn("💎 Liquidity", CallbackAction::Liquidities)],
        vec![
            btn("❔ FAQ", CallbackAction::Faq),
            btn("💬 Support", CallbackAction::Support),
        ],
    ])
}

pub fn help() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn("🏠 Go to Dashboard", CallbackAction::Dashboard)],
        vec![btn("💬 Contact Support", CallbackAction::Support)],
    ])
}

pub fn back_home() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![home_btn()]])
}

// === WALLET ===

pub fn wallet(explorer_url: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![
            home_btn(),
            btn("🔐 Secret Key", CallbackAction::SecretKey),
        ],
        vec![
            btn("💫 Refresh", CallbackAction::Wallet),
            url_btn("🔎 Explorer", explorer_url),
        ],
    ])
}

pub fn secret_key() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("🔙 Done", CallbackAction::Wallet)]])
}

// === TOKENS ===

/// Token list: `💵 <name>` buttons, two per row
pub fn token_list(names: &[String]) -> InlineKeyboardMarkup {
    let mut rows = two_per_row(names, "💵", CallbackAction::TokenDetail);

    if !names.is_empty() {
        rows.push(vec![
            btn(
                "🔒 Disable Mint by Address",
                CallbackAction::RevokeByAddress(AuthorityKind::Mint),
            ),
            btn(
                "🧊 Disable Freeze by Address",
                CallbackAction::RevokeByAddress(AuthorityKind::Freeze),
            ),
        ]);
    }

    rows.push(vec![
        home_btn(),
        btn("🌟 Create Token", CallbackAction::CreateToken),
    ]);
    InlineKeyboardMarkup::new(rows)
}

fn authority_label(kind: AuthorityKind, enabled: bool) -> String {
    let name = match kind {
        AuthorityKind::Mint => "Mint",
        AuthorityKind::Freeze => "Freeze",
    };
    if enabled {
        format!("🔵 {} Enabled", name)
    } else {
        format!("🔴 {} Disabled", name)
    }
}

pub fn token_detail(
    index: usize,
    mint_enabled: bool,
    freeze_enabled: bool,
    explorer_url: &str,
) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![btn(
            &authority_label(AuthorityKind::Mint, mint_enabled),
            CallbackAction::ToggleAuthority(index, AuthorityKind::Mint),
        )],
        vec![btn(
            &authority_label(AuthorityKind::Freeze, freeze_enabled),
            CallbackAction::ToggleAuthority(index, AuthorityKind::Freeze),
        )],
        vec![
            btn("💧 Add Liquidity", CallbackAction::AddLiquidity(index)),
            btn("🔥 Burn Token", CallbackAction::BurnToken(index)),
        ],
        vec![
            btn("🔙 Back", CallbackAction::Tokens),
            url_btn("🔎 Explorer", explorer_url),
        ],
    ])
}

pub fn no_tokens() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        home_btn(),
        btn("🌟 Create Token", CallbackAction::CreateToken),
    ]])
}

pub fn back_to_tokens() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("🔙 Go Back to Token", CallbackAction::Tokens)]])
}

pub fn back_to_token(index: usize) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn("🔙 Back", CallbackAction::TokenDetail(index)),
        btn("💰 Your Tokens", CallbackAction::Tokens),
    ]])
}

// === LIQUIDITY ===

pub fn liquidity_list(names: &[String]) -> InlineKeyboardMarkup {
    let mut rows = two_per_row(names, "💧", CallbackAction::LiquidityDetail);
    rows.push(vec![
        home_btn(),
        btn("💎 Add Liquidity", CallbackAction::PickLiquidityToken),
    ]);
    InlineKeyboardMarkup::new(rows)
}

/// Choose which token a new pool pairs with SOL
pub fn liquidity_token_picker(names: &[String]) -> InlineKeyboardMarkup {
    let mut rows = two_per_row(names, "💵", CallbackAction::AddLiquidity);
    rows.push(vec![btn("🔙 Back", CallbackAction::Liquidities)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn liquidity_detail(pool_url: &str) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![url_btn("🔎 View Pool", pool_url)],
        vec![btn("🔙 Back", CallbackAction::Liquidities), home_btn()],
    ])
}

pub fn back_to_liquidity() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("🔙 Back", CallbackAction::Liquidities)]])
}

// === CONFIRMATIONS & WIZARDS ===

pub fn confirm_revoke(index: usize, kind: AuthorityKind) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn("✅ Sure", CallbackAction::ConfirmRevoke(index, kind)),
        btn("❌ No", CallbackAction::CancelRevoke(index)),
    ]])
}

pub fn confirm_pending() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        btn("✅ Sure", CallbackAction::ConfirmPending),
        btn("❌ No", CallbackAction::CancelWizard),
    ]])
}

pub fn wizard_cancel() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![btn("❌ Cancel", CallbackAction::CancelWizard)]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_token_list_layout() {
        let names: Vec<String> = ["A", "B", "C"].iter().map(|s| s.to_string()).collect();
        let markup = token_list(&names);

        assert_eq!(markup.inline_keyboard[0].len(), 2);
        assert_eq!(markup.inline_keyboard[1].len(), 1);
        assert_eq!(markup.inline_keyboard[0][1].text, "💵 B");
        assert_eq!(
            callback_data(&markup)[2],
            CallbackAction::TokenDetail(2).data()
        );
    }

    #[test]
    fn test_token_detail_labels() {
        let markup = token_detail(4, true, false, "https://explorer.solana.com/address/x");
        assert_eq!(markup.inline_keyboard[0][0].text, "🔵 Mint Enabled");
        assert_eq!(markup.inline_keyboard[1][0].text, "🔴 Freeze Disabled");
    }

    #[test]
    fn test_callback_data_fits_telegram_limit() {
        let names: Vec<String> = (0..40).map(|i| format!("Token {}", i)).collect();
        let markups = vec![
            dashboard(),
            help(),
            wallet("https://explorer.solana.com"),
            secret_key(),
            token_list(&names),
            token_detail(usize::MAX, true, true, "bad url"),
            liquidity_list(&names),
            liquidity_token_picker(&names),
            confirm_revoke(usize::MAX, AuthorityKind::Freeze),
            confirm_pending(),
            wizard_cancel(),
        ];

        for markup in &markups {
            for data in callback_data(markup) {
                assert!(data.len() <= 64, "{} is too long", data);
                assert!(CallbackAction::parse(&data).is_some(), "{} does not parse", data);
            }
        }
    }
}
