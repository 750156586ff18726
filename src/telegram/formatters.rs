//! Message bodies sent by the bot
//!
//! All text is Telegram HTML. Anything that came from a user (names,
//! descriptions, usernames) goes through `html_escape` first.

use crate::database::{AuthorityKind, LiquidityRecord, TokenRecord};
use crate::solana::authority::RevokedAuthority;
use crate::solana::burn::BurnReceipt;
use crate::solana::liquidity::CreatedPool;
use crate::solana::token::CreatedToken;

pub const PROCESSING_METADATA: &str = "⌛️ Please wait, your token metadata is being processed...";
pub const PROCESSING_TRANSACTION: &str = "⌛️ Please wait, your transaction is being processed...";
pub const WIZARD_CANCELLED: &str = "❌ Cancelled. Nothing was sent to the chain.";
pub const NOTHING_TO_CANCEL: &str = "There is nothing to cancel.";
pub const SESSION_EXPIRED: &str = "⌛️ That action expired. Please start again from the menu.";

/// Escape the three characters Telegram HTML cares about
pub fn html_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// DASHBOARD & WALLET
// ============================================================================

pub fn dashboard(first_name: &str, account: &str, balance_sol: Option<f64>) -> String {
    let mut text = format!(
        "Hi, <b>{}</b>. Welcome to Ziptos on Solana!\n\n\
         Your Solana Account:\n<code>{}</code>\n",
        html_escape(first_name),
        account
    );
    if let Some(balance) = balance_sol {
        text.push_str(&format!("\nBalance: <i>{}</i> SOL\n", format_sol(balance)));
    }
    text
}

pub fn wallet_info(account: &str, balance_sol: f64) -> String {
    format!(
        "Home > <b>Wallet Information</b>\n\n\
         Address:    |    <i>{}</i>  SOL\n<code>{}</code>\n",
        format_sol(balance_sol),
        account
    )
}

pub fn secret_key(bytes: &str, base58: &str) -> String {
    format!(
        "... Wallet Information > <b>Secret Key:</b>\n\n\
         <code>{}</code>\n\n\
         <b>Base58:</b>\n<code>{}</code>\n\n\
         <i>⚠️ Anyone holding this key controls the wallet. Delete this message after saving it.</i>",
        bytes, base58
    )
}

fn format_sol(balance: f64) -> String {
    let text = format!("{:.9}", balance);
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

// ============================================================================
// TOKENS
// ============================================================================

pub fn tokens_header() -> String {
    "Home > <b>Your Tokens:</b>\n\n".to_string()
}

pub fn no_tokens() -> String {
    "<i>🔴 No token found!</i>\n\nPlease create a new token...\n".to_string()
}

fn authority_status(enabled: bool) -> &'static str {
    if enabled {
        "🔵 Enabled"
    } else {
        "🔴 Disabled"
    }
}

pub fn token_detail(token: &TokenRecord) -> String {
    let mut text = format!(
        "<b>{} ({})</b>\n",
        html_escape(&token.token_name),
        html_escape(&token.symbol)
    );
    if !token.token_description.is_empty() {
        text.push_str(&format!("<i>({})</i>\n", html_escape(&token.token_description)));
    }
    text.push_str(&format!(
        "\n<b>Decimals:</b> <code>{}</code>\n\
         <b>Total Supply:</b> <code>{}</code>\n\
         <b>Mint Address:</b> <code>{}</code>\n\
         <b>Mint Authority:</b> {}\n\
         <b>Freeze Authority:</b> {}\n",
        token.decimals,
        token.total_supply,
        token.mint_address,
        authority_status(token.mint_authority),
        authority_status(token.freeze_authority),
    ));
    if token.logo_url.starts_with("http") {
        text.push_str(&format!("\n{}\n", html_escape(&token.logo_url)));
    }
    text
}

pub fn token_created(created: &CreatedToken) -> String {
    format!(
        "🎉🎉🎉 Token created successfully!🎉🎉🎉\n\
         Token address: <code>{}</code>\n\n\
         Link: <a href=\"{}\">{}</a>\n\
         TX: <a href=\"{}\">view transaction</a>",
        created.mint, created.mint_link, created.mint_link, created.tx_link
    )
}

/// Mint/freeze status of every token, shown before asking for an address
pub fn authority_overview(tokens: &[TokenRecord], kind: AuthorityKind) -> String {
    let mut text = "<b>Your Tokens:</b>\n\n".to_string();
    for token in tokens {
        let mark = if token.authority_enabled(kind) { "🔵" } else { "🔴" };
        text.push_str(&format!(
            "{} {}\n<code>{}</code>\n\n",
            mark,
            html_escape(&token.token_name),
            token.mint_address
        ));
    }
    text.push_str(&format!(
        "Please input the mint address of the token you want to disable {} for.",
        authority_noun(kind)
    ));
    text
}

fn authority_noun(kind: AuthorityKind) -> &'static str {
    match kind {
        AuthorityKind::Mint => "minting",
        AuthorityKind::Freeze => "freezing",
    }
}

pub fn confirm_revoke(token: &TokenRecord, kind: AuthorityKind) -> String {
    format!(
        "Disable {} for <b>{}</b>?\n\n{}",
        authority_noun(kind),
        html_escape(&token.token_name),
        confirm_action()
    )
}

pub fn confirm_action() -> String {
    "Are you sure you want to proceed with this action?\n\
     <i>Once you proceed, this action cannot be undone!</i>"
        .to_string()
}

pub fn authority_revoked(mint_address: &str, revoked: &RevokedAuthority) -> String {
    format!(
        "Token {} disabled successfully for:\n<code>{}</code>\n\n\
         TX: <a href=\"{}\">{}</a>",
        authority_noun(revoked.kind),
        mint_address,
        revoked.tx_link,
        revoked.signature
    )
}

// ============================================================================
// BURN
// ============================================================================

pub fn burn_summary(token: &TokenRecord, amount: &str) -> String {
    format!(
        "🔥 Burn <b>{} {}</b> of <b>{}</b>?\n\n{}",
        amount,
        html_escape(&token.symbol),
        html_escape(&token.token_name),
        confirm_action()
    )
}

pub fn tokens_burned(token: &TokenRecord, receipt: &BurnReceipt) -> String {
    format!(
        "🔥 Burned <b>{} {}</b> successfully.\n\
         Remaining in wallet: <code>{}</code>\n\n\
         TX: <a href=\"{}\">{}</a>",
        receipt.amount,
        html_escape(&token.symbol),
        receipt.remaining,
        receipt.tx_link,
        receipt.signature
    )
}

// ============================================================================
// LIQUIDITY
// ============================================================================

pub fn liquidity_header() -> String {
    "Home > <b>Your Liquidity Pools:</b>\n\n".to_string()
}

pub fn no_liquidity() -> String {
    "<i>🔴 No Liquidity Pool found!</i>\n\nPlease create a new LP...\n".to_string()
}

pub fn pick_liquidity_token() -> String {
    "Liquidity > <b>Choose a token to pair with SOL:</b>\n\n".to_string()
}

pub fn liquidity_detail(record: &LiquidityRecord) -> String {
    format!(
        "<b>{} / SOL</b>\n\n\
         <b>Pool:</b> <code>{}</code>\n\
         <b>LP Mint:</b> <code>{}</code>\n\
         <b>Token Mint:</b> <code>{}</code>\n\
         <b>Deposited:</b> <code>{}</code> tokens + <code>{}</code> SOL\n\
         <b>Created:</b> {}\n",
        html_escape(&record.token_name),
        record.pool_id,
        record.lp_mint,
        record.mint_address,
        record.token_amount,
        record.sol_amount,
        record.created_at.format("%Y-%m-%d %H:%M UTC"),
    )
}

pub fn liquidity_summary(token: &TokenRecord, token_amount: &str, sol_amount: &str) -> String {
    format!(
        "💎 Create a <b>{} / SOL</b> pool with <b>{} {}</b> and <b>{} SOL</b>?\n\n{}",
        html_escape(&token.token_name),
        token_amount,
        html_escape(&token.symbol),
        sol_amount,
        confirm_action()
    )
}

pub fn pool_created(pool: &CreatedPool) -> String {
    format!(
        "🎉 Liquidity pool created!\n\
         Pool: <code>{}</code>\n\n\
         Link: <a href=\"{}\">{}</a>\n\
         TX: <a href=\"{}\">view transaction</a>",
        pool.record.pool_id, pool.pool_link, pool.pool_link, pool.tx_link
    )
}

// ============================================================================
// HELP, FAQ, SUPPORT
// ============================================================================

pub fn help() -> String {
    "Here are the commands you can use:\n\n\
     /start - Start the bot and get your Solana account info\n\
     /help - Get this help message\n\
     /wallet - Show your wallet and balance\n\
     /tokens - List the tokens you created\n\
     /cancel - Abort the current form\n"
        .to_string()
}

pub fn faq(min_balance_sol: f64) -> String {
    format!(
        "Home > <b>FAQ</b>\n\n\
         <b>What is my wallet?</b>\n\
         A Solana account created for you on first use. Fund it with SOL to pay fees.\n\n\
         <b>How much SOL do I need to create a token?</b>\n\
         At least {} SOL in the wallet.\n\n\
         <b>What does disabling mint or freeze do?</b>\n\
         It removes that authority forever. Nobody can mint more supply or freeze holders afterwards.\n\n\
         <b>Can I export my wallet?</b>\n\
         Yes, open Wallet > Secret Key and import it in any Solana wallet.",
        min_balance_sol
    )
}

pub fn support(contact: &str) -> String {
    if contact.is_empty() {
        "Home > <b>Support</b>\n\nReply here with /help to see what the bot can do.".to_string()
    } else {
        format!(
            "Home > <b>Support</b>\n\nReach the team at {}.",
            html_escape(contact)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn token() -> TokenRecord {
        TokenRecord {
            tg_id: "1".into(),
            token_name: "Moon <b>".into(),
            symbol: "MN".into(),
            decimals: 6,
            total_supply: 1_000_000,
            token_description: "to & fro".into(),
            mint_address: "Mint111".into(),
            logo_url: "AgACAgIAAx".into(),
            metadata_uri: String::new(),
            mint_authority: true,
            freeze_authority: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<a & b>"), "&lt;a &amp; b&gt;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_token_detail_escapes_and_shows_supply() {
        let text = token_detail(&token());
        assert!(text.contains("Moon &lt;b&gt;"));
        assert!(text.contains("to &amp; fro"));
        assert!(text.contains("<code>1000000</code>"));
        assert!(text.contains("<b>Freeze Authority:</b> 🔴 Disabled"));
        // Telegram file ids are not links
        assert!(!text.contains("AgACAgIAAx"));
    }

    #[test]
    fn test_dashboard_balance_optional() {
        let without = dashboard("Ann", "Acc1", None);
        assert!(without.starts_with("Hi, <b>Ann</b>. Welcome to Ziptos on Solana!"));
        assert!(!without.contains("Balance"));

        let with = dashboard("Ann", "Acc1", Some(1.5));
        assert!(with.contains("<i>1.5</i> SOL"));
    }

    #[test]
    fn test_format_sol() {
        assert_eq!(format_sol(0.0), "0");
        assert_eq!(format_sol(2.0), "2");
        assert_eq!(format_sol(0.000000001), "0.000000001");
    }

    #[test]
    fn test_authority_overview() {
        let text = authority_overview(&[token()], AuthorityKind::Freeze);
        assert!(text.contains("🔴 Moon &lt;b&gt;"));
        assert!(text.ends_with("disable freezing for."));
    }
}
