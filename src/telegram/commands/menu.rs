//! Dashboard, help, FAQ and support pages

use super::Page;
use crate::config::with_config;
use crate::errors::BotResult;
use crate::logger::{self, LogTag};
use crate::telegram::{formatters, keyboards};

/// Greeting with the user's account, creating the wallet on first contact
pub async fn show_dashboard(page: &Page<'_>) -> BotResult<()> {
    let wallet = page.wallet().await?;

    let balance = match page.state.chain.get_balance_sol(&wallet.pubkey()).await {
        Ok(balance) => Some(balance),
        Err(e) => {
            logger::warning(
                LogTag::Rpc,
                &format!("Balance lookup failed for {}: {}", wallet.record.account, e),
            );
            None
        }
    };

    let text = formatters::dashboard(&page.first_name, &wallet.record.account, balance);
    page.show(&text, keyboards::dashboard()).await
}

pub async fn show_help(page: &Page<'_>) -> BotResult<()> {
    page.show(&formatters::help(), keyboards::help()).await
}

pub async fn show_faq(page: &Page<'_>) -> BotResult<()> {
    let min_balance = with_config(|c| c.solana.min_token_creation_balance_sol);
    page.show(&formatters::faq(min_balance), keyboards::back_home())
        .await
}

pub async fn show_support(page: &Page<'_>) -> BotResult<()> {
    let contact = with_config(|c| c.telegram.support_contact.clone());
    page.show(&formatters::support(&contact), keyboards::back_home())
        .await
}
