//! Wallet information and secret key export

use super::Page;
use crate::errors::BotResult;
use crate::solana::explorer::address_link;
use crate::solana::wallet::{secret_key_base58, secret_key_bytes_display};
use crate::telegram::{formatters, keyboards};

pub async fn show_wallet(page: &Page<'_>) -> BotResult<()> {
    let wallet = page.wallet().await?;
    let balance = page.state.chain.get_balance_sol(&wallet.pubkey()).await?;

    let text = formatters::wallet_info(&wallet.record.account, balance);
    let explorer = address_link(&wallet.record.account, page.state.chain.cluster());
    page.show(&text, keyboards::wallet(&explorer)).await
}

pub async fn show_secret_key(page: &Page<'_>) -> BotResult<()> {
    let wallet = page.wallet().await?;
    let text = formatters::secret_key(
        &secret_key_bytes_display(&wallet.record),
        &secret_key_base58(&wallet.record),
    );
    page.show(&text, keyboards::secret_key()).await
}
