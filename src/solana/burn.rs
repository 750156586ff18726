/// Burning tokens from the owner's associated token account
use super::amounts::{format_ui_amount, parse_positive_amount};
use super::client::ChainClient;
use super::explorer::tx_link;
use super::wallet::CustodialWallet;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use spl_associated_token_account::get_associated_token_address;

#[derive(Debug, Clone)]
pub struct BurnReceipt {
    pub amount: String,
    pub remaining: String,
    pub signature: Signature,
    pub tx_link: String,
}

pub fn build_burn_instruction(
    owner: &Pubkey,
    mint: &Pubkey,
    amount: u64,
    decimals: u8,
) -> BotResult<Instruction> {
    let source = get_associated_token_address(owner, mint);
    Ok(spl_token::instruction::burn_checked(
        &spl_token::id(),
        &source,
        mint,
        owner,
        &[],
        amount,
        decimals,
    )?)
}

/// Burn `amount` whole tokens (decimal string) held by `wallet`
pub async fn burn_tokens(
    chain: &ChainClient,
    wallet: &CustodialWallet,
    mint: &Pubkey,
    amount: &str,
) -> BotResult<BurnReceipt> {
    let owner = wallet.pubkey();
    let decimals = chain.get_mint(mint).await?.decimals;

    let units = parse_positive_amount(amount, decimals).ok_or_else(|| {
        BotError::Validation(format!(
            "Invalid amount. Use a positive number with at most {} decimals.",
            decimals
        ))
    })?;

    let balance = chain.token_balance(&owner, mint).await?;
    if balance < units {
        return Err(BotError::InsufficientTokens {
            needed: format_ui_amount(units, decimals),
            available: format_ui_amount(balance, decimals),
        });
    }

    let instruction = build_burn_instruction(&owner, mint, units, decimals)?;
    let signature = chain
        .send_and_confirm(&[instruction], &wallet.keypair, &[])
        .await?;

    logger::info(
        LogTag::Token,
        &format!(
            "Burned {} of {} for {}: {}",
            format_ui_amount(units, decimals),
            mint,
            wallet.record.tg_id,
            signature
        ),
    );

    Ok(BurnReceipt {
        amount: format_ui_amount(units, decimals),
        remaining: format_ui_amount(balance - units, decimals),
        signature,
        tx_link: tx_link(&signature.to_string(), chain.cluster()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burn_instruction() {
        let owner = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let ix = build_burn_instruction(&owner, &mint, 2_500, 3).unwrap();

        assert_eq!(ix.accounts[0].pubkey, get_associated_token_address(&owner, &mint));
        assert_eq!(ix.accounts[1].pubkey, mint);
        // BurnChecked tag 15, amount, decimals
        assert_eq!(ix.data[0], 15);
        assert_eq!(u64::from_le_bytes(ix.data[1..9].try_into().unwrap()), 2_500);
        assert_eq!(ix.data[9], 3);
    }
}
