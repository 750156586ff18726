/// Mint / freeze authority inspection and revocation
use super::client::ChainClient;
use super::explorer::tx_link;
use super::wallet::CustodialWallet;
use crate::database::{AuthorityKind, Store};
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use spl_token::instruction::AuthorityType;
use spl_token::state::Mint;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct RevokedAuthority {
    pub kind: AuthorityKind,
    pub signature: Signature,
    pub tx_link: String,
}

/// Whether the authority is still set on the decoded mint
pub fn authority_enabled(mint: &Mint, kind: AuthorityKind) -> bool {
    match kind {
        AuthorityKind::Mint => mint.mint_authority.is_some(),
        AuthorityKind::Freeze => mint.freeze_authority.is_some(),
    }
}

pub async fn mint_authority_enabled(chain: &ChainClient, mint: &Pubkey) -> BotResult<bool> {
    Ok(authority_enabled(&chain.get_mint(mint).await?, AuthorityKind::Mint))
}

pub async fn freeze_authority_enabled(chain: &ChainClient, mint: &Pubkey) -> BotResult<bool> {
    Ok(authority_enabled(&chain.get_mint(mint).await?, AuthorityKind::Freeze))
}

pub fn parse_pubkey(value: &str) -> BotResult<Pubkey> {
    Pubkey::from_str(value.trim())
        .map_err(|_| BotError::Validation("Invalid Solana address.".to_string()))
}

/// `SetAuthority(None)` for the given authority
pub fn build_revoke_instruction(
    mint: &Pubkey,
    owner: &Pubkey,
    kind: AuthorityKind,
) -> BotResult<Instruction> {
    let authority_type = match kind {
        AuthorityKind::Mint => AuthorityType::MintTokens,
        AuthorityKind::Freeze => AuthorityType::FreezeAccount,
    };

    Ok(spl_token::instruction::set_authority(
        &spl_token::id(),
        mint,
        None,
        authority_type,
        owner,
        &[],
    )?)
}

/// Permanently remove an authority of a token owned by `wallet`
///
/// The on-chain state is authoritative: an authority that is already gone
/// yields `AlreadyRevoked` and the stored flag is brought in line.
pub async fn revoke_authority(
    chain: &ChainClient,
    store: &dyn Store,
    wallet: &CustodialWallet,
    mint_address: &str,
    kind: AuthorityKind,
) -> BotResult<RevokedAuthority> {
    let mint = parse_pubkey(mint_address)?;
    let tg_id = wallet.record.tg_id.as_str();

    let state = chain.get_mint(&mint).await?;
    if !authority_enabled(&state, kind) {
        store.set_token_authority(tg_id, mint_address, kind, false).await?;
        return Err(BotError::AlreadyRevoked {
            authority: kind.as_str().to_string(),
        });
    }

    let instruction = build_revoke_instruction(&mint, &wallet.pubkey(), kind)?;
    let signature = chain
        .send_and_confirm(&[instruction], &wallet.keypair, &[])
        .await?;

    store.set_token_authority(tg_id, mint_address, kind, false).await?;

    logger::info(
        LogTag::Token,
        &format!(
            "Revoked {} authority of {} for {}: {}",
            kind.as_str(),
            mint_address,
            tg_id,
            signature
        ),
    );

    Ok(RevokedAuthority {
        kind,
        signature,
        tx_link: tx_link(&signature.to_string(), chain.cluster()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_program::program_option::COption;

    #[test]
    fn test_authority_enabled() {
        let owner = Pubkey::new_unique();
        let mint = Mint {
            mint_authority: COption::Some(owner),
            supply: 10,
            decimals: 2,
            is_initialized: true,
            freeze_authority: COption::None,
        };
        assert!(authority_enabled(&mint, AuthorityKind::Mint));
        assert!(!authority_enabled(&mint, AuthorityKind::Freeze));
    }

    #[test]
    fn test_revoke_instruction() {
        let mint = Pubkey::new_unique();
        let owner = Pubkey::new_unique();
        let ix = build_revoke_instruction(&mint, &owner, AuthorityKind::Freeze).unwrap();

        assert_eq!(ix.program_id, spl_token::id());
        assert_eq!(ix.accounts[0].pubkey, mint);
        assert_eq!(ix.accounts[1].pubkey, owner);
        assert!(ix.accounts[1].is_signer);
        // SetAuthority tag, FreezeAccount, no new authority
        assert_eq!(ix.data, vec![6, 1, 0]);
    }

    #[test]
    fn test_parse_pubkey() {
        assert!(parse_pubkey("So11111111111111111111111111111111111111112").is_ok());
        assert!(matches!(
            parse_pubkey("not-an-address"),
            Err(BotError::Validation(_))
        ));
    }
}
