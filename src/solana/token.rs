/// SPL token creation with Metaplex metadata
use super::amounts::supply_to_base_units;
use super::client::ChainClient;
use super::explorer::{address_link, tx_link};
use super::wallet::CustodialWallet;
use crate::database::{Store, TokenRecord};
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use chrono::Utc;
use mpl_token_metadata::accounts::Metadata;
use mpl_token_metadata::instructions::CreateMetadataAccountV3Builder;
use mpl_token_metadata::types::DataV2;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::system_instruction;
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use spl_token::state::Mint;

/// Metaplex on-chain limits
pub const MAX_NAME_LENGTH: usize = 32;
pub const MAX_URI_LENGTH: usize = 200;

/// Everything the token wizard collected
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTokenRequest {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Whole tokens
    pub supply: u64,
    pub description: String,
    pub logo_url: String,
    pub metadata_uri: String,
}

#[derive(Debug, Clone)]
pub struct CreatedToken {
    pub record: TokenRecord,
    pub mint: Pubkey,
    pub token_account: Pubkey,
    pub signature: Signature,
    pub mint_link: String,
    pub tx_link: String,
}

/// Fail with `InsufficientBalance` unless `available` covers `needed`
pub fn ensure_balance(needed_sol: f64, available_sol: f64) -> BotResult<()> {
    if available_sol < needed_sol {
        return Err(BotError::InsufficientBalance {
            needed: needed_sol,
            available: available_sol,
        });
    }
    Ok(())
}

/// Instructions that create the mint, the owner's token account, mint the
/// whole supply to it and attach Metaplex metadata
pub fn build_create_token_instructions(
    payer: &Pubkey,
    mint: &Pubkey,
    mint_rent: u64,
    request: &CreateTokenRequest,
) -> BotResult<Vec<Instruction>> {
    let base_units = supply_to_base_units(request.supply, request.decimals).ok_or_else(|| {
        BotError::Validation("The total supply is too large for this many decimals.".to_string())
    })?;

    if request.metadata_uri.len() > MAX_URI_LENGTH {
        return Err(BotError::Token(format!(
            "Metadata uri longer than {} bytes",
            MAX_URI_LENGTH
        )));
    }

    let token_account = get_associated_token_address(payer, mint);
    let (metadata, _) = Metadata::find_pda(mint);

    let create_mint_account = system_instruction::create_account(
        payer,
        mint,
        mint_rent,
        Mint::LEN as u64,
        &spl_token::id(),
    );

    let initialize_mint = spl_token::instruction::initialize_mint2(
        &spl_token::id(),
        mint,
        payer,
        Some(payer),
        request.decimals,
    )?;

    let create_token_account =
        create_associated_token_account_idempotent(payer, payer, mint, &spl_token::id());

    let mint_supply = spl_token::instruction::mint_to(
        &spl_token::id(),
        mint,
        &token_account,
        payer,
        &[],
        base_units,
    )?;

    let create_metadata = CreateMetadataAccountV3Builder::new()
        .metadata(metadata)
        .mint(*mint)
        .mint_authority(*payer)
        .payer(*payer)
        .update_authority(*payer, true)
        .data(DataV2 {
            name: request.name.clone(),
            symbol: request.symbol.clone(),
            uri: request.metadata_uri.clone(),
            seller_fee_basis_points: 0,
            creators: None,
            collection: None,
            uses: None,
        })
        .is_mutable(true)
        .instruction();

    Ok(vec![
        create_mint_account,
        initialize_mint,
        create_token_account,
        mint_supply,
        create_metadata,
    ])
}

/// Deploy a new token owned by `wallet` and record it
pub async fn create_token(
    chain: &ChainClient,
    store: &dyn Store,
    wallet: &CustodialWallet,
    request: &CreateTokenRequest,
    min_balance_sol: f64,
) -> BotResult<CreatedToken> {
    let payer = wallet.pubkey();

    let balance = chain.get_balance_sol(&payer).await?;
    ensure_balance(min_balance_sol, balance)?;

    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    let mint_rent = chain.get_minimum_balance_for_rent_exemption(Mint::LEN).await?;

    let instructions = build_create_token_instructions(&payer, &mint, mint_rent, request)?;

    logger::info(
        LogTag::Token,
        &format!(
            "Creating token {} ({}) mint {} for {}",
            request.name, request.symbol, mint, wallet.record.tg_id
        ),
    );

    let signature = chain
        .send_and_confirm(&instructions, &wallet.keypair, &[&mint_keypair])
        .await?;

    let record = TokenRecord {
        tg_id: wallet.record.tg_id.clone(),
        token_name: request.name.clone(),
        symbol: request.symbol.clone(),
        decimals: request.decimals,
        total_supply: request.supply,
        token_description: request.description.clone(),
        mint_address: mint.to_string(),
        logo_url: request.logo_url.clone(),
        metadata_uri: request.metadata_uri.clone(),
        mint_authority: true,
        freeze_authority: true,
        created_at: Utc::now(),
    };
    store.insert_token(&record).await?;

    logger::info(
        LogTag::Token,
        &format!("Token {} created, signature {}", mint, signature),
    );

    Ok(CreatedToken {
        record,
        mint,
        token_account: get_associated_token_address(&payer, &mint),
        signature,
        mint_link: address_link(&mint.to_string(), chain.cluster()),
        tx_link: tx_link(&signature.to_string(), chain.cluster()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateTokenRequest {
        CreateTokenRequest {
            name: "Moon Coin".to_string(),
            symbol: "MOON".to_string(),
            decimals: 6,
            supply: 1_000_000,
            description: "to the moon".to_string(),
            logo_url: "https://gateway.pinata.cloud/ipfs/logo".to_string(),
            metadata_uri: "https://gateway.pinata.cloud/ipfs/meta".to_string(),
        }
    }

    #[test]
    fn test_ensure_balance() {
        assert!(ensure_balance(0.5, 0.5).is_ok());
        assert!(matches!(
            ensure_balance(0.5, 0.49),
            Err(BotError::InsufficientBalance { .. })
        ));
    }

    #[test]
    fn test_instruction_layout() {
        let payer = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let instructions = build_create_token_instructions(&payer, &mint, 1_461_600, &request())
            .unwrap();

        assert_eq!(instructions.len(), 5);
        assert_eq!(instructions[1].program_id, spl_token::id());
        assert_eq!(instructions[2].program_id, spl_associated_token_account::id());
        assert_eq!(instructions[4].program_id, mpl_token_metadata::ID);

        // mint_to: tag 7 followed by the amount in base units
        let mint_to = &instructions[3];
        assert_eq!(mint_to.data[0], 7);
        let amount = u64::from_le_bytes(mint_to.data[1..9].try_into().unwrap());
        assert_eq!(amount, 1_000_000_000_000);
    }

    #[test]
    fn test_supply_overflow_is_rejected() {
        let mut req = request();
        req.supply = u64::MAX / 10;
        let result =
            build_create_token_instructions(&Pubkey::new_unique(), &Pubkey::new_unique(), 0, &req);
        assert!(matches!(result, Err(BotError::Validation(_))));
    }
}
