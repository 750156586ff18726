/// SOL/token pool creation on Raydium's constant-product AMM (CPMM)
///
/// The `initialize` instruction is assembled by hand: Anchor discriminator,
/// then `init_amount_0`, `init_amount_1` and `open_time` as little-endian u64.
use super::amounts::{format_ui_amount, lamports_to_sol, parse_positive_amount, SOL_DECIMALS};
use super::client::ChainClient;
use super::explorer::{address_link, tx_link};
use super::wallet::CustodialWallet;
use crate::config::LiquidityConfig;
use crate::database::{LiquidityRecord, Store, TokenRecord};
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use chrono::Utc;
use sha2::{Digest, Sha256};
use solana_sdk::compute_budget::ComputeBudgetInstruction;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Signature;
use solana_sdk::{system_instruction, system_program, sysvar};
use spl_associated_token_account::get_associated_token_address;
use spl_associated_token_account::instruction::create_associated_token_account_idempotent;
use std::str::FromStr;

const AUTH_SEED: &[u8] = b"vault_and_lp_mint_auth_seed";
const POOL_SEED: &[u8] = b"pool";
const POOL_LP_MINT_SEED: &[u8] = b"pool_lp_mint";
const POOL_VAULT_SEED: &[u8] = b"pool_vault";
const OBSERVATION_SEED: &[u8] = b"observation";

/// Every account the CPMM `initialize` instruction touches
#[derive(Debug, Clone, PartialEq)]
pub struct CpmmPoolAccounts {
    pub program_id: Pubkey,
    pub amm_config: Pubkey,
    pub authority: Pubkey,
    pub pool_state: Pubkey,
    pub token_0_mint: Pubkey,
    pub token_1_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub creator_token_0: Pubkey,
    pub creator_token_1: Pubkey,
    pub creator_lp_token: Pubkey,
    pub token_0_vault: Pubkey,
    pub token_1_vault: Pubkey,
    pub create_pool_fee: Pubkey,
    pub observation_state: Pubkey,
}

#[derive(Debug, Clone)]
pub struct CreatedPool {
    pub record: LiquidityRecord,
    pub pool_link: String,
    pub tx_link: String,
}

/// sha256("global:initialize")[..8]
pub fn initialize_discriminator() -> [u8; 8] {
    let hash = Sha256::digest(b"global:initialize");
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

/// Order two mints the way the program expects (token_0 < token_1)
pub fn sort_mints(a: Pubkey, b: Pubkey) -> (Pubkey, Pubkey) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Derive the pool PDAs for `mint_a`/`mint_b` created by `creator`
pub fn derive_pool_accounts(
    program_id: &Pubkey,
    amm_config: &Pubkey,
    create_pool_fee: &Pubkey,
    creator: &Pubkey,
    mint_a: Pubkey,
    mint_b: Pubkey,
) -> CpmmPoolAccounts {
    let (token_0_mint, token_1_mint) = sort_mints(mint_a, mint_b);

    let (authority, _) = Pubkey::find_program_address(&[AUTH_SEED], program_id);
    let (pool_state, _) = Pubkey::find_program_address(
        &[
            POOL_SEED,
            amm_config.as_ref(),
            token_0_mint.as_ref(),
            token_1_mint.as_ref(),
        ],
        program_id,
    );
    let (lp_mint, _) =
        Pubkey::find_program_address(&[POOL_LP_MINT_SEED, pool_state.as_ref()], program_id);
    let (token_0_vault, _) = Pubkey::find_program_address(
        &[POOL_VAULT_SEED, pool_state.as_ref(), token_0_mint.as_ref()],
        program_id,
    );
    let (token_1_vault, _) = Pubkey::find_program_address(
        &[POOL_VAULT_SEED, pool_state.as_ref(), token_1_mint.as_ref()],
        program_id,
    );
    let (observation_state, _) =
        Pubkey::find_program_address(&[OBSERVATION_SEED, pool_state.as_ref()], program_id);

    CpmmPoolAccounts {
        program_id: *program_id,
        amm_config: *amm_config,
        authority,
        pool_state,
        token_0_mint,
        token_1_mint,
        lp_mint,
        creator_token_0: get_associated_token_address(creator, &token_0_mint),
        creator_token_1: get_associated_token_address(creator, &token_1_mint),
        creator_lp_token: get_associated_token_address(creator, &lp_mint),
        token_0_vault,
        token_1_vault,
        create_pool_fee: *create_pool_fee,
        observation_state,
    }
}

pub fn build_initialize_instruction(
    accounts: &CpmmPoolAccounts,
    creator: &Pubkey,
    init_amount_0: u64,
    init_amount_1: u64,
    open_time: u64,
) -> Instruction {
    let metas = vec![
        AccountMeta::new(*creator, true),
        AccountMeta::new_readonly(accounts.amm_config, false),
        AccountMeta::new_readonly(accounts.authority, false),
        AccountMeta::new(accounts.pool_state, false),
        AccountMeta::new_readonly(accounts.token_0_mint, false),
        AccountMeta::new_readonly(accounts.token_1_mint, false),
        AccountMeta::new(accounts.lp_mint, false),
        AccountMeta::new(accounts.creator_token_0, false),
        AccountMeta::new(accounts.creator_token_1, false),
        AccountMeta::new(accounts.creator_lp_token, false),
        AccountMeta::new(accounts.token_0_vault, false),
        AccountMeta::new(accounts.token_1_vault, false),
        AccountMeta::new(accounts.create_pool_fee, false),
        AccountMeta::new(accounts.observation_state, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new_readonly(sysvar::rent::id(), false),
    ];

    let mut data = Vec::with_capacity(32);
    data.extend_from_slice(&initialize_discriminator());
    data.extend_from_slice(&init_amount_0.to_le_bytes());
    data.extend_from_slice(&init_amount_1.to_le_bytes());
    data.extend_from_slice(&open_time.to_le_bytes());

    Instruction {
        program_id: accounts.program_id,
        accounts: metas,
        data,
    }
}

/// Move `lamports` into the owner's wrapped SOL account
pub fn build_wrap_sol_instructions(owner: &Pubkey, lamports: u64) -> BotResult<Vec<Instruction>> {
    let native_mint = spl_token::native_mint::id();
    let wsol_account = get_associated_token_address(owner, &native_mint);

    Ok(vec![
        create_associated_token_account_idempotent(owner, owner, &native_mint, &spl_token::id()),
        system_instruction::transfer(owner, &wsol_account, lamports),
        spl_token::instruction::sync_native(&spl_token::id(), &wsol_account)?,
    ])
}

fn config_pubkey(value: &str, field: &str) -> BotResult<Pubkey> {
    Pubkey::from_str(value)
        .map_err(|_| BotError::Config(format!("liquidity.{} is not a valid address", field)))
}

/// Create a SOL/`token` pool funded from `wallet` and record it
pub async fn create_pool(
    chain: &ChainClient,
    store: &dyn Store,
    wallet: &CustodialWallet,
    token: &TokenRecord,
    token_amount: &str,
    sol_amount: &str,
    config: &LiquidityConfig,
) -> BotResult<CreatedPool> {
    if !config.enabled {
        return Err(BotError::Liquidity("Pool creation is disabled".to_string()));
    }

    let program_id = config_pubkey(&config.cpmm_program_id, "cpmm_program_id")?;
    let amm_config = config_pubkey(&config.amm_config, "amm_config")?;
    let fee_receiver = config_pubkey(&config.create_pool_fee_receiver, "create_pool_fee_receiver")?;

    let owner = wallet.pubkey();
    let mint = Pubkey::from_str(&token.mint_address)
        .map_err(|_| BotError::Liquidity(format!("Invalid mint {}", token.mint_address)))?;

    let token_units = parse_positive_amount(token_amount, token.decimals)
        .ok_or_else(|| BotError::Validation("Invalid token amount.".to_string()))?;
    let lamports = parse_positive_amount(sol_amount, SOL_DECIMALS)
        .ok_or_else(|| BotError::Validation("Invalid SOL amount.".to_string()))?;

    let token_balance = chain.token_balance(&owner, &mint).await?;
    if token_balance < token_units {
        return Err(BotError::InsufficientTokens {
            needed: format_ui_amount(token_units, token.decimals),
            available: format_ui_amount(token_balance, token.decimals),
        });
    }

    let sol_balance = chain.get_balance_lamports(&owner).await?;
    if sol_balance < lamports {
        return Err(BotError::InsufficientBalance {
            needed: lamports_to_sol(lamports),
            available: lamports_to_sol(sol_balance),
        });
    }

    let native_mint = spl_token::native_mint::id();
    let accounts =
        derive_pool_accounts(&program_id, &amm_config, &fee_receiver, &owner, mint, native_mint);
    let (init_amount_0, init_amount_1) = if accounts.token_0_mint == native_mint {
        (lamports, token_units)
    } else {
        (token_units, lamports)
    };
    let open_time = (Utc::now().timestamp().max(0) as u64) + config.open_time_delay_secs;

    logger::info(
        LogTag::Liquidity,
        &format!(
            "Creating pool {} for {} ({} tokens, {} SOL)",
            accounts.pool_state, token.mint_address, token_amount, sol_amount
        ),
    );

    let wrap_signature = chain
        .send_and_confirm(&build_wrap_sol_instructions(&owner, lamports)?, &wallet.keypair, &[])
        .await?;
    logger::debug(
        LogTag::Liquidity,
        &format!("Wrapped {} lamports: {}", lamports, wrap_signature),
    );

    let instructions = vec![
        ComputeBudgetInstruction::set_compute_unit_limit(config.compute_unit_limit),
        build_initialize_instruction(&accounts, &owner, init_amount_0, init_amount_1, open_time),
    ];
    let signature: Signature = chain
        .send_and_confirm(&instructions, &wallet.keypair, &[])
        .await
        .map_err(|e| {
            logger::error(
                LogTag::Liquidity,
                &format!(
                    "Pool initialize failed after wrapping SOL ({}): {}",
                    wrap_signature, e
                ),
            );
            e
        })?;

    let record = LiquidityRecord {
        tg_id: wallet.record.tg_id.clone(),
        mint_address: token.mint_address.clone(),
        token_name: token.token_name.clone(),
        pool_id: accounts.pool_state.to_string(),
        lp_mint: accounts.lp_mint.to_string(),
        token_amount: token_amount.trim().to_string(),
        sol_amount: sol_amount.trim().to_string(),
        signature: signature.to_string(),
        created_at: Utc::now(),
    };
    store.insert_liquidity(&record).await?;

    logger::info(
        LogTag::Liquidity,
        &format!("Pool {} created: {}", record.pool_id, signature),
    );

    Ok(CreatedPool {
        pool_link: address_link(&record.pool_id, chain.cluster()),
        tx_link: tx_link(&record.signature, chain.cluster()),
        record,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devnet_accounts(creator: &Pubkey, mint: Pubkey) -> CpmmPoolAccounts {
        let config = LiquidityConfig::default();
        derive_pool_accounts(
            &Pubkey::from_str(&config.cpmm_program_id).unwrap(),
            &Pubkey::from_str(&config.amm_config).unwrap(),
            &Pubkey::from_str(&config.create_pool_fee_receiver).unwrap(),
            creator,
            mint,
            spl_token::native_mint::id(),
        )
    }

    #[test]
    fn test_discriminator_is_stable() {
        let expected = Sha256::digest(b"global:initialize");
        assert_eq!(initialize_discriminator(), expected[..8]);
    }

    #[test]
    fn test_mints_sorted_regardless_of_argument_order() {
        let creator = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let a = devnet_accounts(&creator, mint);

        let config = LiquidityConfig::default();
        let b = derive_pool_accounts(
            &Pubkey::from_str(&config.cpmm_program_id).unwrap(),
            &Pubkey::from_str(&config.amm_config).unwrap(),
            &Pubkey::from_str(&config.create_pool_fee_receiver).unwrap(),
            &creator,
            spl_token::native_mint::id(),
            mint,
        );

        assert_eq!(a, b);
        assert!(a.token_0_mint < a.token_1_mint);
        assert_eq!(a.creator_lp_token, get_associated_token_address(&creator, &a.lp_mint));
    }

    #[test]
    fn test_pool_address_independent_of_creator() {
        let mint = Pubkey::new_unique();
        let a = devnet_accounts(&Pubkey::new_unique(), mint);
        let b = devnet_accounts(&Pubkey::new_unique(), mint);
        assert_eq!(a.pool_state, b.pool_state);
        assert_eq!(a.lp_mint, b.lp_mint);
        assert_ne!(a.creator_token_0, b.creator_token_0);
    }

    #[test]
    fn test_initialize_instruction_layout() {
        let creator = Pubkey::new_unique();
        let accounts = devnet_accounts(&creator, Pubkey::new_unique());
        let ix = build_initialize_instruction(&accounts, &creator, 10, 20, 30);

        assert_eq!(ix.accounts.len(), 20);
        assert!(ix.accounts[0].is_signer);
        assert_eq!(ix.accounts[3].pubkey, accounts.pool_state);
        assert_eq!(ix.accounts[13].pubkey, accounts.observation_state);
        assert_eq!(ix.data.len(), 32);
        assert_eq!(u64::from_le_bytes(ix.data[8..16].try_into().unwrap()), 10);
        assert_eq!(u64::from_le_bytes(ix.data[24..32].try_into().unwrap()), 30);
    }

    #[test]
    fn test_wrap_sol_instructions() {
        let owner = Pubkey::new_unique();
        let ixs = build_wrap_sol_instructions(&owner, 1_000).unwrap();
        assert_eq!(ixs.len(), 3);
        assert_eq!(ixs[2].program_id, spl_token::id());
    }
}
