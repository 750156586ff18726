/// Solana JSON-RPC access shared by every chain service
use super::amounts::lamports_to_sol;
use crate::config::SolanaConfig;
use crate::errors::{BotError, BotResult};
use crate::logger::{self, LogTag};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address;
use spl_token::state::{Account as TokenAccount, Mint};
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub struct ChainClient {
    rpc: Arc<RpcClient>,
    cluster: String,
    confirm_timeout: Duration,
}

pub fn parse_commitment(level: &str) -> BotResult<CommitmentConfig> {
    match level {
        "processed" => Ok(CommitmentConfig::processed()),
        "confirmed" => Ok(CommitmentConfig::confirmed()),
        "finalized" => Ok(CommitmentConfig::finalized()),
        other => Err(BotError::Config(format!("Invalid commitment '{}'", other))),
    }
}

impl ChainClient {
    pub fn new(config: &SolanaConfig) -> BotResult<Self> {
        let commitment = parse_commitment(&config.commitment)?;
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), commitment);

        logger::info(
            LogTag::Rpc,
            &format!(
                "RPC client ready: {} ({}, {})",
                config.rpc_url, config.cluster, config.commitment
            ),
        );

        Ok(Self {
            rpc: Arc::new(rpc),
            cluster: config.cluster.clone(),
            confirm_timeout: Duration::from_secs(config.confirm_timeout_secs),
        })
    }

    /// Cluster name used for explorer links
    pub fn cluster(&self) -> &str {
        &self.cluster
    }

    pub async fn get_balance_lamports(&self, owner: &Pubkey) -> BotResult<u64> {
        Ok(self.rpc.get_balance(owner).await?)
    }

    pub async fn get_balance_sol(&self, owner: &Pubkey) -> BotResult<f64> {
        Ok(lamports_to_sol(self.get_balance_lamports(owner).await?))
    }

    /// Fetch and decode an SPL mint account
    pub async fn get_mint(&self, mint: &Pubkey) -> BotResult<Mint> {
        let account = self
            .rpc
            .get_account_with_commitment(mint, self.rpc.commitment())
            .await?
            .value
            .ok_or_else(|| BotError::NotFound {
                what: format!("mint {}", mint),
            })?;

        if account.owner != spl_token::id() {
            return Err(BotError::Token(format!(
                "Account {} is not an SPL Token mint",
                mint
            )));
        }

        Ok(Mint::unpack(&account.data)?)
    }

    /// Raw balance of `owner`'s associated token account (0 when it does not exist)
    pub async fn token_balance(&self, owner: &Pubkey, mint: &Pubkey) -> BotResult<u64> {
        let ata = get_associated_token_address(owner, mint);
        let account = self
            .rpc
            .get_account_with_commitment(&ata, self.rpc.commitment())
            .await?
            .value;

        match account {
            Some(account) => Ok(TokenAccount::unpack(&account.data)?.amount),
            None => Ok(0),
        }
    }

    pub async fn get_minimum_balance_for_rent_exemption(&self, len: usize) -> BotResult<u64> {
        Ok(self.rpc.get_minimum_balance_for_rent_exemption(len).await?)
    }

    /// Sign with the payer (plus any extra signers), send and wait for confirmation
    pub async fn send_and_confirm(
        &self,
        instructions: &[Instruction],
        payer: &Keypair,
        extra_signers: &[&Keypair],
    ) -> BotResult<Signature> {
        let blockhash = self.rpc.get_latest_blockhash().await?;

        let mut signers: Vec<&Keypair> = vec![payer];
        signers.extend_from_slice(extra_signers);

        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &signers,
            blockhash,
        );

        logger::debug(
            LogTag::Rpc,
            &format!(
                "Sending transaction with {} instructions, payer {}",
                instructions.len(),
                payer.pubkey()
            ),
        );

        let signature = tokio::time::timeout(
            self.confirm_timeout,
            self.rpc.send_and_confirm_transaction(&transaction),
        )
        .await
        .map_err(|_| {
            BotError::Rpc(format!(
                "Transaction not confirmed within {}s",
                self.confirm_timeout.as_secs()
            ))
        })??;

        logger::debug(LogTag::Rpc, &format!("Confirmed {}", signature));
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commitment() {
        assert_eq!(
            parse_commitment("finalized").unwrap(),
            CommitmentConfig::finalized()
        );
        assert!(matches!(
            parse_commitment("recent"),
            Err(BotError::Config(_))
        ));
    }
}
