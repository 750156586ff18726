//! Solana services: RPC access, custodial wallets, token lifecycle and pools
//!
//! - `client`: JSON-RPC wrapper used by every other service
//! - `wallet`: per-user keypairs
//! - `token`: SPL mint + Metaplex metadata creation
//! - `authority`: mint / freeze authority checks and revocation
//! - `burn`: burning held supply
//! - `liquidity`: Raydium CPMM pool creation
//! - `explorer`, `amounts`: pure helpers

pub mod amounts;
pub mod authority;
pub mod burn;
pub mod client;
pub mod explorer;
pub mod liquidity;
pub mod token;
pub mod wallet;

pub use client::ChainClient;
pub use wallet::{get_or_create_wallet, CustodialWallet};
