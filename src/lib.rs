pub mod arguments;
pub mod config;
pub mod database;
pub mod errors;
pub mod logger;
pub mod paths;
pub mod run;
pub mod solana;
pub mod state;
pub mod telegram;
pub mod upload;
