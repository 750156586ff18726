//! Input checks for the conversation steps
//!
//! Each check returns the value to store or the 🟡 message to send back.

use crate::database::TokenRecord;
use crate::solana::amounts::{parse_positive_amount, supply_to_base_units};
use crate::solana::token::MAX_NAME_LENGTH;
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9 ]*$").expect("valid regex"));
static SYMBOL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9]*$").expect("valid regex"));
static DECIMALS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d$").expect("valid regex"));
static SUPPLY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+$").expect("valid regex"));

pub const INVALID_NAME: &str =
    "🟡 Token name should not start with a number or special character. Please try again.";
pub const INVALID_SYMBOL: &str =
    "🟡 Token symbol should not contain any special characters and be less than 5 characters. Please try again.";
pub const INVALID_DECIMALS: &str =
    "🟡 Invalid number for decimals. Please enter a valid number less than 10.";
pub const INVALID_SUPPLY: &str =
    "🟡 Invalid number for total supply. Please enter a valid number that does not start with 0.";
pub const INVALID_INPUT: &str = "Invalid input. Please try again.";
pub const INVALID_ADDRESS: &str = "🟡 That is not a valid token address. Please try again.";
pub const UNKNOWN_TOKEN: &str = "🟡 Token not found among your tokens. Please try again.";

pub fn validate_token_name(input: &str) -> Result<String, String> {
    let name = input.trim();
    if !NAME_RE.is_match(name) {
        return Err(INVALID_NAME.to_string());
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(format!(
            "🟡 Token name must be at most {} characters. Please try again.",
            MAX_NAME_LENGTH
        ));
    }
    Ok(name.to_string())
}

/// Symbols are stored upper-cased
pub fn validate_symbol(input: &str) -> Result<String, String> {
    let symbol = input.trim();
    if !SYMBOL_RE.is_match(symbol) || symbol.len() >= 5 {
        return Err(INVALID_SYMBOL.to_string());
    }
    Ok(symbol.to_uppercase())
}

pub fn validate_decimals(input: &str) -> Result<u8, String> {
    let input = input.trim();
    if !DECIMALS_RE.is_match(input) {
        return Err(INVALID_DECIMALS.to_string());
    }
    input
        .parse::<u8>()
        .ok()
        .filter(|d| *d < 10)
        .ok_or_else(|| INVALID_DECIMALS.to_string())
}

/// Whole-token supply; it must also fit in base units for `decimals`
pub fn validate_supply(input: &str, decimals: u8) -> Result<u64, String> {
    let input = input.trim();
    if !SUPPLY_RE.is_match(input) {
        return Err(INVALID_SUPPLY.to_string());
    }

    let supply = input
        .parse::<u64>()
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| INVALID_SUPPLY.to_string())?;

    if supply_to_base_units(supply, decimals).is_none() {
        return Err(format!(
            "🟡 Total supply is too large for {} decimals. Please enter a smaller number.",
            decimals
        ));
    }

    Ok(supply)
}

/// Positive decimal amount with at most `decimals` fractional digits
///
/// The trimmed text is kept as entered; chain services convert it.
pub fn validate_amount(input: &str, decimals: u8, what: &str) -> Result<String, String> {
    let input = input.trim();
    match parse_positive_amount(input, decimals) {
        Some(_) => Ok(input.to_string()),
        None => Err(format!(
            "🟡 Invalid {} amount. Please enter a positive number with at most {} decimals.",
            what, decimals
        )),
    }
}

/// Position of the user's token whose mint address was typed in
pub fn find_owned_token(tokens: &[TokenRecord], input: &str) -> Result<usize, String> {
    let address = input.trim();
    if address.len() < 32 || address.len() > 44 || bs58::decode(address).into_vec().is_err() {
        return Err(INVALID_ADDRESS.to_string());
    }
    tokens
        .iter()
        .position(|t| t.mint_address == address)
        .ok_or_else(|| UNKNOWN_TOKEN.to_string())
}
