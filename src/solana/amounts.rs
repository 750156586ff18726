/// Conversions between human amounts ("1.5") and base units
///
/// Parsing is done on the decimal string so no precision is lost to floats.
use solana_sdk::native_token::LAMPORTS_PER_SOL;

pub const SOL_DECIMALS: u8 = 9;

/// Parse a non-negative decimal string into base units
///
/// Returns None for malformed input, more fractional digits than `decimals`,
/// or values that do not fit in u64.
pub fn parse_ui_amount(input: &str, decimals: u8) -> Option<u64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let (whole, fraction) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return None;
    }
    if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }
    if fraction.len() > decimals as usize {
        return None;
    }

    let scale = 10u64.checked_pow(decimals as u32)?;
    let whole_units = if whole.is_empty() {
        0
    } else {
        whole.parse::<u64>().ok()?.checked_mul(scale)?
    };

    let fraction_units = if fraction.is_empty() {
        0
    } else {
        let padding = 10u64.checked_pow((decimals as usize - fraction.len()) as u32)?;
        fraction.parse::<u64>().ok()?.checked_mul(padding)?
    };

    whole_units.checked_add(fraction_units)
}

/// Parse an amount that must be strictly positive
pub fn parse_positive_amount(input: &str, decimals: u8) -> Option<u64> {
    parse_ui_amount(input, decimals).filter(|units| *units > 0)
}

/// Render base units as a decimal string without trailing zeros
pub fn format_ui_amount(units: u64, decimals: u8) -> String {
    if decimals == 0 {
        return units.to_string();
    }

    let scale = 10u128.pow(decimals as u32);
    let whole = units as u128 / scale;
    let fraction = units as u128 % scale;
    if fraction == 0 {
        return whole.to_string();
    }

    let fraction = format!("{:0width$}", fraction, width = decimals as usize);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}

/// Whole-token supply expressed in base units
pub fn supply_to_base_units(supply: u64, decimals: u8) -> Option<u64> {
    10u64
        .checked_pow(decimals as u32)
        .and_then(|scale| supply.checked_mul(scale))
}

pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}
