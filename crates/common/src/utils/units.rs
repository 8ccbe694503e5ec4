use alloy::primitives::U256;
use eyre::{eyre, Result};

/// Parses a wei amount from either a decimal string or a 0x-prefixed hex
/// string. Empty input parses as zero.
///
/// ```
/// use alloy::primitives::U256;
/// use sift_common::utils::units::parse_wei;
///
/// assert_eq!(parse_wei("1000").expect("should parse"), U256::from(1000u64));
/// assert_eq!(parse_wei("0x0a").expect("should parse"), U256::from(10u64));
/// ```
pub fn parse_wei(value: &str) -> Result<U256> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(U256::ZERO);
    }

    match value.strip_prefix("0x") {
        Some("") => Ok(U256::ZERO),
        Some(hex) => {
            U256::from_str_radix(hex, 16).map_err(|_| eyre!("invalid hex amount: {value}"))
        }
        None => U256::from_str_radix(value, 10).map_err(|_| eyre!("invalid decimal amount: {value}")),
    }
}

/// Formats a raw integer amount as a decimal string scaled down by
/// `decimals` places. Trailing fractional zeros are trimmed, but one
/// fractional digit is always kept: 10^18 wei formats as `"1.0"`.
pub fn format_units(amount: U256, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }

    let scale = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / scale;
    let mut fraction = (amount % scale).to_string();

    // left-pad the fraction to the full width, then strip trailing zeros
    // down to at least one digit
    while (fraction.len() as u32) < decimals {
        fraction.insert(0, '0');
    }
    let keep = fraction.trim_end_matches('0').len();
    if keep == 0 {
        fraction = String::from("0");
    } else {
        fraction.truncate(keep);
    }

    format!("{whole}.{fraction}")
}
