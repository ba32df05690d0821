/// Output formatting: smallest-unit conversion and display helpers.
///
/// BNB uses 18 decimal places (wei). 1 BNB = 10^18 wei. The decimals are a
/// parameter everywhere so another native token can be configured.
use alloy_primitives::{Address, U256};
use chrono::{DateTime, TimeZone};

use crate::error::AmountError;
use crate::network::StakeRecord;

pub const DEFAULT_DECIMALS: u8 = 18;

/// Placeholder shown when the contract reports timestamp `0`.
pub const NEVER_STAKED: &str = "-";

/// Largest decimals value whose unit (10^decimals) fits in 256 bits.
pub const MAX_DECIMALS: u8 = 77;

fn unit_base(decimals: u8) -> Option<U256> {
    U256::from(10u64).checked_pow(U256::from(decimals))
}

/// Convert a smallest-unit integer into a human-readable decimal string.
/// Trailing fractional zeros are dropped: 10^16 wei -> "0.01", 0 -> "0".
#[must_use]
pub fn format_units(amount: U256, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let Some(base) = unit_base(decimals) else {
        // No unit to divide by; show the raw integer rather than a wrapped one
        return amount.to_string();
    };
    let whole = amount / base;
    let frac = amount % base;
    if frac.is_zero() {
        return whole.to_string();
    }
    let padded = format!("{:0>width$}", frac.to_string(), width = decimals as usize);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

/// Format an amount with its token symbol, e.g. "0.01 BNB".
#[must_use]
pub fn format_balance(amount: U256, decimals: u8, symbol: &str) -> String {
    format!("{} {symbol}", format_units(amount, decimals))
}

/// Parse a human-readable token amount into the smallest unit.
/// Accepts: "1.5", "1", "0.001", "1." and ".5". Rejects empty, negative,
/// zero, exponent or otherwise malformed input, over-precise fractions and
/// values that do not fit in 256 bits.
#[must_use = "parsing result should be checked"]
pub fn parse_token_amount(input: &str, decimals: u8) -> Result<U256, AmountError> {
    let input = input.trim();
    let base = unit_base(decimals).ok_or(AmountError::Overflow)?;

    if input.is_empty() {
        return Err(AmountError::Empty);
    }
    if input.starts_with('-') {
        return Err(AmountError::Negative);
    }

    let (whole_str, frac_str) = match input.split_once('.') {
        Some((w, f)) => (w, f),
        None => (input, ""),
    };

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if (whole_str.is_empty() && frac_str.is_empty())
        || !digits_only(whole_str)
        || !digits_only(frac_str)
    {
        return Err(AmountError::Malformed(input.to_string()));
    }
    if frac_str.len() > decimals as usize {
        return Err(AmountError::TooPrecise(decimals));
    }

    let whole = if whole_str.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole_str, 10).map_err(|_| AmountError::Overflow)?
    };
    let frac = if frac_str.is_empty() {
        U256::ZERO
    } else {
        // Pad to `decimals` digits
        let padded = format!("{frac_str:0<width$}", width = decimals as usize);
        U256::from_str_radix(&padded, 10).map_err(|_| AmountError::Overflow)?
    };

    let total = whole
        .checked_mul(base)
        .and_then(|w| w.checked_add(frac))
        .ok_or(AmountError::Overflow)?;

    if total.is_zero() {
        return Err(AmountError::Zero);
    }
    Ok(total)
}

/// Shorten an address for buttons and prompts: "0xe071...d741".
#[must_use]
pub fn short_address(address: &Address) -> String {
    let s = address.to_checksum(None);
    format!("{}...{}", &s[..6], &s[s.len() - 4..])
}

/// Render a stake timestamp in the given zone, or the placeholder when the
/// account has never staked.
#[must_use]
pub fn format_staked_since<Tz: TimeZone>(timestamp: u64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp == 0 {
        return NEVER_STAKED.to_string();
    }
    match i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
    {
        Some(dt) => dt.with_timezone(tz).format("%Y-%m-%d %H:%M:%S").to_string(),
        None => format!("@{timestamp}"),
    }
}

/// Format a stake record for the REPL.
#[must_use]
pub fn format_stake<Tz: TimeZone>(record: &StakeRecord, decimals: u8, symbol: &str, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "  Your Stake:   {}\n  Staked Since: {}",
        format_balance(record.amount, decimals, symbol),
        format_staked_since(record.timestamp, tz),
    )
}

/// Format a stake record as JSON.
#[must_use]
pub fn format_stake_json(record: &StakeRecord, decimals: u8) -> String {
    serde_json::json!({
        "amount_wei": record.amount.to_string(),
        "amount": format_units(record.amount, decimals),
        "timestamp": record.timestamp,
    })
    .to_string()
}

/// Format address as JSON.
#[must_use]
pub fn format_address_json(address: &Address) -> String {
    serde_json::json!({
        "address": address.to_checksum(None),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn wei(s: &str) -> U256 {
        U256::from_str_radix(s, 10).unwrap()
    }

    #[test]
    fn format_zero() {
        assert_eq!(format_units(U256::ZERO, 18), "0");
    }

    #[test]
    fn format_one_hundredth() {
        assert_eq!(format_units(wei("10000000000000000"), 18), "0.01");
    }

    #[test]
    fn format_whole_and_fraction() {
        assert_eq!(format_units(wei("1500000000000000000"), 18), "1.5");
    }

    #[test]
    fn format_single_wei() {
        assert_eq!(format_units(U256::from(1u64), 18), "0.000000000000000001");
    }

    #[test]
    fn format_balance_with_symbol() {
        assert_eq!(format_balance(wei("2000000000000000000"), 18, "BNB"), "2 BNB");
    }

    #[test]
    fn parse_whole_number() {
        assert_eq!(parse_token_amount("1", 18).unwrap(), wei("1000000000000000000"));
    }

    #[test]
    fn parse_decimal() {
        assert_eq!(parse_token_amount("0.01", 18).unwrap(), wei("10000000000000000"));
    }

    #[test]
    fn parse_full_precision() {
        assert_eq!(parse_token_amount("0.000000000000000001", 18).unwrap(), U256::from(1u64));
    }

    #[test]
    fn parse_leading_and_trailing_dot() {
        assert_eq!(parse_token_amount(".5", 18).unwrap(), wei("500000000000000000"));
        assert_eq!(parse_token_amount("2.", 18).unwrap(), wei("2000000000000000000"));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_token_amount("  1.5 ", 18).unwrap(), wei("1500000000000000000"));
    }

    #[test]
    fn parse_too_many_decimals() {
        assert_eq!(
            parse_token_amount("0.0000000000000000001", 18),
            Err(AmountError::TooPrecise(18))
        );
    }

    #[test]
    fn parse_rejects_invalid_input() {
        assert_eq!(parse_token_amount("", 18), Err(AmountError::Empty));
        assert_eq!(parse_token_amount("-1", 18), Err(AmountError::Negative));
        assert_eq!(parse_token_amount("0", 18), Err(AmountError::Zero));
        assert_eq!(parse_token_amount("0.000", 18), Err(AmountError::Zero));
        for bad in ["abc", ".", "1.2.3", "1e18", "0x10", "1,5", "+1"] {
            assert!(
                matches!(parse_token_amount(bad, 18), Err(AmountError::Malformed(_))),
                "'{bad}' should be malformed"
            );
        }
    }

    #[test]
    fn parse_overflow() {
        let huge = "9".repeat(80);
        assert_eq!(parse_token_amount(&huge, 18), Err(AmountError::Overflow));
    }

    #[test]
    fn unrepresentable_decimals_never_wrap() {
        assert_eq!(parse_token_amount("1", MAX_DECIMALS + 1), Err(AmountError::Overflow));
        assert_eq!(parse_token_amount("1", u8::MAX), Err(AmountError::Overflow));
        assert_eq!(format_units(U256::from(5u64), 78), "5");
        assert_eq!(
            parse_token_amount("1", MAX_DECIMALS).unwrap(),
            U256::from(10u64).pow(U256::from(MAX_DECIMALS))
        );
    }

    #[test]
    fn short_address_keeps_prefix_and_suffix() {
        let addr: Address = "0xe0711cc6FbF29F01581EB00149532E767EcAd741".parse().unwrap();
        assert_eq!(short_address(&addr), "0xe071...d741");
    }

    #[test]
    fn staked_since_placeholder_for_zero() {
        assert_eq!(format_staked_since(0, &Utc), "-");
    }

    #[test]
    fn staked_since_formats_utc() {
        assert_eq!(format_staked_since(1_700_000_000, &Utc), "2023-11-14 22:13:20");
    }

    #[test]
    fn stake_json_contains_both_units() {
        let record = StakeRecord {
            amount: wei("10000000000000000"),
            timestamp: 42,
        };
        let v: serde_json::Value = serde_json::from_str(&format_stake_json(&record, 18)).unwrap();
        assert_eq!(v["amount_wei"], "10000000000000000");
        assert_eq!(v["amount"], "0.01");
        assert_eq!(v["timestamp"], 42);
    }
}
