use crate::{consts::PACKET_TIMEOUT_MS, payload::to_32_byte_hex, prelude::Result, Error};
use chrono::Utc;
use ethers::types::U256;
use ethers::utils::{format_units, parse_units};
use rand::RngCore;

/// Every decimal number with at most this many digits fits in a `U256`.
const MAX_U256_DIGITS: usize = 77;

/// Nanosecond timeout 24h after `now_ms`, as a 32-byte hex field.
pub fn timeout_timestamp_hex(now_ms: i64) -> String {
    let timeout_ns = (now_ms + PACKET_TIMEOUT_MS) as u128 * 1_000_000;
    to_32_byte_hex(U256::from(timeout_ns))
}

pub fn next_timeout_timestamp_hex() -> String {
    timeout_timestamp_hex(Utc::now().timestamp_millis())
}

pub fn generate_salt() -> [u8; 32] {
    let mut salt = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut salt);
    salt
}

/// Decimal text to base units. Zero, negative and malformed amounts are rejected.
pub fn parse_amount(amount: &str, decimals: u32) -> Result<U256> {
    let amount = amount.trim();
    if amount.is_empty() || amount.starts_with('-') {
        return Err(Error::InvalidAmount(amount.to_string()));
    }
    let whole = amount.split('.').next().unwrap_or_default().trim_start_matches('0');
    if whole.len() + decimals as usize > MAX_U256_DIGITS {
        return Err(Error::InvalidAmount(format!("{amount}: too large")));
    }
    let units: U256 = parse_units(amount, decimals)
        .map_err(|e| Error::InvalidAmount(format!("{amount}: {e}")))?
        .into();
    if units.is_zero() {
        return Err(Error::InvalidAmount(format!(
            "{amount}: must be a positive number"
        )));
    }
    Ok(units)
}

pub fn format_amount(units: U256, decimals: u32) -> String {
    format_units(units, decimals).unwrap_or_else(|_| units.to_string())
}
