//! Canonical order serialization for transport.
//!
//! Signed orders carry values that JSON has no native shape for. The
//! mapping used everywhere an order crosses the wire:
//!
//! - `U256` amounts, identifiers, times and salts → decimal strings
//! - addresses and byte strings → 0x-prefixed hex strings
//! - absent optional fields → omitted entirely (never `null`)

use alloy_primitives::{hex::encode_prefixed, keccak256, utils::parse_ether, Address, U256};
use anyhow::{anyhow, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Serde adapter: `U256` as a decimal string on the wire. Accepts both
/// decimal and 0x-hex strings (and bare integers) when reading, since
/// backend records may carry either form.
pub mod u256_decimal {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(U256::from(n)),
            Raw::Text(s) => {
                let s = s.trim();
                let parsed = match s.strip_prefix("0x") {
                    Some(hex) => U256::from_str_radix(hex, 16),
                    None => U256::from_str_radix(s, 10),
                };
                parsed.map_err(serde::de::Error::custom)
            }
        }
    }
}

/// Serialize any order-shaped value into its transport JSON form.
pub fn to_transport_json<T: Serialize>(value: &T) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(value)?)
}

/// Lower-cased 0x-hex form of an address, as backend payloads expect.
pub fn address_lower(address: &Address) -> String {
    encode_prefixed(address.as_slice())
}

/// Content hash over the canonical JSON form of an order. Used when the
/// signing step did not yield a protocol order hash.
pub fn content_hash(value: &serde_json::Value) -> Result<String> {
    let json = serde_json::to_string(value)?;
    Ok(encode_prefixed(keccak256(json.as_bytes()).as_slice()))
}

/// Last-resort order identifier: time plus randomness. Unique enough for
/// backend bookkeeping, useless for on-chain lookup.
pub fn fallback_token() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let noise: u32 = rand::random();
    format!("{millis:x}-{noise:08x}")
}

/// Convert a validated decimal price to wei.
pub fn wei_from_decimal(price: &Decimal) -> Result<U256> {
    if price.is_sign_negative() {
        return Err(anyhow!("negative price"));
    }
    parse_ether(&price.to_string()).map_err(|e| anyhow!("unparseable price: {e}"))
}
