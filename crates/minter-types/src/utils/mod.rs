//! Utility helpers shared across the minting pipeline.

/// Builders for constructing transactions.
pub mod builders;

use crate::Address;

/// Adds a "0x" prefix to a hex string if not already present.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.to_lowercase().starts_with("0x") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Removes a "0x" or "0X" prefix from a hex string if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Parse a hex string (with or without "0x" prefix) into a 20-byte Address.
pub fn parse_address(hex_str: &str) -> Result<Address, String> {
	let hex = without_0x_prefix(hex_str);
	hex::decode(hex)
		.map_err(|e| format!("Invalid hex: {}", e))
		.and_then(|bytes| {
			if bytes.len() != 20 {
				Err(format!(
					"Invalid address length: expected 20 bytes, got {}",
					bytes.len()
				))
			} else {
				Ok(Address(bytes))
			}
		})
}

/// Converts a gas price in gwei to wei.
pub fn gwei_to_wei(gwei: u64) -> u128 {
	gwei as u128 * 1_000_000_000
}

/// Returns the current unix timestamp in seconds.
pub fn current_timestamp() -> u64 {
	std::time::SystemTime::now()
		.duration_since(std::time::UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs()
}
