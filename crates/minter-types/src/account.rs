//! Account-related types for the minting pipeline.
//!
//! This module defines the address and transaction representations used when
//! constructing, signing and submitting the deployment and mint transactions.

use crate::with_0x_prefix;
use alloy_primitives::{Address as AlloyAddress, Bytes, TxKind, U256};
use alloy_rpc_types::TransactionRequest;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Blockchain address representation.
///
/// Stores addresses as raw bytes; the wire format is a 0x-prefixed hex string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub Vec<u8>);

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let hex_str = s.trim_start_matches("0x");
		let bytes = hex::decode(hex_str)
			.map_err(|e| serde::de::Error::custom(format!("Invalid hex address: {}", e)))?;

		if bytes.len() != 20 {
			return Err(serde::de::Error::custom(format!(
				"Invalid address length: expected 20 bytes, got {}",
				bytes.len()
			)));
		}

		Ok(Address(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

impl From<AlloyAddress> for Address {
	fn from(addr: AlloyAddress) -> Self {
		Address(addr.as_slice().to_vec())
	}
}

/// Blockchain transaction representation.
///
/// Contains the fields needed to build both the contract-creation and the
/// mint transactions. `to: None` means contract creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
	/// Recipient address (None for contract creation).
	pub to: Option<Address>,
	/// Transaction data: init code for creation, calldata otherwise.
	pub data: Vec<u8>,
	/// Value to transfer in native currency.
	pub value: U256,
	/// Chain ID for replay protection.
	pub chain_id: u64,
	/// Transaction nonce (optional, can be filled by provider).
	pub nonce: Option<u64>,
	/// Gas limit for transaction execution.
	pub gas_limit: Option<u64>,
	/// Legacy gas price in wei.
	pub gas_price: Option<u128>,
}

/// Conversion to Alloy's TransactionRequest for submission and eth_call.
impl From<Transaction> for TransactionRequest {
	fn from(tx: Transaction) -> Self {
		let to = match tx.to {
			Some(to) => {
				let mut addr_bytes = [0u8; 20];
				addr_bytes.copy_from_slice(&to.0[..20]);
				TxKind::Call(AlloyAddress::from(addr_bytes))
			},
			None => TxKind::Create,
		};

		TransactionRequest {
			chain_id: Some(tx.chain_id),
			value: Some(tx.value),
			to: Some(to),
			nonce: tx.nonce,
			gas: tx.gas_limit,
			gas_price: tx.gas_price,
			input: alloy_rpc_types::TransactionInput {
				input: Some(Bytes::from(tx.data)),
				data: None,
			},
			..Default::default()
		}
	}
}
