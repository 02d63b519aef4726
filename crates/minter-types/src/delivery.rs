//! Transaction delivery types for the minting pipeline.
//!
//! This module defines hashes, receipts and event logs as returned once a
//! submitted transaction has been included in a block.

use crate::Address;
use crate::with_0x_prefix;
use std::fmt;

/// Blockchain transaction hash representation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", with_0x_prefix(&hex::encode(&self.0)))
	}
}

/// Fixed-size hash type for log topics.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct H256(pub [u8; 32]);

/// Event log emitted by smart contracts.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Log {
	/// Contract address that emitted the log.
	pub address: Address,
	/// Indexed event parameters. Topic[0] is typically the event signature hash.
	pub topics: Vec<H256>,
	/// Non-indexed event data.
	pub data: Vec<u8>,
}

/// Transaction receipt containing execution details.
///
/// For contract-creation transactions the receipt carries the address of the
/// newly created contract.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
	/// Address of the contract created by this transaction, if any.
	pub contract_address: Option<Address>,
	/// Event logs emitted during transaction execution.
	pub logs: Vec<Log>,
}
