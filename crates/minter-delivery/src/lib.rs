//! Transaction delivery module for the minting pipeline.
//!
//! This module handles submission and monitoring of the two pipeline
//! transactions (deployment and mint) and the read-only contract calls of
//! the verification step. The network-facing side is abstracted behind
//! `DeliveryInterface` so tests can substitute a mocked chain.

use async_trait::async_trait;
use minter_types::{Address, Transaction, TransactionHash, TransactionReceipt};
use thiserror::Error;

/// Alloy-backed implementation.
pub mod alloy;

pub use alloy::AlloyDelivery;

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when a transaction execution fails or reverts.
	#[error("Transaction failed: {0}")]
	TransactionFailed(String),
	/// Error that occurs when the signing key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface to the remote chain endpoint.
///
/// Implementations sign and submit transactions and expose the read-only
/// queries the pipeline needs. The mock generated behind the `testing`
/// feature stands in for the chain in tests.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Signs and submits a transaction, returning its hash.
	///
	/// The implementation's wallet handles signing; any RPC or signing
	/// error is returned to the caller, which treats it as fatal.
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError>;

	/// Blocks until the transaction is included in a block, then returns
	/// its receipt. No timeout is configured here; the underlying
	/// watcher's defaults apply.
	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError>;

	/// Retrieves the receipt for a mined transaction.
	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError>;

	/// Gets the next valid nonce for an address.
	async fn get_nonce(&self, address: &Address) -> Result<u64, DeliveryError>;

	/// Executes a read-only contract call and returns the raw return data.
	async fn eth_call(&self, tx: Transaction) -> Result<Vec<u8>, DeliveryError>;

	/// Gets the current gas price in wei as a decimal string.
	async fn get_gas_price(&self) -> Result<String, DeliveryError>;
}
