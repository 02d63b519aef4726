//! Builder for Transaction
//!
//! Provides a fluent API for constructing Transaction instances with
//! validation of the fields this pipeline relies on.

use crate::{Address, Transaction};
use alloy_primitives::U256;

/// Builder for creating `Transaction` instances with a fluent API.
///
/// # Examples
///
/// ```
/// use minter_types::{Address, TransactionBuilder};
///
/// let tx = TransactionBuilder::new()
///     .to(Address(vec![0x12; 20]))
///     .chain_id(137)
///     .nonce(0)
///     .gas_limit(500_000)
///     .gas_price_gwei(100)
///     .build();
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
	to: Option<Address>,
	data: Vec<u8>,
	value: U256,
	chain_id: Option<u64>,
	nonce: Option<u64>,
	gas_limit: Option<u64>,
	gas_price: Option<u128>,
}

impl TransactionBuilder {
	/// Creates a new `TransactionBuilder` with default values.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the recipient address. Leave unset for contract creation.
	pub fn to(mut self, to: Address) -> Self {
		self.to = Some(to);
		self
	}

	/// Sets the transaction data/calldata.
	pub fn data(mut self, data: Vec<u8>) -> Self {
		self.data = data;
		self
	}

	/// Sets the value to transfer in native currency.
	pub fn value(mut self, value: U256) -> Self {
		self.value = value;
		self
	}

	/// Sets the chain ID for replay protection.
	pub fn chain_id(mut self, chain_id: u64) -> Self {
		self.chain_id = Some(chain_id);
		self
	}

	/// Sets the transaction nonce.
	pub fn nonce(mut self, nonce: u64) -> Self {
		self.nonce = Some(nonce);
		self
	}

	/// Sets the gas limit for transaction execution.
	pub fn gas_limit(mut self, gas_limit: u64) -> Self {
		self.gas_limit = Some(gas_limit);
		self
	}

	/// Sets the legacy gas price in wei.
	pub fn gas_price(mut self, gas_price: u128) -> Self {
		self.gas_price = Some(gas_price);
		self
	}

	/// Sets the legacy gas price in gwei.
	pub fn gas_price_gwei(mut self, gwei: u64) -> Self {
		self.gas_price = Some(crate::gwei_to_wei(gwei));
		self
	}

	/// Builds the `Transaction` with the configured values.
	///
	/// # Panics
	///
	/// Panics if required fields are not set. Use `try_build()` for error
	/// handling instead of panicking.
	pub fn build(self) -> Transaction {
		self.try_build().expect("Missing required fields")
	}

	/// Tries to build the `Transaction` with the configured values.
	pub fn try_build(self) -> Result<Transaction, TransactionBuilderError> {
		let chain_id = self
			.chain_id
			.ok_or(TransactionBuilderError::MissingField("chain_id"))?;
		if self.gas_price.is_none() {
			return Err(TransactionBuilderError::MissingField("gas_price"));
		}

		Ok(Transaction {
			to: self.to,
			data: self.data,
			value: self.value,
			chain_id,
			nonce: self.nonce,
			gas_limit: self.gas_limit,
			gas_price: self.gas_price,
		})
	}
}

/// Errors that can occur when building a Transaction.
#[derive(Debug, thiserror::Error)]
pub enum TransactionBuilderError {
	#[error("Missing required field: {0}")]
	MissingField(&'static str),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_creation_transaction() {
		let tx = TransactionBuilder::new()
			.data(vec![0x60, 0x80])
			.chain_id(137)
			.nonce(7)
			.gas_limit(8_000_000)
			.gas_price_gwei(100)
			.build();

		assert!(tx.to.is_none());
		assert_eq!(tx.nonce, Some(7));
		assert_eq!(tx.gas_price, Some(100_000_000_000));
	}

	#[test]
	fn test_try_build_missing_chain_id() {
		let result = TransactionBuilder::new().gas_price_gwei(100).try_build();
		assert!(matches!(
			result,
			Err(TransactionBuilderError::MissingField("chain_id"))
		));
	}

	#[test]
	fn test_try_build_missing_gas_price() {
		let result = TransactionBuilder::new().chain_id(137).try_build();
		assert!(matches!(
			result,
			Err(TransactionBuilderError::MissingField("gas_price"))
		));
	}
}
