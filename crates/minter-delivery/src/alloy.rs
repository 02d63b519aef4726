//! Alloy-based delivery implementation.
//!
//! Wraps a single HTTP RPC endpoint into a connected handle. Construction
//! probes the endpoint and fails fast if it is unreachable; transaction
//! signing is handled by the provider's wallet.

use crate::{DeliveryError, DeliveryInterface};
use alloy_network::EthereumWallet;
use alloy_primitives::FixedBytes;
use alloy_provider::{
	DynProvider, PendingTransactionConfig, PendingTransactionError, Provider, ProviderBuilder,
};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::TransactionRequest;
use alloy_signer::Signer;
use alloy_signer_local::PrivateKeySigner;
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use minter_types::{
	delivery::H256, Address, SecretString, Transaction, TransactionHash, TransactionReceipt,
};

/// Alloy-based EVM delivery implementation for a single network.
pub struct AlloyDelivery {
	provider: DynProvider,
	chain_id: u64,
}

impl AlloyDelivery {
	/// Connects to the RPC endpoint and verifies connectivity.
	///
	/// The private key is parsed into a local signer bound to the chain id;
	/// the initial `eth_blockNumber` probe aborts the whole run on failure.
	pub async fn connect(
		rpc_url: &str,
		chain_id: u64,
		private_key: &SecretString,
	) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid RPC URL: {}", e)))?;

		let signer: PrivateKeySigner = private_key.with_exposed(|key| {
			key.parse()
				.map_err(|_| DeliveryError::InvalidKey("Invalid private key format".to_string()))
		})?;
		let signer = signer.with_chain_id(Some(chain_id));
		let wallet = EthereumWallet::from(signer);

		// Retry layer for transient network errors and rate limits
		let retry_layer = RetryBackoffLayer::new(5, 1000, 10);
		let client = RpcClient::builder().layer(retry_layer).http(url);

		let provider = ProviderBuilder::new()
			.wallet(wallet)
			.connect_client(client)
			.erased();

		// Fail fast if the endpoint is unreachable
		let block = provider
			.get_block_number()
			.await
			.map_err(|e| DeliveryError::Network(format!("RPC connection failed: {}", e)))?;
		tracing::info!(chain_id, block, "connected to RPC endpoint");

		Ok(Self { provider, chain_id })
	}

	fn to_request(&self, tx: Transaction) -> TransactionRequest {
		debug_assert_eq!(tx.chain_id, self.chain_id);
		tx.into()
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn submit(&self, tx: Transaction) -> Result<TransactionHash, DeliveryError> {
		let request = self.to_request(tx);

		tracing::debug!(
			to = ?request.to,
			nonce = ?request.nonce,
			gas = ?request.gas,
			data_len = request.input.input().map(|d| d.len()).unwrap_or(0),
			"sending transaction"
		);

		// The provider's wallet handles signing
		let pending_tx = self
			.provider
			.send_transaction(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending_tx.tx_hash();
		Ok(TransactionHash(tx_hash.0.to_vec()))
	}

	async fn wait_for_confirmation(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		// Default watcher settings: one confirmation, library timeout semantics
		let config = PendingTransactionConfig::new(tx_hash);

		let pending_tx = self
			.provider
			.watch_pending_transaction(config)
			.await
			.map_err(|e| match e {
				PendingTransactionError::FailedToRegister => {
					DeliveryError::Network("Failed to register transaction watcher".to_string())
				},
				other => DeliveryError::Network(format!("Transaction watch failed: {}", other)),
			})?;

		let confirmed_hash = pending_tx
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to confirm transaction: {}", e)))?;

		self.get_receipt(&TransactionHash(confirmed_hash.0.to_vec()))
			.await
	}

	async fn get_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);

		match self.provider.get_transaction_receipt(tx_hash).await {
			Ok(Some(receipt)) => {
				let logs = receipt
					.inner
					.logs()
					.iter()
					.map(|log| minter_types::Log {
						address: Address(log.address().0.to_vec()),
						topics: log.topics().iter().map(|topic| H256(topic.0)).collect(),
						data: log.inner.data.data.to_vec(),
					})
					.collect();

				Ok(TransactionReceipt {
					hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
					block_number: receipt.block_number.unwrap_or(0),
					success: receipt.status(),
					contract_address: receipt.contract_address.map(Into::into),
					logs,
				})
			},
			Ok(None) => Err(DeliveryError::Network(format!(
				"Transaction {} not found",
				hash
			))),
			Err(e) => Err(DeliveryError::Network(format!(
				"Failed to get receipt: {}",
				e
			))),
		}
	}

	async fn get_nonce(&self, address: &Address) -> Result<u64, DeliveryError> {
		let address: alloy_primitives::Address = address
			.to_string()
			.parse()
			.map_err(|e| DeliveryError::Network(format!("Invalid address: {}", e)))?;

		self.provider
			.get_transaction_count(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	async fn eth_call(&self, tx: Transaction) -> Result<Vec<u8>, DeliveryError> {
		let request = self.to_request(tx);

		let result = self
			.provider
			.call(request)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to execute eth_call: {}", e)))?;

		Ok(result.to_vec())
	}

	async fn get_gas_price(&self) -> Result<String, DeliveryError> {
		let gas_price = self
			.provider
			.get_gas_price()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))?;

		Ok(gas_price.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_PRIVATE_KEY: &str =
		"0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	#[tokio::test]
	async fn test_connect_rejects_invalid_url() {
		let key = SecretString::from(TEST_PRIVATE_KEY);
		let result = AlloyDelivery::connect("not a url", 137, &key).await;
		assert!(matches!(result, Err(DeliveryError::Network(_))));
	}

	#[tokio::test]
	async fn test_connect_rejects_invalid_key() {
		let key = SecretString::from("0x1234");
		let result = AlloyDelivery::connect("http://localhost:8545", 137, &key).await;
		assert!(matches!(result, Err(DeliveryError::InvalidKey(_))));
	}
}
