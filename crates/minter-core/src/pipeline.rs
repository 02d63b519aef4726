//! The sequential minting pipeline.
//!
//! Deploy and mint are tier-one steps: any error aborts the run. The
//! verification/report step returns its own error type so that the caller
//! can log and move on without touching the already-confirmed on-chain
//! state.

use crate::contract;
use crate::links;
use crate::{PipelineError, VerificationError};
use alloy_primitives::U256;
use minter_compiler::CompiledContract;
use minter_config::Config;
use minter_delivery::DeliveryInterface;
use minter_types::{Address, TokenMetadata, TransactionBuilder, TransactionReceipt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Outcome of the deploy + mint steps.
#[derive(Debug, Clone)]
pub struct MintOutcome {
	/// Address of the deployed contract.
	pub contract_address: Address,
	/// Receipt of the contract-creation transaction.
	pub deploy_receipt: TransactionReceipt,
	/// Receipt of the mint transaction.
	pub mint_receipt: TransactionReceipt,
}

/// Outcome of the verification/report step.
#[derive(Debug, Clone)]
pub struct VerificationReport {
	/// Token id as reported by the contract counter.
	pub token_id: U256,
	/// Owner of the token.
	pub owner: Address,
	/// Raw token URI.
	pub token_uri: String,
	/// Parsed metadata, if the URI carried the inline-JSON prefix and the
	/// payload decoded.
	pub metadata: Option<TokenMetadata>,
	/// Path the links file was written to.
	pub links_path: PathBuf,
}

/// The linear deploy → mint → verify pipeline.
pub struct MintPipeline {
	delivery: Arc<dyn DeliveryInterface>,
	config: Config,
	wallet: Address,
}

impl MintPipeline {
	/// Creates a pipeline over the given delivery handle.
	pub fn new(delivery: Arc<dyn DeliveryInterface>, config: Config, wallet: Address) -> Self {
		Self {
			delivery,
			config,
			wallet,
		}
	}

	/// Runs the deploy and mint steps.
	///
	/// The account nonce is fetched once; the mint transaction uses
	/// exactly nonce + 1 so the two transactions are honored in order.
	pub async fn run(&self, artifact: &CompiledContract) -> Result<MintOutcome, PipelineError> {
		let nonce = self.delivery.get_nonce(&self.wallet).await?;

		let (contract_address, deploy_receipt) = self.deploy(artifact, nonce).await?;
		tracing::info!(contract = %contract_address, "contract deployed");

		let mint_receipt = self.mint(&contract_address, nonce + 1).await?;
		tracing::info!(tx = %mint_receipt.hash, block = mint_receipt.block_number, "mint confirmed");

		Ok(MintOutcome {
			contract_address,
			deploy_receipt,
			mint_receipt,
		})
	}

	/// Builds, submits and confirms the contract-creation transaction.
	async fn deploy(
		&self,
		artifact: &CompiledContract,
		nonce: u64,
	) -> Result<(Address, TransactionReceipt), PipelineError> {
		let tx = TransactionBuilder::new()
			.data(artifact.bytecode.clone())
			.chain_id(self.config.network.chain_id)
			.nonce(nonce)
			.gas_limit(self.config.gas.deploy_gas_limit)
			.gas_price_gwei(self.config.gas.gas_price_gwei)
			.try_build()?;

		let hash = self.delivery.submit(tx).await?;
		tracing::info!(tx = %hash, nonce, "deployment transaction sent");

		let receipt = self.delivery.wait_for_confirmation(&hash).await?;
		if !receipt.success {
			return Err(PipelineError::TransactionReverted(format!(
				"deployment transaction {} reverted",
				receipt.hash
			)));
		}

		let contract_address = receipt
			.contract_address
			.clone()
			.ok_or(PipelineError::MissingContractAddress)?;
		Ok((contract_address, receipt))
	}

	/// Builds, submits and confirms the mint transaction.
	async fn mint(
		&self,
		contract_address: &Address,
		nonce: u64,
	) -> Result<TransactionReceipt, PipelineError> {
		let description = normalize_description(&self.config.mint.description);
		let data = contract::mint_calldata(&self.config.mint.title, &description);

		let tx = TransactionBuilder::new()
			.to(contract_address.clone())
			.data(data)
			.chain_id(self.config.network.chain_id)
			.nonce(nonce)
			.gas_limit(self.config.gas.mint_gas_limit)
			.gas_price_gwei(self.config.gas.gas_price_gwei)
			.try_build()?;

		let hash = self.delivery.submit(tx).await?;
		tracing::info!(tx = %hash, nonce, "mint transaction sent");

		let receipt = self.delivery.wait_for_confirmation(&hash).await?;
		if !receipt.success {
			return Err(PipelineError::TransactionReverted(format!(
				"mint transaction {} reverted",
				receipt.hash
			)));
		}
		Ok(receipt)
	}

	/// Runs the verification/report step.
	///
	/// Sleeps for the configured delay (indexer-lag heuristic), reads the
	/// token state back, parses inline metadata when present, and writes
	/// the links file. Metadata decode failures are logged and do not fail
	/// the step; everything else propagates to the caller, which is
	/// expected to log it and exit normally.
	pub async fn verify(
		&self,
		contract_address: &Address,
	) -> Result<VerificationReport, VerificationError> {
		let delay = self.config.verification.delay_seconds;
		if delay > 0 {
			tracing::info!(delay_seconds = delay, "waiting for downstream indexers");
			tokio::time::sleep(Duration::from_secs(delay)).await;
		}

		let chain_id = self.config.network.chain_id;

		let data = self
			.delivery
			.eth_call(contract::call_transaction(
				contract_address,
				chain_id,
				contract::token_counter_calldata(),
			))
			.await?;
		let token_id = contract::decode_token_counter(&data)
			.map_err(|e| VerificationError::Decode(format!("tokenCounter: {}", e)))?;

		let data = self
			.delivery
			.eth_call(contract::call_transaction(
				contract_address,
				chain_id,
				contract::owner_of_calldata(token_id),
			))
			.await?;
		let owner = contract::decode_owner_of(&data)
			.map_err(|e| VerificationError::Decode(format!("ownerOf: {}", e)))?;

		let data = self
			.delivery
			.eth_call(contract::call_transaction(
				contract_address,
				chain_id,
				contract::token_uri_calldata(token_id),
			))
			.await?;
		let token_uri = contract::decode_token_uri(&data)
			.map_err(|e| VerificationError::Decode(format!("tokenURI: {}", e)))?;

		tracing::info!(token_id = %token_id, owner = %owner, "token state read back");
		tracing::info!(token_uri = %token_uri, "token URI");

		let metadata = match parse_inline_metadata(&token_uri) {
			Ok(Some(metadata)) => {
				tracing::info!(
					name = metadata.name.as_deref().unwrap_or(""),
					description = metadata.description.as_deref().unwrap_or(""),
					"parsed token metadata"
				);
				Some(metadata)
			},
			Ok(None) => {
				// Not an inline-data URI (e.g. IPFS); nothing to parse
				tracing::debug!("token URI has no inline-data prefix, skipping metadata");
				None
			},
			Err(e) => {
				tracing::warn!("failed to parse tokenURI JSON: {}", e);
				None
			},
		};

		let links = links::build_links(
			&self.config.verification.opensea_base,
			&self.config.verification.explorer_base,
			contract_address,
		);
		tracing::info!(opensea = %links.opensea_url, explorer = %links.explorer_url, "viewer links");

		let links_path = links::write_links(Path::new(&self.config.verification.links_file), &links)?;
		tracing::info!(path = %links_path.display(), "links saved");

		Ok(VerificationReport {
			token_id,
			owner,
			token_uri,
			metadata,
			links_path,
		})
	}
}

/// Replaces embedded line breaks with single spaces.
///
/// Applied to the description before it is submitted on-chain; the
/// operation is idempotent.
pub fn normalize_description(description: &str) -> String {
	description.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Extracts and decodes inline JSON metadata from a token URI.
///
/// Returns `Ok(None)` when the URI does not carry the recognized prefix;
/// a recognized prefix with an undecodable remainder is an error the
/// caller may choose to swallow.
pub fn parse_inline_metadata(
	token_uri: &str,
) -> Result<Option<TokenMetadata>, serde_json::Error> {
	match token_uri.strip_prefix(contract::DATA_URI_PREFIX) {
		Some(raw_json) => serde_json::from_str(raw_json).map(Some),
		None => Ok(None),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalize_description_replaces_line_breaks() {
		let input = "Beneath the endless sky of dreams,\nA river winds, a song that gleams.";
		let normalized = normalize_description(input);
		assert_eq!(
			normalized,
			"Beneath the endless sky of dreams, A river winds, a song that gleams."
		);
	}

	#[test]
	fn test_normalize_description_handles_crlf() {
		assert_eq!(normalize_description("a\r\nb\rc"), "a b c");
	}

	#[test]
	fn test_normalize_description_is_idempotent() {
		let input = "line one\nline two\nline three";
		let once = normalize_description(input);
		let twice = normalize_description(&once);
		assert_eq!(once, twice);
	}

	#[test]
	fn test_parse_inline_metadata_with_prefix() {
		let uri = format!(
			"{}{}",
			contract::DATA_URI_PREFIX,
			r#"{"name":"Echoes of the Horizon","description":"d","image":"","attributes":[]}"#
		);
		let metadata = parse_inline_metadata(&uri).unwrap().unwrap();
		assert_eq!(metadata.name.as_deref(), Some("Echoes of the Horizon"));
	}

	#[test]
	fn test_parse_inline_metadata_malformed_json_is_error() {
		let uri = format!("{}{}", contract::DATA_URI_PREFIX, "{not json");
		let result = parse_inline_metadata(&uri);
		assert!(result.is_err());
	}

	#[test]
	fn test_parse_inline_metadata_foreign_uri_is_skipped() {
		let result = parse_inline_metadata("ipfs://QmSomeHash").unwrap();
		assert!(result.is_none());
	}
}
