//! Configuration module for the Parashyrama minting pipeline.
//!
//! Non-secret parameters (contract source, gas limits, mint text,
//! verification knobs) live in an optional TOML file and fall back to the
//! defaults below. The three secrets (private key, wallet address and RPC
//! endpoint) are only ever read from the process environment and are
//! required; there are no defaults for them.

use minter_types::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable holding the signing key.
pub const ENV_PRIVATE_KEY: &str = "PRIVATE_KEY";
/// Environment variable holding the sender wallet address.
pub const ENV_WALLET_ADDRESS: &str = "WALLET_ADDRESS";
/// Environment variable holding the RPC endpoint URL.
pub const ENV_RPC_URL: &str = "RPC_URL";

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when a required environment variable is missing or empty.
	#[error("Missing required environment variable: {0}")]
	MissingEnv(&'static str),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the huge input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the minting pipeline.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Contract source and compiler settings.
	#[serde(default)]
	pub contract: ContractConfig,
	/// Network parameters.
	#[serde(default)]
	pub network: NetworkConfig,
	/// Fixed gas parameters for the two transactions.
	#[serde(default)]
	pub gas: GasConfig,
	/// Title and description minted into the token.
	#[serde(default)]
	pub mint: MintConfig,
	/// Verification and report settings.
	#[serde(default)]
	pub verification: VerificationConfig,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			contract: ContractConfig::default(),
			network: NetworkConfig::default(),
			gas: GasConfig::default(),
			mint: MintConfig::default(),
			verification: VerificationConfig::default(),
		}
	}
}

impl Config {
	/// Loads configuration from a TOML file and validates it.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path)?;
		let config: Config = toml::from_str(&content)?;
		config.validate()?;
		Ok(config)
	}

	/// Checks the invariants the pipeline relies on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.contract.name.is_empty() {
			return Err(ConfigError::Validation(
				"contract.name must not be empty".to_string(),
			));
		}
		if self.contract.solc_version.is_empty() {
			return Err(ConfigError::Validation(
				"contract.solc_version must not be empty".to_string(),
			));
		}
		if self.gas.deploy_gas_limit == 0 || self.gas.mint_gas_limit == 0 {
			return Err(ConfigError::Validation(
				"gas limits must be non-zero".to_string(),
			));
		}
		if self.gas.gas_price_gwei == 0 {
			return Err(ConfigError::Validation(
				"gas.gas_price_gwei must be non-zero".to_string(),
			));
		}
		if self.mint.title.is_empty() {
			return Err(ConfigError::Validation(
				"mint.title must not be empty".to_string(),
			));
		}
		Ok(())
	}
}

/// Contract source and compiler settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContractConfig {
	/// Path to the Solidity source file.
	#[serde(default = "default_contract_source")]
	pub source: String,
	/// Contract name inside the source file.
	#[serde(default = "default_contract_name")]
	pub name: String,
	/// Pinned solc version; a mismatch aborts the run.
	#[serde(default = "default_solc_version")]
	pub solc_version: String,
	/// File the ABI JSON is written to, overwritten on each run.
	#[serde(default = "default_abi_output")]
	pub abi_output: String,
}

impl Default for ContractConfig {
	fn default() -> Self {
		ContractConfig {
			source: default_contract_source(),
			name: default_contract_name(),
			solc_version: default_solc_version(),
			abi_output: default_abi_output(),
		}
	}
}

/// Network parameters.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// Chain ID used for replay protection when signing.
	#[serde(default = "default_chain_id")]
	pub chain_id: u64,
}

impl Default for NetworkConfig {
	fn default() -> Self {
		NetworkConfig {
			chain_id: default_chain_id(),
		}
	}
}

/// Fixed gas parameters. No estimation is performed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GasConfig {
	/// Gas limit for the contract-creation transaction.
	#[serde(default = "default_deploy_gas_limit")]
	pub deploy_gas_limit: u64,
	/// Gas limit for the mint transaction.
	#[serde(default = "default_mint_gas_limit")]
	pub mint_gas_limit: u64,
	/// Gas price in gwei, applied to both transactions.
	#[serde(default = "default_gas_price_gwei")]
	pub gas_price_gwei: u64,
}

impl Default for GasConfig {
	fn default() -> Self {
		GasConfig {
			deploy_gas_limit: default_deploy_gas_limit(),
			mint_gas_limit: default_mint_gas_limit(),
			gas_price_gwei: default_gas_price_gwei(),
		}
	}
}

/// Title and description minted into the token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MintConfig {
	/// Token title.
	#[serde(default = "default_title")]
	pub title: String,
	/// Token description. Embedded newlines are replaced with spaces
	/// before submission.
	#[serde(default = "default_description")]
	pub description: String,
}

impl Default for MintConfig {
	fn default() -> Self {
		MintConfig {
			title: default_title(),
			description: default_description(),
		}
	}
}

/// Verification and report settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
	/// Seconds to wait before reading back token state. A heuristic for
	/// third-party indexer lag, not a correctness mechanism.
	#[serde(default = "default_delay_seconds")]
	pub delay_seconds: u64,
	/// Links file name. If the file exists, a timestamp-suffixed variant
	/// is written instead.
	#[serde(default = "default_links_file")]
	pub links_file: String,
	/// Base URL for the marketplace link.
	#[serde(default = "default_opensea_base")]
	pub opensea_base: String,
	/// Base URL for the block-explorer link.
	#[serde(default = "default_explorer_base")]
	pub explorer_base: String,
}

impl Default for VerificationConfig {
	fn default() -> Self {
		VerificationConfig {
			delay_seconds: default_delay_seconds(),
			links_file: default_links_file(),
			opensea_base: default_opensea_base(),
			explorer_base: default_explorer_base(),
		}
	}
}

/// Secrets loaded from the process environment. Loaded once at start,
/// immutable thereafter.
#[derive(Debug, Clone)]
pub struct Secrets {
	/// Signing key for both transactions.
	pub private_key: SecretString,
	/// Sender wallet address.
	pub wallet_address: String,
	/// RPC endpoint URL.
	pub rpc_url: String,
}

impl Secrets {
	/// Reads the three required values from the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		Ok(Secrets {
			private_key: required_env(ENV_PRIVATE_KEY)?.into(),
			wallet_address: required_env(ENV_WALLET_ADDRESS)?,
			rpc_url: required_env(ENV_RPC_URL)?,
		})
	}
}

fn required_env(name: &'static str) -> Result<String, ConfigError> {
	match std::env::var(name) {
		Ok(value) if !value.is_empty() => Ok(value),
		_ => Err(ConfigError::MissingEnv(name)),
	}
}

fn default_contract_source() -> String {
	"contracts/ParashyramaNFT.sol".to_string()
}

fn default_contract_name() -> String {
	"ParashyramaNFT".to_string()
}

fn default_solc_version() -> String {
	"0.8.17".to_string()
}

fn default_abi_output() -> String {
	"ParashyramaNFT_abi.json".to_string()
}

fn default_chain_id() -> u64 {
	137 // Polygon mainnet
}

fn default_deploy_gas_limit() -> u64 {
	8_000_000
}

fn default_mint_gas_limit() -> u64 {
	500_000
}

fn default_gas_price_gwei() -> u64 {
	100
}

fn default_title() -> String {
	"Echoes of the Horizon".to_string()
}

fn default_description() -> String {
	"Beneath the endless sky of dreams,\n\
	 A river winds, a song that gleams.\n\
	 Where shadows dance with the rising sun,\n\
	 A journey calls, a race begun."
		.to_string()
}

fn default_delay_seconds() -> u64 {
	30
}

fn default_links_file() -> String {
	"ParashyramaNFT_Links.txt".to_string()
}

fn default_opensea_base() -> String {
	"https://opensea.io/assets/matic".to_string()
}

fn default_explorer_base() -> String {
	"https://polygonscan.com/address".to_string()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_default_config_is_valid() {
		let config = Config::default();
		assert!(config.validate().is_ok());
		assert_eq!(config.gas.deploy_gas_limit, 8_000_000);
		assert_eq!(config.gas.mint_gas_limit, 500_000);
		assert_eq!(config.gas.gas_price_gwei, 100);
		assert_eq!(config.verification.delay_seconds, 30);
		assert_eq!(config.mint.title, "Echoes of the Horizon");
	}

	#[test]
	fn test_empty_file_uses_defaults() {
		let config: Config = toml::from_str("").unwrap();
		assert_eq!(config.contract.name, "ParashyramaNFT");
		assert_eq!(config.contract.solc_version, "0.8.17");
		assert_eq!(config.network.chain_id, 137);
	}

	#[test]
	fn test_partial_override() {
		let config: Config = toml::from_str(
			r#"
			[verification]
			delay_seconds = 5

			[gas]
			gas_price_gwei = 50
			"#,
		)
		.unwrap();
		assert_eq!(config.verification.delay_seconds, 5);
		assert_eq!(config.gas.gas_price_gwei, 50);
		// Untouched sections keep their defaults
		assert_eq!(config.gas.deploy_gas_limit, 8_000_000);
	}

	#[test]
	fn test_from_file() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[mint]\ntitle = \"Other Title\"").unwrap();

		let config = Config::from_file(file.path()).unwrap();
		assert_eq!(config.mint.title, "Other Title");
	}

	#[test]
	fn test_validation_rejects_zero_gas() {
		let config: Config = toml::from_str("[gas]\ndeploy_gas_limit = 0").unwrap();
		let result = config.validate();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_validation_rejects_empty_title() {
		let config: Config = toml::from_str("[mint]\ntitle = \"\"").unwrap();
		let result = config.validate();
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_parse_error_is_compact() {
		let result: Result<Config, ConfigError> =
			toml::from_str::<Config>("not valid toml [").map_err(Into::into);
		assert!(matches!(result, Err(ConfigError::Parse(_))));
	}

	#[test]
	fn test_secrets_from_env_missing() {
		// The test environment does not define these variables
		if std::env::var(ENV_PRIVATE_KEY).is_err() {
			let result = Secrets::from_env();
			assert!(matches!(result, Err(ConfigError::MissingEnv(_))));
		}
	}
}
