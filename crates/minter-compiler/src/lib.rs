//! Solidity compiler invocation for the minting pipeline.
//!
//! Drives a pinned `solc` binary as a subprocess: verifies the installed
//! version against the pin, compiles the contract source with
//! `--combined-json abi,bin`, extracts the ABI and bytecode for the named
//! contract, and writes the ABI JSON to its fixed output file. Any install,
//! version or compile failure aborts the run with no partial output.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::process::Command;

/// Errors that can occur while compiling the contract.
#[derive(Debug, Error)]
pub enum CompilerError {
	/// The solc binary is missing or reports the wrong version.
	#[error("Compiler install error: {0}")]
	Install(String),
	/// solc exited with a non-zero status.
	#[error("Compile failed: {0}")]
	Compile(String),
	/// The combined-json output did not contain the expected artifact.
	#[error("Artifact error: {0}")]
	Artifact(String),
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing compiler output.
	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),
}

/// Compiled contract artifact: ABI descriptor plus executable bytecode.
#[derive(Debug, Clone)]
pub struct CompiledContract {
	/// Contract name as it appears in the source.
	pub name: String,
	/// ABI as a JSON document, ready to be written or used for encoding.
	pub abi: serde_json::Value,
	/// Creation bytecode.
	pub bytecode: Vec<u8>,
}

/// Pinned-version solc driver.
#[derive(Debug, Clone)]
pub struct SolcCompiler {
	binary: PathBuf,
	version: String,
}

impl SolcCompiler {
	/// Creates a compiler handle for the given pinned version, resolving
	/// `solc` from PATH.
	pub fn new(version: impl Into<String>) -> Self {
		Self {
			binary: PathBuf::from("solc"),
			version: version.into(),
		}
	}

	/// Creates a compiler handle with an explicit binary path.
	pub fn with_binary(binary: impl Into<PathBuf>, version: impl Into<String>) -> Self {
		Self {
			binary: binary.into(),
			version: version.into(),
		}
	}

	/// Verifies that the installed solc matches the pinned version.
	///
	/// A missing binary and a version mismatch are both install errors;
	/// either aborts the run before any source is read.
	pub async fn ensure_version(&self) -> Result<(), CompilerError> {
		let output = Command::new(&self.binary)
			.arg("--version")
			.output()
			.await
			.map_err(|e| {
				CompilerError::Install(format!(
					"failed to run {}: {}",
					self.binary.display(),
					e
				))
			})?;

		let stdout = String::from_utf8_lossy(&output.stdout);
		if !version_matches(&stdout, &self.version) {
			return Err(CompilerError::Install(format!(
				"solc version mismatch: pinned {}, installed reports: {}",
				self.version,
				stdout.trim()
			)));
		}

		tracing::debug!(version = %self.version, "solc version verified");
		Ok(())
	}

	/// Compiles the source file and extracts the named contract's artifact.
	pub async fn compile(
		&self,
		source: &Path,
		contract_name: &str,
	) -> Result<CompiledContract, CompilerError> {
		self.ensure_version().await?;

		let output = Command::new(&self.binary)
			.arg("--combined-json")
			.arg("abi,bin")
			.arg(source)
			.output()
			.await
			.map_err(|e| {
				CompilerError::Install(format!(
					"failed to run {}: {}",
					self.binary.display(),
					e
				))
			})?;

		if !output.status.success() {
			return Err(CompilerError::Compile(
				String::from_utf8_lossy(&output.stderr).trim().to_string(),
			));
		}

		let combined: serde_json::Value = serde_json::from_slice(&output.stdout)?;
		let artifact = extract_contract(&combined, contract_name)?;

		tracing::info!(
			contract = %artifact.name,
			bytecode_len = artifact.bytecode.len(),
			"contract compiled"
		);
		Ok(artifact)
	}

	/// Writes the artifact's ABI JSON to the given path, silently
	/// overwriting any existing file.
	pub fn write_abi(artifact: &CompiledContract, path: &Path) -> Result<(), CompilerError> {
		let json = serde_json::to_string(&artifact.abi)?;
		std::fs::write(path, json)?;
		tracing::info!(path = %path.display(), "ABI written");
		Ok(())
	}
}

/// Checks whether solc's `--version` output reports the pinned version.
fn version_matches(version_output: &str, pinned: &str) -> bool {
	version_output
		.lines()
		.filter_map(|line| line.strip_prefix("Version: "))
		.any(|rest| {
			rest.strip_prefix(pinned)
				.is_some_and(|tail| tail.is_empty() || tail.starts_with('+') || tail.starts_with('-'))
		})
}

/// Extracts `{abi, bytecode}` for the named contract from combined-json
/// output. Keys have the form `"<source path>:<ContractName>"`.
fn extract_contract(
	combined: &serde_json::Value,
	contract_name: &str,
) -> Result<CompiledContract, CompilerError> {
	let contracts = combined
		.get("contracts")
		.and_then(|c| c.as_object())
		.ok_or_else(|| CompilerError::Artifact("no 'contracts' in compiler output".to_string()))?;

	let (_, entry) = contracts
		.iter()
		.find(|(key, _)| key.rsplit(':').next() == Some(contract_name))
		.ok_or_else(|| {
			CompilerError::Artifact(format!(
				"contract '{}' not found in compiler output",
				contract_name
			))
		})?;

	// Older solc releases emit the ABI as an embedded JSON string.
	let abi = match entry.get("abi") {
		Some(serde_json::Value::String(s)) => serde_json::from_str(s)?,
		Some(value) => value.clone(),
		None => {
			return Err(CompilerError::Artifact(format!(
				"contract '{}' has no ABI",
				contract_name
			)))
		},
	};

	let bin = entry
		.get("bin")
		.and_then(|b| b.as_str())
		.ok_or_else(|| {
			CompilerError::Artifact(format!("contract '{}' has no bytecode", contract_name))
		})?;
	let bytecode = hex::decode(bin.trim_start_matches("0x"))
		.map_err(|e| CompilerError::Artifact(format!("invalid bytecode hex: {}", e)))?;

	if bytecode.is_empty() {
		return Err(CompilerError::Artifact(format!(
			"contract '{}' produced empty bytecode",
			contract_name
		)));
	}

	Ok(CompiledContract {
		name: contract_name.to_string(),
		abi,
		bytecode,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	fn combined_fixture() -> serde_json::Value {
		serde_json::json!({
			"contracts": {
				"contracts/ParashyramaNFT.sol:ParashyramaNFT": {
					"abi": [
						{"type": "function", "name": "tokenCounter", "inputs": [], "outputs": [{"type": "uint256"}]}
					],
					"bin": "6080604052"
				}
			},
			"version": "0.8.17+commit.8df45f5f"
		})
	}

	#[test]
	fn test_version_matches() {
		let output = "solc, the solidity compiler commandline interface\nVersion: 0.8.17+commit.8df45f5f.Linux.g++";
		assert!(version_matches(output, "0.8.17"));
		assert!(!version_matches(output, "0.8.19"));
	}

	#[test]
	fn test_extract_contract_success() {
		let artifact = extract_contract(&combined_fixture(), "ParashyramaNFT").unwrap();
		assert_eq!(artifact.name, "ParashyramaNFT");
		assert_eq!(artifact.bytecode, vec![0x60, 0x80, 0x60, 0x40, 0x52]);
		assert!(artifact.abi.is_array());
	}

	#[test]
	fn test_extract_contract_abi_as_string() {
		let combined = serde_json::json!({
			"contracts": {
				"a.sol:Nft": {
					"abi": "[{\"type\":\"function\",\"name\":\"ownerOf\"}]",
					"bin": "00"
				}
			}
		});
		let artifact = extract_contract(&combined, "Nft").unwrap();
		assert!(artifact.abi.is_array());
	}

	#[test]
	fn test_extract_contract_missing() {
		let result = extract_contract(&combined_fixture(), "Unknown");
		assert!(matches!(result, Err(CompilerError::Artifact(_))));
	}

	#[test]
	fn test_extract_contract_empty_bytecode() {
		let combined = serde_json::json!({
			"contracts": {
				"a.sol:Iface": { "abi": [], "bin": "" }
			}
		});
		let result = extract_contract(&combined, "Iface");
		assert!(matches!(result, Err(CompilerError::Artifact(_))));
	}

	#[test]
	fn test_write_abi_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("abi.json");
		std::fs::write(&path, "stale").unwrap();

		let artifact = extract_contract(&combined_fixture(), "ParashyramaNFT").unwrap();
		SolcCompiler::write_abi(&artifact, &path).unwrap();

		let written = std::fs::read_to_string(&path).unwrap();
		let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
		assert!(parsed.is_array());
	}

	#[tokio::test]
	async fn test_missing_binary_is_install_error() {
		let compiler = SolcCompiler::with_binary("/nonexistent/solc", "0.8.17");
		let result = compiler.ensure_version().await;
		assert!(matches!(result, Err(CompilerError::Install(_))));
	}
}
