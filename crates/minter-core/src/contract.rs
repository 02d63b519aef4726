//! Calldata encoding and return-data decoding for the NFT contract.
//!
//! The contract surface this pipeline touches is small enough to describe
//! inline with `sol!`; the constructor takes no arguments, so the creation
//! payload is the raw bytecode.

use alloy_primitives::U256;
use alloy_sol_types::{sol, SolCall};
use minter_types::{Address, Transaction};

sol! {
	interface IParashyramaNft {
		function mintTextNFT(string memory title, string memory description) external;
		function tokenCounter() external view returns (uint256);
		function ownerOf(uint256 tokenId) external view returns (address);
		function tokenURI(uint256 tokenId) external view returns (string memory);
	}
}

/// Prefix marking token URIs that embed their JSON metadata inline.
pub const DATA_URI_PREFIX: &str = "data:application/json;utf8,";

/// Encodes the `mintTextNFT(string,string)` calldata.
pub fn mint_calldata(title: &str, description: &str) -> Vec<u8> {
	IParashyramaNft::mintTextNFTCall {
		title: title.to_string(),
		description: description.to_string(),
	}
	.abi_encode()
}

/// Encodes the `tokenCounter()` calldata.
pub fn token_counter_calldata() -> Vec<u8> {
	IParashyramaNft::tokenCounterCall {}.abi_encode()
}

/// Encodes the `ownerOf(uint256)` calldata.
pub fn owner_of_calldata(token_id: U256) -> Vec<u8> {
	IParashyramaNft::ownerOfCall { tokenId: token_id }.abi_encode()
}

/// Encodes the `tokenURI(uint256)` calldata.
pub fn token_uri_calldata(token_id: U256) -> Vec<u8> {
	IParashyramaNft::tokenURICall { tokenId: token_id }.abi_encode()
}

/// Decodes the `tokenCounter()` return value.
pub fn decode_token_counter(data: &[u8]) -> Result<U256, alloy_sol_types::Error> {
	IParashyramaNft::tokenCounterCall::abi_decode_returns(data)
}

/// Decodes the `ownerOf(uint256)` return value.
pub fn decode_owner_of(data: &[u8]) -> Result<Address, alloy_sol_types::Error> {
	IParashyramaNft::ownerOfCall::abi_decode_returns(data).map(Into::into)
}

/// Decodes the `tokenURI(uint256)` return value.
pub fn decode_token_uri(data: &[u8]) -> Result<String, alloy_sol_types::Error> {
	IParashyramaNft::tokenURICall::abi_decode_returns(data)
}

/// Builds a read-only call transaction. Gas fields stay unset; the node
/// executes the call without pricing it.
pub fn call_transaction(contract: &Address, chain_id: u64, data: Vec<u8>) -> Transaction {
	Transaction {
		to: Some(contract.clone()),
		data,
		value: U256::ZERO,
		chain_id,
		nonce: None,
		gas_limit: None,
		gas_price: None,
	}
}

#[cfg(test)]
pub(crate) mod test_encoding {
	//! Return-data encoders used by the pipeline tests to fake eth_call
	//! responses.

	use super::*;

	pub fn token_counter_returns(token_id: U256) -> Vec<u8> {
		IParashyramaNft::tokenCounterCall::abi_encode_returns(&token_id)
	}

	pub fn owner_of_returns(owner: &Address) -> Vec<u8> {
		let mut bytes = [0u8; 20];
		bytes.copy_from_slice(&owner.0);
		IParashyramaNft::ownerOfCall::abi_encode_returns(&alloy_primitives::Address::from(bytes))
	}

	pub fn token_uri_returns(uri: &str) -> Vec<u8> {
		IParashyramaNft::tokenURICall::abi_encode_returns(&uri.to_string())
	}

	pub fn token_counter_selector() -> [u8; 4] {
		IParashyramaNft::tokenCounterCall::SELECTOR
	}

	pub fn owner_of_selector() -> [u8; 4] {
		IParashyramaNft::ownerOfCall::SELECTOR
	}

	pub fn token_uri_selector() -> [u8; 4] {
		IParashyramaNft::tokenURICall::SELECTOR
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use minter_types::parse_address;

	#[test]
	fn test_mint_calldata_carries_both_strings() {
		let data = mint_calldata("Echoes of the Horizon", "A journey calls");
		assert_eq!(&data[..4], &IParashyramaNft::mintTextNFTCall::SELECTOR);

		let decoded = IParashyramaNft::mintTextNFTCall::abi_decode(&data).unwrap();
		assert_eq!(decoded.title, "Echoes of the Horizon");
		assert_eq!(decoded.description, "A journey calls");
	}

	#[test]
	fn test_read_calldata_selectors_differ() {
		let counter = token_counter_calldata();
		let owner = owner_of_calldata(U256::ZERO);
		let uri = token_uri_calldata(U256::ZERO);
		assert_ne!(counter[..4], owner[..4]);
		assert_ne!(owner[..4], uri[..4]);
	}

	#[test]
	fn test_decode_round_trip() {
		let owner = parse_address("0x1111111111111111111111111111111111111111").unwrap();

		let id = decode_token_counter(&test_encoding::token_counter_returns(U256::from(7))).unwrap();
		assert_eq!(id, U256::from(7));

		let decoded = decode_owner_of(&test_encoding::owner_of_returns(&owner)).unwrap();
		assert_eq!(decoded, owner);

		let uri = decode_token_uri(&test_encoding::token_uri_returns("ipfs://abc")).unwrap();
		assert_eq!(uri, "ipfs://abc");
	}

	#[test]
	fn test_call_transaction_has_no_gas_fields() {
		let contract = parse_address("0x2222222222222222222222222222222222222222").unwrap();
		let tx = call_transaction(&contract, 137, token_counter_calldata());
		assert_eq!(tx.to.as_ref(), Some(&contract));
		assert!(tx.nonce.is_none());
		assert!(tx.gas_limit.is_none());
		assert!(tx.gas_price.is_none());
	}
}
