//! Common types for the Parashyrama minting pipeline.
//!
//! This crate defines the data types shared by the compiler, delivery and
//! pipeline crates, keeping blockchain-facing representations in one place.

/// Account and transaction types.
pub mod account;
/// Transaction delivery types: hashes, receipts, logs.
pub mod delivery;
/// Token metadata types returned by the contract's token URI.
pub mod metadata;
/// Secure string type for handling sensitive data.
pub mod secret_string;
/// Conversion and formatting helpers.
pub mod utils;

pub use account::{Address, Transaction};
pub use delivery::{Log, TransactionHash, TransactionReceipt};
pub use metadata::TokenMetadata;
pub use secret_string::SecretString;
pub use utils::{
	builders::TransactionBuilder, current_timestamp, gwei_to_wei, parse_address, with_0x_prefix,
	without_0x_prefix,
};
