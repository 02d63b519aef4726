//! Core pipeline for the Parashyrama NFT minter.
//!
//! Implements the sequential compile → deploy → mint → verify flow on top
//! of the delivery layer. Deploy and mint errors are fatal; the
//! verification step carries its own error type so callers can distinguish
//! parse failures from network failures and choose to log instead of
//! abort.

use minter_delivery::DeliveryError;
use minter_types::utils::builders::TransactionBuilderError;
use thiserror::Error;

/// Contract calldata encoding and decoding.
pub mod contract;
/// Links file construction and writing.
pub mod links;
/// The pipeline steps.
pub mod pipeline;

pub use pipeline::{
	normalize_description, parse_inline_metadata, MintOutcome, MintPipeline, VerificationReport,
};

/// Errors from the deploy and mint steps. All fatal, no retry.
#[derive(Debug, Error)]
pub enum PipelineError {
	/// Error from the delivery layer (RPC or signing).
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
	/// A confirmed transaction reverted.
	#[error("Transaction reverted: {0}")]
	TransactionReverted(String),
	/// The deployment receipt carried no contract address.
	#[error("Deployment receipt has no contract address")]
	MissingContractAddress,
	/// A transaction could not be constructed.
	#[error("Transaction build error: {0}")]
	Build(#[from] TransactionBuilderError),
}

/// Errors from the verification/report step.
///
/// Distinguishes network failures from decode failures at the call site;
/// the binary logs these and exits normally since the mint is already
/// confirmed.
#[derive(Debug, Error)]
pub enum VerificationError {
	/// Error from the delivery layer during a read-only call.
	#[error(transparent)]
	Delivery(#[from] DeliveryError),
	/// Return data from a read-only call did not decode.
	#[error("Return data decode error: {0}")]
	Decode(String),
	/// The links file could not be written.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}
