//! Token metadata types.
//!
//! The contract returns token metadata as a JSON document embedded directly
//! in the token URI. Fields are optional so that partial documents still
//! decode; missing fields are simply not reported.

use serde::{Deserialize, Serialize};

/// Metadata document embedded in the token URI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenMetadata {
	/// Token title.
	#[serde(default)]
	pub name: Option<String>,
	/// Token description, a single line after newline normalization.
	#[serde(default)]
	pub description: Option<String>,
	/// Image payload, typically an embedded SVG data URI.
	#[serde(default)]
	pub image: Option<String>,
	/// Free-form attribute list.
	#[serde(default)]
	pub attributes: serde_json::Value,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_full_document_decodes() {
		let json = r#"{"name":"Echoes of the Horizon","description":"A poem","image":"","attributes":[]}"#;
		let metadata: TokenMetadata = serde_json::from_str(json).unwrap();
		assert_eq!(metadata.name.as_deref(), Some("Echoes of the Horizon"));
		assert_eq!(metadata.description.as_deref(), Some("A poem"));
		assert_eq!(metadata.image.as_deref(), Some(""));
		assert!(metadata.attributes.as_array().unwrap().is_empty());
	}

	#[test]
	fn test_partial_document_decodes() {
		let metadata: TokenMetadata = serde_json::from_str(r#"{"name":"Solo"}"#).unwrap();
		assert_eq!(metadata.name.as_deref(), Some("Solo"));
		assert!(metadata.description.is_none());
		assert!(metadata.image.is_none());
		assert!(metadata.attributes.is_null());
	}
}
