//! Links file writer.
//!
//! After a successful mint the two human-facing URLs are written to a text
//! file. An existing file is never overwritten: a timestamp-suffixed
//! variant name is used instead.

use minter_types::{current_timestamp, Address};
use std::path::{Path, PathBuf};

/// The two viewer URLs constructed for a deployed contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Links {
	/// Marketplace URL.
	pub opensea_url: String,
	/// Block-explorer URL.
	pub explorer_url: String,
}

/// Builds the viewer URLs from the configured base URLs and the contract
/// address.
pub fn build_links(opensea_base: &str, explorer_base: &str, contract: &Address) -> Links {
	Links {
		opensea_url: format!("{}/{}", opensea_base.trim_end_matches('/'), contract),
		explorer_url: format!("{}/{}", explorer_base.trim_end_matches('/'), contract),
	}
}

/// Writes the links file, returning the path actually written.
///
/// If `path` already exists, the content goes to a sibling file whose name
/// carries the current unix timestamp; the pre-existing file is left
/// untouched.
pub fn write_links(path: &Path, links: &Links) -> std::io::Result<PathBuf> {
	let target = if path.exists() {
		timestamped_variant(path, current_timestamp())
	} else {
		path.to_path_buf()
	};

	let content = format!(
		"OpenSea: {}\nPolygonScan: {}\n",
		links.opensea_url, links.explorer_url
	);
	std::fs::write(&target, content)?;
	Ok(target)
}

fn timestamped_variant(path: &Path, timestamp: u64) -> PathBuf {
	let stem = path
		.file_stem()
		.and_then(|s| s.to_str())
		.unwrap_or("Links");
	let name = match path.extension().and_then(|e| e.to_str()) {
		Some(ext) => format!("{}_{}.{}", stem, timestamp, ext),
		None => format!("{}_{}", stem, timestamp),
	};
	path.with_file_name(name)
}
