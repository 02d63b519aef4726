//! Secret string wrapper for sensitive values.
//!
//! Keeps the private key out of Debug output and log lines; access to the
//! underlying value goes through an explicit closure.

use std::fmt;

/// A string holding sensitive data such as a private key.
///
/// The value is never printed by `Debug` or `Display`.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
	/// Runs the given closure with the exposed secret value.
	pub fn with_exposed<T>(&self, f: impl FnOnce(&str) -> T) -> T {
		f(&self.0)
	}
}

impl From<String> for SecretString {
	fn from(s: String) -> Self {
		SecretString(s)
	}
}

impl From<&str> for SecretString {
	fn from(s: &str) -> Self {
		SecretString(s.to_string())
	}
}

impl fmt::Debug for SecretString {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("SecretString(***)")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_debug_redacts_value() {
		let secret = SecretString::from("0xdeadbeef");
		assert_eq!(format!("{:?}", secret), "SecretString(***)");
	}

	#[test]
	fn test_with_exposed_reveals_value() {
		let secret = SecretString::from("0xdeadbeef");
		secret.with_exposed(|s| assert_eq!(s, "0xdeadbeef"));
	}
}
