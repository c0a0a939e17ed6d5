/*!
 * Typed failures of the password derivation core
 *
 * Both kinds are deterministic and never worth retrying: the same input
 * always fails the same way.
 */

use serde::{Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuditError {
    /// The address does not reduce to exactly 12 characters once colons are stripped
    #[error("invalid BSSID '{input}': expected 12 characters without separators, got {length}")]
    InvalidFormat { input: String, length: usize },

    /// The address is well formed but belongs to another manufacturer
    #[error("BSSID {bssid} is not in the {vendor} address block ({expected_prefix})")]
    UnsupportedVendor {
        bssid: String,
        vendor: String,
        expected_prefix: String,
    },

    /// The digest input holds characters outside ASCII
    #[error("BSSID '{bssid}' contains non-ASCII characters")]
    NonAscii { bssid: String },

    /// A vendor profile carries constants the derivation cannot work with
    #[error("invalid vendor profile: {0}")]
    InvalidProfile(String),
}

impl AuditError {
    /// Malformed input, as opposed to a foreign vendor or a bad profile
    pub fn is_invalid_format(&self) -> bool {
        matches!(
            self,
            AuditError::InvalidFormat { .. } | AuditError::NonAscii { .. }
        )
    }

    pub fn is_unsupported_vendor(&self) -> bool {
        matches!(self, AuditError::UnsupportedVendor { .. })
    }
}

/// Reports carry the error message
impl Serialize for AuditError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
