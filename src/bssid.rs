/*!
 * BSSID canonicalization
 *
 * Access point addresses arrive in whatever form the scanning tool prints
 * them (`50:A9:DE:12:34:56`, `50a9de123456`, ...). Everything downstream
 * works on one canonical form: lowercase, no separators, 12 characters.
 *
 * Only the length is checked. Non-hex characters pass through untouched,
 * matching the behavior of the published derivation scripts.
 */

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::AuditError;

/// Number of characters in a canonical BSSID
pub const BSSID_LEN: usize = 12;

/// A BSSID in canonical form (lowercase, no colons, 12 characters)
///
/// Can only be built through [`normalize`], so holding one guarantees the
/// length invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NormalizedBssid(String);

impl NormalizedBssid {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three octets, the manufacturer block
    pub fn prefix(&self) -> &str {
        // Canonical form has exactly BSSID_LEN chars; slice on char boundaries
        // in case a permissive input carried multi-byte characters.
        match self.0.char_indices().nth(6) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }

    /// Render as `aa:bb:cc:dd:ee:ff`
    pub fn to_colon_form(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        chars
            .chunks(2)
            .map(|pair| pair.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join(":")
    }
}

impl fmt::Display for NormalizedBssid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedBssid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for NormalizedBssid {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

/// Canonicalize a raw hardware address
///
/// Lowercases the input and strips every `:`. Fails with
/// [`AuditError::InvalidFormat`] unless exactly 12 characters remain.
pub fn normalize(raw: &str) -> Result<NormalizedBssid, AuditError> {
    let bssid: String = raw.to_lowercase().chars().filter(|&c| c != ':').collect();
    let length = bssid.chars().count();

    if length != BSSID_LEN {
        return Err(AuditError::InvalidFormat {
            input: raw.to_string(),
            length,
        });
    }

    Ok(NormalizedBssid(bssid))
}
