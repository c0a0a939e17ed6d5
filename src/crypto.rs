/*!
 * Smartcom default password derivation
 *
 * The factory WPA key of Smartcom access points is a truncated MD5 digest
 * of the BSSID serial part followed by a fixed vendor string:
 *
 *   password = md5(bssid[4..] || "SmartcomWifi")[..8]
 *
 * References:
 * - https://sec.stanev.org/advisories/Smartcom_default_WPA_password.txt
 */

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};

use crate::bssid::{normalize, NormalizedBssid, BSSID_LEN};
use crate::error::AuditError;

/// Hex characters in an MD5 digest
const MD5_HEX_LEN: usize = 32;

/// A derived factory password (lowercase hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DerivedPassword(String);

impl DerivedPassword {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DerivedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Constants of one manufacturer's key derivation
///
/// Held as an explicit value rather than globals so alternate address blocks
/// can be audited by loading a profile from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorProfile {
    /// Display name of the manufacturer
    pub name: String,

    /// Lowercase OUI (6 hex characters) the BSSID must start with
    pub prefix: String,

    /// Number of leading BSSID characters dropped from the preimage
    pub serial_offset: usize,

    /// Literal text appended to the serial part
    pub suffix: String,

    /// Number of digest hex characters kept as the password
    pub password_len: usize,
}

impl Default for VendorProfile {
    fn default() -> Self {
        Self::smartcom()
    }
}

impl VendorProfile {
    /// Profile published for Smartcom (OUI 50:A9:DE)
    pub fn smartcom() -> Self {
        Self {
            name: "Smartcom".to_string(),
            prefix: "50a9de".to_string(),
            serial_offset: 4,
            suffix: "SmartcomWifi".to_string(),
            password_len: 8,
        }
    }

    /// Check that the constants describe a derivation that can succeed
    pub fn validate(&self) -> Result<(), AuditError> {
        if self.prefix.len() != 6
            || !self
                .prefix
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            return Err(AuditError::InvalidProfile(format!(
                "prefix '{}' must be 6 lowercase hex characters",
                self.prefix
            )));
        }

        if self.serial_offset > BSSID_LEN {
            return Err(AuditError::InvalidProfile(format!(
                "serial offset {} exceeds BSSID length {}",
                self.serial_offset, BSSID_LEN
            )));
        }

        if self.password_len == 0 || self.password_len > MD5_HEX_LEN {
            return Err(AuditError::InvalidProfile(format!(
                "password length {} must be between 1 and {}",
                self.password_len, MD5_HEX_LEN
            )));
        }

        Ok(())
    }

    /// Load and validate a profile from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read vendor profile {}", path.display()))?;
        let profile: VendorProfile = serde_json::from_str(&json)
            .context("Failed to parse vendor profile")?;
        profile.validate()?;
        Ok(profile)
    }

    /// Whether the BSSID falls in this vendor's address block
    pub fn is_eligible(&self, bssid: &NormalizedBssid) -> bool {
        bssid.as_str().starts_with(&self.prefix)
    }

    /// Build the digest input: serial part of the BSSID followed by the suffix
    pub fn preimage(&self, bssid: &NormalizedBssid) -> String {
        let serial: String = bssid.as_str().chars().skip(self.serial_offset).collect();
        format!("{}{}", serial, self.suffix)
    }

    /// Derive the factory password of an eligible BSSID
    ///
    /// Fails with [`AuditError::UnsupportedVendor`] when the address is not in
    /// this vendor's block, and with [`AuditError::NonAscii`] when the digest
    /// input cannot be encoded as ASCII.
    pub fn derive(&self, bssid: &NormalizedBssid) -> Result<DerivedPassword, AuditError> {
        if !self.is_eligible(bssid) {
            return Err(AuditError::UnsupportedVendor {
                bssid: bssid.to_string(),
                vendor: self.name.clone(),
                expected_prefix: self.prefix.clone(),
            });
        }

        let preimage = self.preimage(bssid);
        if !preimage.is_ascii() {
            return Err(AuditError::NonAscii {
                bssid: bssid.to_string(),
            });
        }

        let mut digest = md5_hex(preimage.as_bytes());
        digest.truncate(self.password_len.min(MD5_HEX_LEN));
        Ok(DerivedPassword(digest))
    }
}

/// Lowercase hex MD5 digest of `data`
#[inline]
pub fn md5_hex(data: &[u8]) -> String {
    format!("{:x}", Md5::digest(data))
}

/// Derive with the Smartcom profile
pub fn derive(bssid: &NormalizedBssid) -> Result<DerivedPassword, AuditError> {
    VendorProfile::smartcom().derive(bssid)
}

/// Normalize a raw address and derive its Smartcom password
pub fn smartcom_password(raw: &str) -> Result<DerivedPassword, AuditError> {
    derive(&normalize(raw)?)
}
