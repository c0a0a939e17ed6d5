//! Smartcom default WPA password derivation.
//!
//! Audits nearby access points for the factory key
//! `md5(bssid[4..] || "SmartcomWifi")[..8]`.

pub mod audit;
pub mod bssid;
pub mod crypto;
pub mod error;
pub mod network;

pub use audit::{audit, evaluate, AuditReport, AuditStatus, Outcome};
pub use bssid::{normalize, NormalizedBssid, BSSID_LEN};
pub use crypto::{derive, md5_hex, smartcom_password, DerivedPassword, VendorProfile};
pub use error::AuditError;
pub use network::{parse_nmcli_terse, NmcliScanner, SavedScan, WifiNetwork, WifiScanner};
