/*!
 * Batch audit of scanned networks
 *
 * Every record is evaluated on its own: a malformed or foreign address is
 * classified and the batch moves on.
 */

use serde::Serialize;
use tracing::debug;

use crate::bssid::{normalize, NormalizedBssid};
use crate::crypto::{DerivedPassword, VendorProfile};
use crate::error::AuditError;
use crate::network::WifiNetwork;

/// Result of evaluating one scanned network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Vendor address, password derived
    Derived {
        network: WifiNetwork,
        bssid: NormalizedBssid,
        password: DerivedPassword,
    },

    /// Well-formed address outside the vendor block
    Unsupported {
        network: WifiNetwork,
        bssid: NormalizedBssid,
    },

    /// Malformed address (wrong length or not ASCII)
    Invalid {
        network: WifiNetwork,
        error: AuditError,
    },
}

impl Outcome {
    pub fn network(&self) -> &WifiNetwork {
        match self {
            Outcome::Derived { network, .. }
            | Outcome::Unsupported { network, .. }
            | Outcome::Invalid { network, .. } => network,
        }
    }

    pub fn password(&self) -> Option<&DerivedPassword> {
        match self {
            Outcome::Derived { password, .. } => Some(password),
            _ => None,
        }
    }
}

/// Overall verdict of an audit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "count", rename_all = "snake_case")]
pub enum AuditStatus {
    /// The scan returned nothing at all
    NoNetworks,
    /// Networks were seen but none belongs to the vendor
    NoEligible,
    /// This many passwords were derived
    Found(usize),
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub vendor: String,
    pub total: usize,
    pub outcomes: Vec<Outcome>,
}

impl AuditReport {
    /// Outcomes that produced a password, in scan order
    pub fn derived(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| o.password().is_some())
    }

    pub fn eligible_count(&self) -> usize {
        self.derived().count()
    }

    pub fn unsupported_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Unsupported { .. }))
            .count()
    }

    pub fn invalid_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Invalid { .. }))
            .count()
    }

    pub fn status(&self) -> AuditStatus {
        match (self.total, self.eligible_count()) {
            (0, _) => AuditStatus::NoNetworks,
            (_, 0) => AuditStatus::NoEligible,
            (_, n) => AuditStatus::Found(n),
        }
    }
}

/// Evaluate a single record against a vendor profile
pub fn evaluate(network: &WifiNetwork, profile: &VendorProfile) -> Outcome {
    let bssid = match normalize(&network.bssid) {
        Ok(bssid) => bssid,
        Err(error) => {
            debug!(bssid = %network.bssid, %error, "rejecting record");
            return Outcome::Invalid {
                network: network.clone(),
                error,
            };
        }
    };

    match profile.derive(&bssid) {
        Ok(password) => {
            debug!(%bssid, ssid = %network.ssid, "derived password");
            Outcome::Derived {
                network: network.clone(),
                bssid,
                password,
            }
        }
        Err(AuditError::UnsupportedVendor { .. }) => {
            debug!(%bssid, "not a {} address", profile.name);
            Outcome::Unsupported {
                network: network.clone(),
                bssid,
            }
        }
        Err(error @ (AuditError::InvalidFormat { .. } | AuditError::NonAscii { .. })) => {
            debug!(%bssid, %error, "rejecting record");
            Outcome::Invalid {
                network: network.clone(),
                error,
            }
        }
        // Profiles are validated on load; a bad one still only marks the record
        Err(error @ AuditError::InvalidProfile(_)) => Outcome::Invalid {
            network: network.clone(),
            error,
        },
    }
}

/// Evaluate every record, never stopping on a failing one
pub fn audit(networks: &[WifiNetwork], profile: &VendorProfile) -> AuditReport {
    let outcomes = networks
        .iter()
        .map(|network| evaluate(network, profile))
        .collect();

    AuditReport {
        vendor: profile.name.clone(),
        total: networks.len(),
        outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mixed_batch() -> Vec<WifiNetwork> {
        vec![
            WifiNetwork::new("AA:BB:CC:DD:EE:FF", "Neighbour", "▂▄__"),
            WifiNetwork::new("50:A9:DE:12:34:56", "Smartcom-1234", "▂▄▆_"),
            WifiNetwork::new("50:A9:DE:12:34", "Broken", "▂___"),
        ]
    }

    #[test]
    fn test_mixed_batch_does_not_abort() {
        let report = audit(&mixed_batch(), &VendorProfile::smartcom());

        assert_eq!(report.total, 3);
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.eligible_count(), 1);
        assert_eq!(report.unsupported_count(), 1);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.status(), AuditStatus::Found(1));

        let derived: Vec<_> = report.derived().collect();
        assert_eq!(derived[0].network().ssid, "Smartcom-1234");
        assert_eq!(derived[0].password().unwrap().as_str(), "b77936cc");

        match &report.outcomes[2] {
            Outcome::Invalid { network, error } => {
                assert_eq!(network.ssid, "Broken");
                assert!(error.is_invalid_format());
                assert_eq!(
                    *error,
                    AuditError::InvalidFormat {
                        input: "50:A9:DE:12:34".to_string(),
                        length: 10,
                    }
                );
            }
            other => panic!("expected invalid outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_non_ascii_record_is_invalid() {
        let networks = vec![
            WifiNetwork::new("50:A9:DE:€€:€€:€€", "Odd", "▂___"),
            WifiNetwork::new("50:A9:DE:12:34:56", "Smartcom-1234", "▂▄▆_"),
        ];
        let report = audit(&networks, &VendorProfile::smartcom());

        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.status(), AuditStatus::Found(1));
        match &report.outcomes[0] {
            Outcome::Invalid { error, .. } => {
                assert!(matches!(error, AuditError::NonAscii { .. }));
            }
            other => panic!("expected invalid outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_outcomes_keep_scan_order() {
        let report = audit(&mixed_batch(), &VendorProfile::smartcom());
        assert!(matches!(report.outcomes[0], Outcome::Unsupported { .. }));
        assert!(matches!(report.outcomes[1], Outcome::Derived { .. }));
        assert!(matches!(report.outcomes[2], Outcome::Invalid { .. }));
    }

    #[test]
    fn test_empty_scan() {
        let report = audit(&[], &VendorProfile::smartcom());
        assert_eq!(report.status(), AuditStatus::NoNetworks);
    }

    #[test]
    fn test_no_eligible() {
        let networks = vec![WifiNetwork::new("AA:BB:CC:DD:EE:FF", "Neighbour", "▂▄__")];
        let report = audit(&networks, &VendorProfile::smartcom());
        assert_eq!(report.status(), AuditStatus::NoEligible);
        assert_ne!(report.status(), AuditStatus::NoNetworks);
    }

    #[test]
    fn test_report_json() {
        let report = audit(&mixed_batch(), &VendorProfile::smartcom());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["vendor"], "Smartcom");
        assert_eq!(json["outcomes"][1]["status"], "derived");
        assert_eq!(json["outcomes"][1]["password"], "b77936cc");
        assert_eq!(json["outcomes"][1]["bssid"], "50a9de123456");
        assert_eq!(json["outcomes"][2]["status"], "invalid");
        assert!(json["outcomes"][2]["error"]
            .as_str()
            .unwrap()
            .contains("got 10"));

        let status = serde_json::to_value(report.status()).unwrap();
        assert_eq!(status["kind"], "found");
        assert_eq!(status["count"], 1);
    }
}
