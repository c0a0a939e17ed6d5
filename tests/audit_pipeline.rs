use std::io::Write;

use smartcom_wifi::{
    audit, normalize, parse_nmcli_terse, smartcom_password, AuditStatus, SavedScan,
    VendorProfile, WifiScanner,
};

const SCAN: &str = "\
50\\:A9\\:DE\\:12\\:34\\:56:Smartcom-1234:▂▄▆_
50\\:A9\\:DE\\:DE\\:AD\\:BE\\:EF:TooLong:▂▄__
AA\\:BB\\:CC\\:DD\\:EE\\:FF:Neighbour:▂▄▆█
50\\:A9\\:DE\\:00\\:00\\:01:Smartcom-0001:▂___
";

#[test]
fn test_saved_scan_end_to_end() {
    let networks = SavedScan::new(SCAN).scan().unwrap();
    assert_eq!(networks.len(), 4);

    let report = audit(&networks, &VendorProfile::smartcom());
    assert_eq!(report.status(), AuditStatus::Found(2));
    assert_eq!(report.invalid_count(), 1);
    assert_eq!(report.unsupported_count(), 1);

    let passwords: Vec<(&str, &str)> = report
        .derived()
        .map(|o| (o.network().ssid.as_str(), o.password().unwrap().as_str()))
        .collect();
    assert_eq!(
        passwords,
        vec![("Smartcom-1234", "b77936cc"), ("Smartcom-0001", "f921aa36")]
    );
}

#[test]
fn test_password_invariants() {
    for raw in ["50:a9:de:00:00:00", "50A9DEFFFFFF", "50:a9:de:ab:cd:ef"] {
        let bssid = normalize(raw).unwrap();
        assert_eq!(bssid.as_str().len(), 12);

        let password = smartcom_password(raw).unwrap();
        assert_eq!(password.as_str().len(), 8);
        assert_eq!(password, smartcom_password(raw).unwrap());
    }
}

#[test]
fn test_profile_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let lab = serde_json::json!({
        "name": "Lab",
        "prefix": "aabbcc",
        "serial_offset": 4,
        "suffix": "SmartcomWifi",
        "password_len": 8,
    });
    write!(file, "{}", lab).unwrap();

    let profile = VendorProfile::load_from_file(file.path()).unwrap();
    assert_eq!(profile.name, "Lab");

    let networks = parse_nmcli_terse("AA\\:BB\\:CC\\:12\\:34\\:56:lab:▂▄▆_");
    let report = audit(&networks, &profile);
    assert_eq!(report.status(), AuditStatus::Found(1));
    // md5("cc123456SmartcomWifi")
    assert_eq!(report.outcomes[0].password().unwrap().as_str(), "937fec74");
}

#[test]
fn test_invalid_profile_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"name":"Bad","prefix":"XYZ","serial_offset":4,"suffix":"","password_len":8}}"#
    )
    .unwrap();
    assert!(VendorProfile::load_from_file(file.path()).is_err());

    let mut garbage = tempfile::NamedTempFile::new().unwrap();
    write!(garbage, "not json").unwrap();
    assert!(VendorProfile::load_from_file(garbage.path()).is_err());
}

#[test]
fn test_empty_scan_is_distinct_from_no_eligible() {
    let empty = audit(&parse_nmcli_terse(""), &VendorProfile::smartcom());
    assert_eq!(empty.status(), AuditStatus::NoNetworks);

    let foreign = audit(
        &parse_nmcli_terse("AA\\:BB\\:CC\\:DD\\:EE\\:FF:x:▂___"),
        &VendorProfile::smartcom(),
    );
    assert_eq!(foreign.status(), AuditStatus::NoEligible);
}
