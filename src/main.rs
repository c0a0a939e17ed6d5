mod cli;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Args, Mode};
use smartcom_wifi::{
    audit, normalize, AuditReport, AuditStatus, NmcliScanner, Outcome, SavedScan, VendorProfile,
    WifiScanner,
};

// 1 is left to errors returned from `main` (failed scan, bad profile)

/// Networks found, none from the vendor
const EXIT_NO_ELIGIBLE: u8 = 2;
/// At least one BSSID passed to `derive` failed
const EXIT_DERIVE_FAILED: u8 = 3;
/// Scan returned no networks at all
const EXIT_NO_NETWORKS: u8 = 4;

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let profile = match &args.profile {
        Some(path) => VendorProfile::load_from_file(path)?,
        None => VendorProfile::smartcom(),
    };

    if !args.json {
        let banner = format!("📡 {} default WPA password auditor", profile.name);
        println!("\n{}", banner.bold().cyan());
        println!("{}\n", "Educational use only".dimmed());
    }

    match args.mode {
        Mode::Scan { input, rescan, show_all } => {
            handle_scan_mode(&profile, input.as_deref(), rescan, show_all, args.json)
        }
        Mode::Derive { bssids } => handle_derive_mode(&profile, &bssids, args.json),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Handle scan mode - enumerate networks and audit them
fn handle_scan_mode(
    profile: &VendorProfile,
    input: Option<&Path>,
    rescan: bool,
    show_all: bool,
    json: bool,
) -> Result<ExitCode> {
    let networks = match input {
        Some(path) => SavedScan::load(path)?.scan()?,
        None => {
            if !json {
                println!("{}", "Scanning for WiFi networks...".yellow());
            }
            NmcliScanner::new().with_rescan(rescan).scan()?
        }
    };

    let report = audit(&networks, profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&report, show_all);
    }

    Ok(ExitCode::from(scan_exit_code(report.status())))
}

fn scan_exit_code(status: AuditStatus) -> u8 {
    match status {
        AuditStatus::NoNetworks => EXIT_NO_NETWORKS,
        AuditStatus::NoEligible => EXIT_NO_ELIGIBLE,
        AuditStatus::Found(_) => 0,
    }
}

fn derive_exit_code(failures: usize) -> u8 {
    if failures > 0 {
        EXIT_DERIVE_FAILED
    } else {
        0
    }
}

fn display_report(report: &AuditReport, show_all: bool) {
    match report.status() {
        AuditStatus::NoNetworks => {
            eprintln!("{}", "No WiFi networks found!".red());
            eprintln!("\n{}", "💡 Tip: Make sure WiFi is enabled on your device".yellow());
            return;
        }
        AuditStatus::NoEligible => {
            println!("Found {} potential WiFi network(s).", report.total);
            eprintln!("{}", format!("No {} networks found.", report.vendor).red());
        }
        AuditStatus::Found(targets) => {
            println!(
                "{}\n",
                format!(
                    "✓ {} {} network(s) out of {} WiFi network(s).",
                    targets, report.vendor, report.total
                )
                .green()
            );
            for outcome in report.derived() {
                let network = outcome.network();
                if let Some(password) = outcome.password() {
                    println!(
                        "  {}: {} ({})",
                        network.ssid.bold(),
                        password.as_str().cyan(),
                        network.signal
                    );
                }
            }
        }
    }

    if show_all {
        println!("\n{}", "Other networks:".bold());
        for outcome in &report.outcomes {
            match outcome {
                Outcome::Unsupported { network, bssid } => {
                    println!(
                        "  {} {} {}",
                        network.ssid,
                        bssid.to_colon_form().dimmed(),
                        "(other vendor)".dimmed()
                    );
                }
                Outcome::Invalid { network, error } => {
                    println!("  {} {}", network.ssid, error.to_string().yellow());
                }
                Outcome::Derived { .. } => {}
            }
        }
    }
}

/// Handle derive mode - derive passwords for BSSIDs given on the command line
fn handle_derive_mode(
    profile: &VendorProfile,
    bssids: &[String],
    json: bool,
) -> Result<ExitCode> {
    let mut failures = 0;
    let mut results = Vec::with_capacity(bssids.len());

    for raw in bssids {
        let result = normalize(raw).and_then(|bssid| profile.derive(&bssid));
        match &result {
            Ok(password) => {
                if !json {
                    println!("{} -> {}", raw, password.as_str().bold().green());
                }
                results.push(serde_json::json!({ "bssid": raw, "password": password }));
            }
            Err(e) => {
                failures += 1;
                if !json {
                    println!("{} -> {}", raw, e.to_string().red());
                }
                results.push(serde_json::json!({ "bssid": raw, "error": e }));
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }

    Ok(ExitCode::from(derive_exit_code(failures)))
}
