use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "smartcom-wifi")]
#[command(author = "maxgfr")]
#[command(version)]
#[command(
    about = "Smartcom default WPA password auditor - Educational use only",
    long_about = None
)]
pub struct Args {
    /// Print the report as JSON instead of colored text
    #[arg(long, global = true)]
    pub json: bool,

    /// Vendor profile (JSON) to use instead of the built-in Smartcom one
    #[arg(long, global = true, value_name = "FILE")]
    pub profile: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub mode: Mode,
}

#[derive(Subcommand)]
pub enum Mode {
    /// Scan nearby networks and derive passwords for vendor access points
    ///
    /// Runs `nmcli device wifi list` unless a saved listing is given.
    ///
    /// Example: smartcom-wifi scan
    Scan {
        /// Saved `nmcli --terse --fields BSSID,SSID,BARS device wifi list` output ("-" for stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,

        /// Ask NetworkManager for a fresh scan
        #[arg(short, long)]
        rescan: bool,

        /// Also list networks that are not from the vendor
        #[arg(short = 'a', long)]
        show_all: bool,
    },

    /// Derive passwords for the given BSSIDs
    ///
    /// Each address is handled independently; failures are reported and the
    /// rest still processed.
    ///
    /// Example: smartcom-wifi derive 50:A9:DE:12:34:56
    Derive {
        /// BSSIDs in colon-delimited or bare hex form
        #[arg(value_name = "BSSID", required = true)]
        bssids: Vec<String>,
    },
}
