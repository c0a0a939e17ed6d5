/*!
 * Nearby network enumeration
 *
 * Wraps NetworkManager's `nmcli` and turns its terse output into
 * [`WifiNetwork`] records. The derivation core only ever sees those records,
 * so any other source (a saved scan, a test fixture) plugs in the same way.
 */

use std::io::Read;
use std::path::Path;
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One access point as reported by the scanning tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiNetwork {
    /// Hardware address, in whatever format the tool printed it
    pub bssid: String,

    /// Network name
    pub ssid: String,

    /// Signal indicator, kept verbatim (bars, percent, dBm...)
    pub signal: String,
}

impl WifiNetwork {
    pub fn new(
        bssid: impl Into<String>,
        ssid: impl Into<String>,
        signal: impl Into<String>,
    ) -> Self {
        Self {
            bssid: bssid.into(),
            ssid: ssid.into(),
            signal: signal.into(),
        }
    }
}

/// Source of nearby network records
pub trait WifiScanner {
    fn scan(&self) -> Result<Vec<WifiNetwork>>;
}

/// Scanner backed by `nmcli device wifi list`
#[derive(Debug, Clone)]
pub struct NmcliScanner {
    program: String,
    rescan: bool,
}

impl Default for NmcliScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl NmcliScanner {
    pub fn new() -> Self {
        Self {
            program: "nmcli".to_string(),
            rescan: false,
        }
    }

    /// Ask NetworkManager for a fresh scan instead of its cached list
    pub fn with_rescan(mut self, rescan: bool) -> Self {
        self.rescan = rescan;
        self
    }

    /// Use another `nmcli` binary (e.g. an absolute path)
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn args(&self) -> Vec<&'static str> {
        vec![
            "--terse",
            "--fields",
            "BSSID,SSID,BARS",
            "device",
            "wifi",
            "list",
            "--rescan",
            if self.rescan { "yes" } else { "no" },
        ]
    }
}

impl WifiScanner for NmcliScanner {
    fn scan(&self) -> Result<Vec<WifiNetwork>> {
        debug!(program = %self.program, rescan = self.rescan, "running network scan");

        let output = Command::new(&self.program)
            .args(self.args())
            .output()
            .with_context(|| format!("Failed to execute {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(anyhow!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(parse_nmcli_terse(&stdout))
    }
}

/// Scanner replaying a saved `nmcli --terse` listing
#[derive(Debug, Clone)]
pub struct SavedScan {
    contents: String,
}

impl SavedScan {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
        }
    }

    /// Read a listing from a file, or from stdin when `path` is `-`
    pub fn load(path: &Path) -> Result<Self> {
        let contents = if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read scan from stdin")?;
            buf
        } else {
            std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read scan file {}", path.display()))?
        };
        Ok(Self { contents })
    }
}

impl WifiScanner for SavedScan {
    fn scan(&self) -> Result<Vec<WifiNetwork>> {
        Ok(parse_nmcli_terse(&self.contents))
    }
}

/// Split one terse line on unescaped `:`, undoing `\:` and `\\`
fn split_terse_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            ':' => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Parse `nmcli --terse --fields BSSID,SSID,BARS device wifi list` output
///
/// Lines with fewer than three fields are skipped.
pub fn parse_nmcli_terse(output: &str) -> Vec<WifiNetwork> {
    let mut networks = Vec::new();

    for (lineno, line) in output.lines().enumerate() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }

        let mut fields = split_terse_fields(line).into_iter();
        match (fields.next(), fields.next(), fields.next()) {
            (Some(bssid), Some(ssid), Some(signal)) => {
                networks.push(WifiNetwork::new(bssid, ssid, signal.trim()));
            }
            _ => {
                warn!(line = lineno + 1, "skipping malformed scan line");
            }
        }
    }

    debug!(count = networks.len(), "parsed scan output");
    networks
}
