use anyhow::{anyhow, Context, Result};
use monedid_core::model::DisplayRecord;
use regex::Regex;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, warn};

/// Hex characters needed before an accumulated dump is handed to the decoder
/// (256 hex chars = one 128-byte EDID base block).
const EDID_HEX_MIN: usize = 256;
/// Minimum decoded size of a plausible EDID block.
const EDID_BYTES_MIN: usize = 128;

/// Scanner state: outside any EDID section, or collecting hex lines for one.
enum ScanState {
    Idle,
    Accumulating(String),
}

/// Runs `xrandr --verbose` and extracts one record per EDID dump found in its
/// output. A failed or missing xrandr is reported as zero displays, same as a
/// machine with no monitors attached.
pub async fn detect_displays() -> Result<Vec<DisplayRecord>> {
    match run_xrandr().await {
        Ok(lines) => Ok(scan_lines(lines)),
        Err(e) => {
            warn!("xrandr unavailable, reporting no displays: {e:#}");
            Ok(Vec::new())
        }
    }
}

/// Invokes `xrandr --verbose` and splits its stdout into lines.
pub async fn run_xrandr() -> Result<Vec<String>> {
    let path = which::which("xrandr").context("xrandr not found in PATH")?;
    let mut cmd = Command::new(path);
    cmd.arg("--verbose");
    cmd.stdout(Stdio::piped());
    let out = cmd.output().await.context("failed to run xrandr --verbose")?;
    if !out.status.success() {
        return Err(anyhow!("xrandr --verbose failed: status {:?}", out.status));
    }
    let s = String::from_utf8_lossy(&out.stdout);
    Ok(s.lines().map(|l| l.to_string()).collect())
}

/// Scans tool output for EDID hex dumps.
///
/// xrandr reports each EDID over multiple lines: after a line containing
/// "EDID", subsequent lines of hex are concatenated until 256 characters are
/// reached, then decoded. A new "EDID" line always starts a fresh section; an
/// unterminated previous section never reached the threshold and is dropped.
/// Records come out in the order their sections appeared.
pub fn scan_lines<I, S>(lines: I) -> Vec<DisplayRecord>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    // Connector lines like "HDMI-1 connected primary 1920x1080+0+0 ..."
    // precede each output's property dump; the dump itself carries no name.
    let re_output = Regex::new(r"^(\S+) (connected|disconnected)\b").unwrap();
    let mut displays = Vec::new();
    let mut pending_output: Option<String> = None;
    let mut state = ScanState::Idle;
    for line in lines {
        let line = line.as_ref();
        if line.contains("EDID") {
            state = ScanState::Accumulating(String::new());
            continue;
        }
        state = match state {
            ScanState::Accumulating(mut buf) => {
                buf.push_str(line.trim());
                if buf.len() < EDID_HEX_MIN {
                    ScanState::Accumulating(buf)
                } else {
                    debug!("parsed EDID hex: {buf}");
                    match decode_edid(&buf) {
                        Ok(Some(edid)) => displays.push(DisplayRecord {
                            output: pending_output.take(),
                            edid,
                        }),
                        Ok(None) => debug!("EDID block under {EDID_BYTES_MIN} bytes, section dropped"),
                        Err(e) => warn!("bad EDID hex dump, section dropped: {e:#}"),
                    }
                    ScanState::Idle
                }
            }
            ScanState::Idle => {
                if let Some(c) = re_output.captures(line) {
                    pending_output = if &c[2] == "connected" {
                        Some(c[1].to_string())
                    } else {
                        None
                    };
                }
                ScanState::Idle
            }
        };
    }
    displays
}

/// Decodes a hex dump into EDID bytes, first character of each pair as the
/// high nibble. A trailing unpaired character is dropped. Returns `Ok(None)`
/// when the decoded block is under 128 bytes; a non-hex character fails the
/// whole dump.
pub fn decode_edid(hex: &str) -> Result<Option<Vec<u8>>> {
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for pair in hex.as_bytes().chunks_exact(2) {
        let hi = hex_nibble(pair[0])?;
        let lo = hex_nibble(pair[1])?;
        bytes.push((hi << 4) | lo);
    }
    if bytes.len() < EDID_BYTES_MIN {
        return Ok(None);
    }
    Ok(Some(bytes))
}

fn hex_nibble(c: u8) -> Result<u8> {
    (c as char)
        .to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| anyhow!("non-hex character {:?} in EDID dump", c as char))
}
