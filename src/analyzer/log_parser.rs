//! Parse individual transcript lines and extract experiment records.
//!
//! Supports the following experiment line formats:
//! - `[E] T`: Bandwidth sample
//! - `[E] S`: Successful lookup
//! - `[E] F`: Failed lookup

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::types::{AnalyzerError, LineMatches};

// ASCII digits only: the `regex` crate's `\d` also accepts other Unicode digits,
// which `str::parse` rejects.
static BANDWIDTH_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[E\] T ([0-9]+) ([0-9]+)").expect("bandwidth pattern is valid"));
static SUCCESS_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[E\] S [0-9]+ [0-9]+ ([0-9]+)").expect("success pattern is valid"));
static FAILURE_LINE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\[E\] F [0-9]+ [0-9]+ ([0-9]+)").expect("failure pattern is valid"));

/// Parse a transcript line against all three record patterns.
///
/// # Parameters
///
/// * `line` - A single transcript line, without its terminator
/// * `line_number` - 1-based position of the line, used in errors
///
/// # Returns
///
/// The records this line matched (possibly none). Patterns only need to
/// match a prefix of the line, and every pattern is tried even when an
/// earlier one matched.
///
/// # Line Formats
///
/// ```text
/// [E] T <timestamp> <value>
/// [E] S <node index> <target data index> <latency>
/// [E] F <node index> <target data index> <latency>
/// ```
pub fn parse_log_line(line: &str, line_number: usize) -> Result<LineMatches, AnalyzerError> {
    let mut matches = LineMatches::default();

    if let Some(caps) = BANDWIDTH_LINE.captures(line) {
        let timestamp = capture_u64(&caps, 1, line_number)?;
        let value = capture_u64(&caps, 2, line_number)?;
        matches.bandwidth = Some((timestamp, value));
    }
    if let Some(caps) = SUCCESS_LINE.captures(line) {
        matches.success = Some(capture_u64(&caps, 1, line_number)?);
    }
    if let Some(caps) = FAILURE_LINE.captures(line) {
        matches.failure = Some(capture_u64(&caps, 1, line_number)?);
    }

    Ok(matches)
}

/// Parse a captured run of ASCII digits. Fails only when the value overflows `u64`.
fn capture_u64(caps: &Captures<'_>, group: usize, line_number: usize) -> Result<u64, AnalyzerError> {
    let text = &caps[group];
    text.parse().map_err(|source| AnalyzerError::InvalidNumber {
        line: line_number,
        text: text.to_string(),
        source,
    })
}
