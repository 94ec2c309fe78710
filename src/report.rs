//! Rendering of run summaries and the bandwidth series.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::analyzer::BandwidthRecord;
use crate::summary::Summary;

/// Report layout on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Four plain lines, one value per line.
    #[default]
    Text,
    /// One pretty-printed JSON object.
    Json,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    k: &'a str,
    #[serde(flatten)]
    summary: &'a Summary,
}

#[derive(Serialize)]
struct BandwidthPoint {
    timestamp: u64,
    value: u64,
}

/// Render `summary` for run `k` in the requested format.
pub fn render(format: OutputFormat, k: &str, summary: &Summary) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(k, summary)),
        OutputFormat::Json => render_json(k, summary),
    }
}

/// The classic four-line report.
pub fn render_text(k: &str, summary: &Summary) -> String {
    format!(
        "k= {}\nAverage latency {}\nAverage bw  {}\nFailure rate {}\n",
        k,
        format_float(summary.average_latency),
        format_float(summary.average_bandwidth),
        format_float(summary.failure_rate)
    )
}

pub fn render_json(k: &str, summary: &Summary) -> anyhow::Result<String> {
    let mut out = serde_json::to_string_pretty(&JsonReport { k, summary }).context("Failed to serialize report")?;
    out.push('\n');
    Ok(out)
}

/// Shortest round-trip form, laid out like the simulator's plotting scripts print floats.
///
/// Whole numbers keep a fractional part (`60.0`). Decimal exponents below -4
/// or from 16 up switch to scientific notation with a signed, two-digit
/// exponent (`9.999999999999999e-06`, `1e+16`).
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    // `{:e}` yields the same shortest digits as `{}`, e.g. "9.999999999999999e-6"
    let scientific = format!("{:e}", value);
    if let Some((mantissa, exponent)) = scientific.split_once('e') {
        if let Ok(exponent) = exponent.parse::<i32>() {
            if value != 0.0 && !(-4..16).contains(&exponent) {
                let sign = if exponent < 0 { '-' } else { '+' };
                return format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs());
            }
        }
    }

    let fixed = format!("{}", value);
    if fixed.contains('.') { fixed } else { format!("{}.0", fixed) }
}

/// Write the bandwidth samples to `path` as a JSON array, in file order.
pub fn write_bandwidth_series(path: &Path, records: &[BandwidthRecord]) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create series file {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    let points: Vec<BandwidthPoint> = records.iter().map(|&(timestamp, value)| BandwidthPoint { timestamp, value }).collect();
    serde_json::to_writer_pretty(&mut writer, &points).context("Failed to serialize bandwidth series")?;
    writer.write_all(b"\n")?;
    writer.flush().with_context(|| format!("Failed to write series file {}", path.display()))?;

    log::info!("Wrote {} bandwidth samples to {}", points.len(), path.display());
    Ok(())
}
