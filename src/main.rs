use anyhow::Context;
use clap::Parser;
use env_logger::Builder;
use log::{LevelFilter, debug, info};
use std::path::PathBuf;

use crate::analyzer::read_transcript;
use crate::config::{AnalyzerConfig, ResolvedSettings};
use crate::report::OutputFormat;
use crate::summary::Summary;

mod analyzer;
mod config;
mod report;
mod summary;

/// Summarise a DHT simulator transcript: average lookup latency, average
/// bandwidth and lookup failure rate.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Run identifier, substituted for `{k}` in the transcript template.
    k: String,

    /// Transcript path template, e.g. `/tmp/log_k{k}.txt`.
    #[arg(short, long)]
    template: Option<String>,

    /// TOML config file providing `transcript-template` and `format`.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write the bandwidth samples to this file as JSON.
    #[arg(long)]
    series: Option<PathBuf>,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::load(path)?,
        None => AnalyzerConfig::default(),
    };
    let settings = ResolvedSettings::resolve(cli.template.as_deref(), cli.format, &config)?;
    debug!("Resolved settings: {:?}", settings);

    let transcript_path = settings.transcript_path(&cli.k);
    let transcript = read_transcript(&transcript_path)?;

    let summary = Summary::from_transcript(&transcript).with_context(|| format!("Cannot summarise {}", transcript_path.display()))?;

    if let Some(series_path) = &cli.series {
        report::write_bandwidth_series(series_path, &transcript.bandwidth)?;
    }

    print!("{}", report::render(settings.format, &cli.k, &summary)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Logging setup
    Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter(Some("dhtsim_log_analyzer"), LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    info!("Analyzing run k={}", cli.k);

    run(cli)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_options() {
        let cli = Cli::try_parse_from(["dhtsim-log-analyzer", "8", "-t", "/tmp/log_k{k}.txt", "--format", "json", "--series", "bw.json"]).unwrap();
        assert_eq!(cli.k, "8");
        assert_eq!(cli.template.as_deref(), Some("/tmp/log_k{k}.txt"));
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.series, Some(PathBuf::from("bw.json")));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_requires_k() {
        assert!(Cli::try_parse_from(["dhtsim-log-analyzer"]).is_err());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("log_k8.txt"), "[E] T 1 100\n[E] T 2 200\n[E] S 1 2 50\n[E] F 3 4 99\n").unwrap();
        let template = dir.path().join("log_k{k}.txt");
        let series = dir.path().join("series.json");

        let cli = Cli {
            k: "8".to_string(),
            template: Some(template.to_string_lossy().into_owned()),
            config: None,
            format: Some(OutputFormat::Json),
            series: Some(series.clone()),
        };
        run(cli).unwrap();
        assert!(series.exists());
    }

    #[test]
    fn test_run_fails_without_records() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("log_k1.txt"), "nothing to see\n").unwrap();

        let cli = Cli {
            k: "1".to_string(),
            template: Some(dir.path().join("log_k{k}.txt").to_string_lossy().into_owned()),
            config: None,
            format: None,
            series: None,
        };
        let err = run(cli).unwrap_err();
        assert!(err.downcast_ref::<summary::SummaryError>().is_some());
    }

    #[test]
    fn test_run_fails_on_missing_transcript() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            k: "2".to_string(),
            template: Some(dir.path().join("log_k{k}.txt").to_string_lossy().into_owned()),
            config: None,
            format: None,
            series: None,
        };
        let err = run(cli).unwrap_err();
        assert!(matches!(err.downcast_ref::<analyzer::AnalyzerError>(), Some(analyzer::AnalyzerError::Open { .. })));
    }
}
