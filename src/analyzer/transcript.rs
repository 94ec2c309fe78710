//! Single pass over a transcript file.

use std::path::Path;

use super::log_loader::LogLoader;
use super::log_parser::parse_log_line;
use super::types::{AnalyzerError, Transcript};

/// Read a transcript and bucket every experiment record it contains.
///
/// The first open, read or number error aborts the pass; no partial
/// transcript is returned.
pub fn read_transcript(path: &Path) -> Result<Transcript, AnalyzerError> {
    log::info!("Reading transcript {}", path.display());

    let mut loader = LogLoader::new(path)?;
    let mut transcript = Transcript::new();

    while let Some((line_number, line)) = loader.next_line()? {
        let matches = parse_log_line(line, line_number)?;

        if matches.is_empty() {
            log::trace!("Skipping line {}: {}", line_number, line);
        } else if matches.count() > 1 {
            log::debug!("Line {} matched {} patterns: {}", line_number, matches.count(), line);
        }

        transcript.ingest(matches);
    }
    transcript.lines_read = loader.line_number();

    log::info!(
        "Parsed {} lines: {} bandwidth samples, {} successes, {} failures",
        transcript.lines_read,
        transcript.bandwidth.len(),
        transcript.successes.len(),
        transcript.failures.len()
    );
    if transcript.outcome_count() == 0 {
        log::warn!("No lookup outcomes found in {}", path.display());
    }

    Ok(transcript)
}
