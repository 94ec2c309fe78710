//! Type definitions specific to the analyzer module.

use std::num::ParseIntError;
use std::path::PathBuf;

/// `[E] T` line: (timestamp, bytes transferred in the interval).
pub type BandwidthRecord = (u64, u64);

/// `[E] S` line: lookup latency in epochs.
pub type SuccessRecord = u64;

/// `[E] F` line: epochs spent before the lookup gave up.
pub type FailureRecord = u64;

/// Everything a single line matched.
///
/// The three patterns are tested independently, so in principle more than
/// one field can be set for the same line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineMatches {
    pub bandwidth: Option<BandwidthRecord>,
    pub success: Option<SuccessRecord>,
    pub failure: Option<FailureRecord>,
}

impl LineMatches {
    /// Number of patterns that matched this line.
    pub fn count(&self) -> usize {
        usize::from(self.bandwidth.is_some()) + usize::from(self.success.is_some()) + usize::from(self.failure.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Records extracted from one transcript, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub bandwidth: Vec<BandwidthRecord>,
    pub successes: Vec<SuccessRecord>,
    pub failures: Vec<FailureRecord>,
    /// Lines scanned, matched or not.
    pub lines_read: usize,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the records matched on one line.
    pub fn ingest(&mut self, matches: LineMatches) {
        if let Some(record) = matches.bandwidth {
            self.bandwidth.push(record);
        }
        if let Some(latency) = matches.success {
            self.successes.push(latency);
        }
        if let Some(latency) = matches.failure {
            self.failures.push(latency);
        }
    }

    /// Second element of every bandwidth pair.
    pub fn bandwidth_values(&self) -> Vec<u64> {
        self.bandwidth.iter().map(|&(_, value)| value).collect()
    }

    /// Successes plus failures.
    pub fn outcome_count(&self) -> usize {
        self.successes.len() + self.failures.len()
    }
}

/// Error type for transcript reading failures.
#[derive(Debug)]
pub enum AnalyzerError {
    Open { path: PathBuf, source: std::io::Error },
    Read { path: PathBuf, line: usize, source: std::io::Error },
    InvalidNumber { line: usize, text: String, source: ParseIntError },
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::Open { path, .. } => write!(f, "Failed to open transcript {}", path.display()),
            AnalyzerError::Read { path, line, .. } => write!(f, "Failed to read transcript {} at line {}", path.display(), line),
            AnalyzerError::InvalidNumber { line, text, .. } => write!(f, "Invalid integer `{}` on line {}", text, line),
        }
    }
}

impl std::error::Error for AnalyzerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzerError::Open { source, .. } | AnalyzerError::Read { source, .. } => Some(source),
            AnalyzerError::InvalidNumber { source, .. } => Some(source),
        }
    }
}
