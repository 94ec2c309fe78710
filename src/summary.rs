//! Summary statistics over a parsed transcript.

use serde::Serialize;

use crate::analyzer::Transcript;

/// Error type for summary computation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryError {
    /// Mean requested over a sequence with no records; names the sequence.
    EmptySequence(&'static str),
    /// Neither successes nor failures were recorded.
    NoOutcomes,
}

impl std::fmt::Display for SummaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryError::EmptySequence(name) => write!(f, "Cannot average: transcript has no {} records", name),
            SummaryError::NoOutcomes => write!(f, "Cannot compute failure rate: transcript has no success or failure records"),
        }
    }
}

impl std::error::Error for SummaryError {}

/// Headline numbers for one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub average_latency: f64,
    pub average_bandwidth: f64,
    /// Percentage, 0 to 100.
    pub failure_rate: f64,
    pub successes: usize,
    pub failures: usize,
    pub bandwidth_samples: usize,
}

impl Summary {
    /// Compute latency, bandwidth and failure rate, in that order.
    pub fn from_transcript(transcript: &Transcript) -> Result<Self, SummaryError> {
        let average_latency = mean(&transcript.successes, "success latency")?;
        let average_bandwidth = mean(&transcript.bandwidth_values(), "bandwidth")?;
        let failure_rate = failure_rate(transcript.successes.len(), transcript.failures.len())?;

        Ok(Self {
            average_latency,
            average_bandwidth,
            failure_rate,
            successes: transcript.successes.len(),
            failures: transcript.failures.len(),
            bandwidth_samples: transcript.bandwidth.len(),
        })
    }
}

/// Arithmetic mean of `values`.
///
/// `name` identifies the sequence in the error returned when it is empty.
pub fn mean(values: &[u64], name: &'static str) -> Result<f64, SummaryError> {
    if values.is_empty() {
        return Err(SummaryError::EmptySequence(name));
    }
    let sum: u128 = values.iter().map(|&v| u128::from(v)).sum();
    let count = values.len() as u128;
    // Integer quotient first, so only the fractional remainder is rounded in `f64`.
    Ok((sum / count) as f64 + (sum % count) as f64 / count as f64)
}

/// Percentage of failures among all lookups.
pub fn failure_rate(successes: usize, failures: usize) -> Result<f64, SummaryError> {
    let total = successes + failures;
    if total == 0 {
        return Err(SummaryError::NoOutcomes);
    }
    // Divide before scaling: 1/3*100 and 100*1/3 differ in the last bit.
    Ok(failures as f64 / total as f64 * 100.0)
}
