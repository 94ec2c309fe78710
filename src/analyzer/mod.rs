//! Analyzer module for experiment transcripts.
//!
//! Provides functionality for:
//! - Reading a transcript file line by line
//! - Classifying `[E]` experiment lines into bandwidth, success and failure records

pub mod log_loader;
pub mod log_parser;
pub mod transcript;
pub mod types;

pub use transcript::read_transcript;
pub use types::{AnalyzerError, BandwidthRecord, Transcript};
