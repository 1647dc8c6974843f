//! # Commexp Core
//!
//! Result analysis for noisy-channel communication experiments. A message is encoded,
//! corrupted by noise, decoded, and optionally corrected and flagged; this crate compares
//! the resulting streams against the original and scores how much information survived.
//!
//! ## Modules
//!
//! - `constants`: Flag sentinel, resync limits, result row labels
//! - `types`: Run inputs, experiment elements, result rows
//! - `config`: Analysis configuration and policies
//! - `resync`: Cursor realignment after length-changing divergences
//! - `analyzer`: Per-run classification and the run accumulator
//! - `aggregator`: Finalizing accumulated runs into a result table

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod aggregator;
pub mod analyzer;
pub mod config;
pub mod constants;
pub mod error;
pub mod resync;
pub mod types;

// Re-export commonly used types
pub use aggregator::{Experiment, ResultSink, ResultTable};
pub use analyzer::{analyze_run, record_run, RunAccumulator, RunTally};
pub use config::AnalysisConfig;
pub use error::AnalysisError;
pub use types::{ExperimentSetup, ResultRow, RunInput};

/// Result type alias for analysis operations
pub type Result<T> = core::result::Result<T, AnalysisError>;
