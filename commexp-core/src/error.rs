//! Error types for experiment result analysis

use crate::types::StreamKind;
use alloc::string::String;

/// Errors that can occur while recording or finalizing experiment runs
#[cfg_attr(feature = "std", derive(thiserror::Error))]
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// A message variant of a run was empty
    #[cfg_attr(feature = "std", error("Run contains an empty {0} stream"))]
    EmptyMessage(StreamKind),

    /// Encoded streams differ in length and the policy refuses to compare them
    #[cfg_attr(
        feature = "std",
        error("Code length mismatch: original code has {original} units, changed code has {changed}")
    )]
    CodeLengthMismatch {
        /// Length of the original encoded stream
        original: usize,
        /// Length of the changed encoded stream
        changed: usize,
    },

    /// Repeat count must be at least one
    #[cfg_attr(feature = "std", error("Invalid repeat count: {0}"))]
    InvalidRepeatCount(u32),

    /// Configuration value out of range
    #[cfg_attr(feature = "std", error("Invalid configuration: {0}"))]
    InvalidConfig(String),

    /// Serialization error
    #[cfg_attr(feature = "std", error("Serialization error: {0}"))]
    Serialization(String),
}
