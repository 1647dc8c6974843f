//! Analysis configuration

use crate::constants::{FLAG_SENTINEL, MAX_RESYNC_OFFSET};
use crate::error::AnalysisError;
use alloc::format;
use serde::{Deserialize, Serialize};

/// What to do when the encoded streams of a run differ in length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodeLengthPolicy {
    /// Compare the common prefix and log a warning
    #[default]
    Truncate,
    /// Refuse the run; the accumulator is left untouched
    Reject,
}

/// How repeated runs are combined into the finalized numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepeatPolicy {
    /// Every numeric row is the sum over all repeats
    #[default]
    Total,
    /// Every numeric row is divided by the repeat count
    Average,
}

/// Tunables for the analysis engine and the aggregator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Character marking a flagged position
    pub flag_sentinel: char,

    /// Largest offset tried when realigning a stream cursor
    pub max_resync_offset: usize,

    /// Handling of encoded streams with differing lengths
    pub code_length_policy: CodeLengthPolicy,

    /// Combination of repeated runs at finalize time
    pub repeat_policy: RepeatPolicy,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            flag_sentinel: FLAG_SENTINEL,
            max_resync_offset: MAX_RESYNC_OFFSET,
            code_length_policy: CodeLengthPolicy::default(),
            repeat_policy: RepeatPolicy::default(),
        }
    }
}

impl AnalysisConfig {
    /// Set the flag sentinel
    pub fn flag_sentinel(mut self, sentinel: char) -> Self {
        self.flag_sentinel = sentinel;
        self
    }

    /// Set the resync lookahead window
    pub fn max_resync_offset(mut self, offset: usize) -> Self {
        self.max_resync_offset = offset;
        self
    }

    /// Set the code length policy
    pub fn code_length_policy(mut self, policy: CodeLengthPolicy) -> Self {
        self.code_length_policy = policy;
        self
    }

    /// Set the repeat policy
    pub fn repeat_policy(mut self, policy: RepeatPolicy) -> Self {
        self.repeat_policy = policy;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.max_resync_offset == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "max_resync_offset must be at least 1, got {}",
                self.max_resync_offset
            )));
        }

        Ok(())
    }
}
