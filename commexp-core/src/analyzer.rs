//! Alignment and classification of one experiment run
//!
//! The original message is walked position by position. The three downstream
//! message variants each keep their own cursor, which may drift away from the
//! original cursor whenever a divergence changes the number of decoded characters.

use crate::config::{AnalysisConfig, CodeLengthPolicy};
use crate::constants::WRONG_CHAR_PENALTY;
use crate::error::AnalysisError;
use crate::resync::{resync_cursor, Resync};
use crate::types::RunInput;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use crate::types::StreamKind;
#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Counters of a single run, or of several runs once absorbed into an accumulator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunTally {
    /// Code units that differ between original and changed code
    pub changes: u64,
    /// Original characters that the changed message got wrong
    pub changed_chars: u64,
    /// Characters the corrected message restored, plus mistaken corrections
    pub corrected_chars: u64,
    /// Corrections applied where nothing was wrong
    pub mistakenly_corrected_chars: u64,
    /// Flagged characters, plus mistaken flags
    pub flagged_chars: u64,
    /// Flags placed where nothing was wrong
    pub mistakenly_flagged_chars: u64,
    /// Information content of the original message (one unit per character)
    pub information: i64,
    /// Information left without any coding
    pub information_without_coding: i64,
    /// Information left after correction
    pub information_with_coding_corrected: i64,
    /// Information left after correction and flagging
    pub information_with_coding_flagged: i64,
    /// Realignment attempts that found no match
    pub resync_failures: u64,
}

impl RunTally {
    /// Fill in the three information scores from the counters
    ///
    /// +1 per correct character, -1 per wrong character, 0 per flagged character.
    pub fn score(&mut self) {
        let changed = self.changed_chars as i64;
        let net_corrected =
            self.corrected_chars as i64 - self.mistakenly_corrected_chars as i64;
        let net_flagged = self.flagged_chars as i64 - self.mistakenly_flagged_chars as i64;
        let mistaken_flags = self.mistakenly_flagged_chars as i64;

        self.information_without_coding = self.information - WRONG_CHAR_PENALTY * changed;
        self.information_with_coding_corrected =
            self.information - WRONG_CHAR_PENALTY * (changed - net_corrected);
        self.information_with_coding_flagged =
            self.information_with_coding_corrected + net_flagged - mistaken_flags;
    }
}

/// How one original position was classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Classification {
    /// The changed message kept this character
    Intact {
        /// The corrected message altered it anyway
        mistakenly_corrected: bool,
        /// The flagged message marked it anyway
        mistakenly_flagged: bool,
    },
    /// The changed message diverged here
    Changed {
        /// The corrected message restored the character
        corrected: bool,
        /// The flagged message marked the position
        flagged: bool,
        /// Realignment of the changed, corrected and flagged cursors
        resync: [Resync; 3],
    },
    /// The changed message ran out before the original did
    Skipped,
}

/// Classification of one original position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRecord {
    /// Position in the original message
    pub position: usize,
    /// Original character at that position
    pub original: char,
    /// Cursors into the changed, corrected and flagged messages when it was compared
    pub cursors: [usize; 3],
    /// Outcome
    pub classification: Classification,
}

/// Full result of analyzing one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Counters of this run alone
    pub tally: RunTally,
    /// Per-position trace
    pub positions: Vec<PositionRecord>,
}

/// Count code units that differ between the two encoded streams
pub fn count_code_changes(
    original_code: &str,
    changed_code: &str,
    policy: CodeLengthPolicy,
) -> Result<u64, AnalysisError> {
    let original_len = original_code.chars().count();
    let changed_len = changed_code.chars().count();

    if original_len != changed_len {
        match policy {
            CodeLengthPolicy::Reject => {
                return Err(AnalysisError::CodeLengthMismatch {
                    original: original_len,
                    changed: changed_len,
                });
            }
            CodeLengthPolicy::Truncate => {
                #[cfg(feature = "logging")]
                warn!(
                    "Code length mismatch ({} vs {}), comparing the first {} units",
                    original_len,
                    changed_len,
                    original_len.min(changed_len)
                );
            }
        }
    }

    let changes = original_code
        .chars()
        .zip(changed_code.chars())
        .filter(|(a, b)| a != b)
        .count();

    Ok(changes as u64)
}

/// Analyze one run without touching any accumulator
///
/// This function:
/// 1. Counts differing units between the encoded streams
/// 2. Walks the original message, classifying each position against the
///    changed, corrected and flagged messages
/// 3. Realigns the downstream cursors after every divergence
/// 4. Scores the information left in each message variant
pub fn analyze_run(input: &RunInput, config: &AnalysisConfig) -> Result<RunReport, AnalysisError> {
    config.validate()?;
    input.validate()?;

    let mut tally = RunTally {
        changes: count_code_changes(
            &input.original_code,
            &input.changed_code,
            config.code_length_policy,
        )?,
        ..Default::default()
    };

    let original: Vec<char> = input.original_message.chars().collect();
    let changed: Vec<char> = input.changed_message.chars().collect();
    let corrected: Vec<char> = input.corrected_message.chars().collect();
    let flagged: Vec<char> = input.corrected_flagged_message.chars().collect();
    let streams = [&changed, &corrected, &flagged];

    #[cfg(feature = "logging")]
    debug!(
        original_message = %input.original_message,
        original_code = %input.original_code,
        changed_code = %input.changed_code,
        changed_message = %input.changed_message,
        corrected_message = %input.corrected_message,
        corrected_flagged_message = %input.corrected_flagged_message,
        "Analyzing run"
    );

    let sentinel = config.flag_sentinel;
    let mut cursors = [0usize; 3];
    let mut positions = Vec::with_capacity(original.len());

    for (position, &expected) in original.iter().enumerate() {
        tally.information += 1;

        let [ch, co, cf] = cursors;
        let corrected_char = corrected.get(co).copied();
        let flagged_char = flagged.get(cf).copied();

        let classification = match changed.get(ch) {
            None => {
                #[cfg(feature = "logging")]
                warn!(
                    "Changed message exhausted at original position {}, skipping",
                    position
                );
                Classification::Skipped
            }
            Some(&found) if found != expected => {
                tally.changed_chars += 1;

                let was_corrected = corrected_char == Some(expected);
                let was_flagged = flagged_char == Some(sentinel);
                if was_corrected {
                    tally.corrected_chars += 1;
                }
                if was_flagged {
                    tally.flagged_chars += 1;
                }

                let mut resync = [Resync::NoMatch; 3];
                for (i, stream) in streams.iter().enumerate() {
                    let outcome = resync_cursor(
                        &original,
                        position,
                        stream,
                        cursors[i],
                        config.max_resync_offset,
                    );

                    if outcome.is_failure() {
                        tally.resync_failures += 1;
                        #[cfg(feature = "logging")]
                        warn!(
                            "Couldn't realign the {} to the original after position {}: {:?}",
                            StreamKind::DOWNSTREAM[i],
                            position,
                            outcome
                        );
                    }

                    cursors[i] += outcome.extra_shift();
                    resync[i] = outcome;
                }

                Classification::Changed {
                    corrected: was_corrected,
                    flagged: was_flagged,
                    resync,
                }
            }
            Some(_) => {
                let mistakenly_flagged = flagged_char == Some(sentinel) && expected != sentinel;
                let mistakenly_corrected = matches!(corrected_char, Some(c) if c != expected);

                if mistakenly_flagged {
                    tally.flagged_chars += 1;
                    tally.mistakenly_flagged_chars += 1;
                }
                if mistakenly_corrected {
                    tally.corrected_chars += 1;
                    tally.mistakenly_corrected_chars += 1;
                }

                Classification::Intact {
                    mistakenly_corrected,
                    mistakenly_flagged,
                }
            }
        };

        positions.push(PositionRecord {
            position,
            original: expected,
            cursors: [ch, co, cf],
            classification,
        });

        for cursor in cursors.iter_mut() {
            *cursor += 1;
        }
    }

    tally.score();

    #[cfg(feature = "logging")]
    debug!(
        "Run analyzed: {} changed, {} corrected, {} flagged, {} resync failures",
        tally.changed_chars, tally.corrected_chars, tally.flagged_chars, tally.resync_failures
    );

    Ok(RunReport { tally, positions })
}

/// Running totals over the repeats of one experiment configuration
///
/// Owned by a single writer; every repeat is merged additively and the totals are
/// reset only by finalizing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunAccumulator {
    /// Summed counters of every absorbed run
    pub totals: RunTally,
    /// Number of absorbed runs
    pub runs: u32,
}

impl RunAccumulator {
    /// Create a zeroed accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the counters of one run
    pub fn absorb(&mut self, tally: &RunTally) {
        let t = &mut self.totals;
        t.changes += tally.changes;
        t.changed_chars += tally.changed_chars;
        t.corrected_chars += tally.corrected_chars;
        t.mistakenly_corrected_chars += tally.mistakenly_corrected_chars;
        t.flagged_chars += tally.flagged_chars;
        t.mistakenly_flagged_chars += tally.mistakenly_flagged_chars;
        t.information += tally.information;
        t.information_without_coding += tally.information_without_coding;
        t.information_with_coding_corrected += tally.information_with_coding_corrected;
        t.information_with_coding_flagged += tally.information_with_coding_flagged;
        t.resync_failures += tally.resync_failures;
        self.runs += 1;
    }

    /// Whether nothing was absorbed since the last reset
    pub fn is_empty(&self) -> bool {
        self.runs == 0
    }

    /// Zero every counter
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Analyze one run and merge its counters into `acc`
///
/// On error the accumulator is left untouched.
pub fn record_run(
    acc: &mut RunAccumulator,
    input: &RunInput,
    config: &AnalysisConfig,
) -> Result<RunTally, AnalysisError> {
    let report = analyze_run(input, config)?;
    acc.absorb(&report.tally);
    Ok(report.tally)
}
