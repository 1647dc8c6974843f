//! Finalizing accumulated runs into a result table

use crate::analyzer::{record_run, RunAccumulator, RunTally};
use crate::config::{AnalysisConfig, RepeatPolicy};
use crate::constants::labels;
use crate::error::AnalysisError;
use crate::types::{ExperimentSetup, ResultRow, RunInput};
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, info, warn};

/// Ordered (label, value) rows describing one finished experiment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Rows in presentation order
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Look up the value of the first row with `label`
    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.label == label)
            .map(|row| row.value.as_str())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over the rows in order
    pub fn iter(&self) -> impl Iterator<Item = &ResultRow> {
        self.rows.iter()
    }

    fn push(&mut self, label: &str, value: impl Into<String>) {
        self.rows.push(ResultRow::new(label, value));
    }
}

/// Presentation collaborator receiving finalized tables
pub trait ResultSink {
    /// Present one finalized table
    fn present(&mut self, table: &ResultTable);
}

/// Collecting sink, mostly useful for tests and embedding
impl ResultSink for Vec<ResultTable> {
    fn present(&mut self, table: &ResultTable) {
        self.push(table.clone());
    }
}

/// Build the result table from accumulated totals
///
/// Rows are, in order: the three element names, the ten numeric counters, and, for a
/// single repeat with a recorded run, the six raw streams of that run.
pub fn build_table(
    setup: &ExperimentSetup,
    totals: &RunTally,
    last_run: Option<&RunInput>,
    repeat_count: u32,
    policy: RepeatPolicy,
) -> Result<ResultTable, AnalysisError> {
    if repeat_count == 0 {
        return Err(AnalysisError::InvalidRepeatCount(repeat_count));
    }

    let mut table = ResultTable::default();

    table.push(labels::INFORMATION_SOURCE, setup.information_source.name.as_str());
    table.push(labels::EN_DECODER, setup.en_decoder.name.as_str());
    table.push(labels::NOISE_SOURCE, setup.noise_source.name.as_str());

    let numeric: [(&str, i64); 10] = [
        (labels::CHANGES, totals.changes as i64),
        (labels::CHANGED_CHARS, totals.changed_chars as i64),
        (labels::CORRECTED_CHARS, totals.corrected_chars as i64),
        (
            labels::MISTAKENLY_CORRECTED_CHARS,
            totals.mistakenly_corrected_chars as i64,
        ),
        (labels::FLAGGED_CHARS, totals.flagged_chars as i64),
        (
            labels::MISTAKENLY_FLAGGED_CHARS,
            totals.mistakenly_flagged_chars as i64,
        ),
        (labels::INFORMATION, totals.information),
        (
            labels::INFORMATION_WITHOUT_CODING,
            totals.information_without_coding,
        ),
        (
            labels::INFORMATION_WITH_CODING_CORRECTED,
            totals.information_with_coding_corrected,
        ),
        (
            labels::INFORMATION_WITH_CODING_FLAGGED,
            totals.information_with_coding_flagged,
        ),
    ];

    for (label, value) in numeric {
        table.push(label, format_value(value, repeat_count, policy));
    }

    if repeat_count == 1 {
        if let Some(run) = last_run {
            table.push(labels::ORIGINAL_CODE, run.original_code.as_str());
            table.push(labels::CHANGED_CODE, run.changed_code.as_str());
            table.push(labels::ORIGINAL_MESSAGE, run.original_message.as_str());
            table.push(labels::CHANGED_MESSAGE, run.changed_message.as_str());
            table.push(labels::CORRECTED_MESSAGE, run.corrected_message.as_str());
            table.push(
                labels::CORRECTED_FLAGGED_MESSAGE,
                run.corrected_flagged_message.as_str(),
            );
        }
    }

    Ok(table)
}

fn format_value(value: i64, repeat_count: u32, policy: RepeatPolicy) -> String {
    match policy {
        RepeatPolicy::Total => value.to_string(),
        RepeatPolicy::Average => format!("{:.2}", value as f64 / repeat_count as f64),
    }
}

/// One experiment configuration and the runs recorded for it
///
/// All mutation goes through `&mut self`, so a single writer owns the totals until
/// `finalize` hands them out and zeroes them.
#[derive(Debug, Clone)]
pub struct Experiment {
    setup: ExperimentSetup,
    config: AnalysisConfig,
    acc: RunAccumulator,
    last_run: Option<RunInput>,
}

impl Experiment {
    /// Create an experiment for the given setup
    pub fn new(setup: ExperimentSetup, config: AnalysisConfig) -> Result<Self, AnalysisError> {
        setup.validate()?;
        config.validate()?;

        Ok(Self {
            setup,
            config,
            acc: RunAccumulator::new(),
            last_run: None,
        })
    }

    /// Selected experiment elements
    pub fn setup(&self) -> &ExperimentSetup {
        &self.setup
    }

    /// Analysis configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Totals recorded since the last finalize
    pub fn accumulator(&self) -> &RunAccumulator {
        &self.acc
    }

    /// Analyze one run and add it to the totals
    pub fn record_run(&mut self, run: RunInput) -> Result<RunTally, AnalysisError> {
        let tally = record_run(&mut self.acc, &run, &self.config)?;
        self.last_run = Some(run);

        #[cfg(feature = "logging")]
        debug!("Recorded run {} for '{}'", self.acc.runs, self.setup.en_decoder.name);

        Ok(tally)
    }

    /// Turn the totals into a result table and reset them
    ///
    /// The totals are cleared even when fewer or more runs than `repeat_count` were
    /// recorded. An invalid repeat count is refused before anything is reset.
    pub fn finalize(&mut self, repeat_count: u32) -> Result<ResultTable, AnalysisError> {
        if self.acc.runs != repeat_count {
            #[cfg(feature = "logging")]
            warn!(
                "Finalizing {} recorded runs with a repeat count of {}",
                self.acc.runs, repeat_count
            );
        }

        let table = build_table(
            &self.setup,
            &self.acc.totals,
            self.last_run.as_ref(),
            repeat_count,
            self.config.repeat_policy,
        )?;

        #[cfg(feature = "logging")]
        info!(
            "Experiment finalized: {} runs, {} rows",
            self.acc.runs,
            table.len()
        );

        self.acc.reset();
        self.last_run = None;

        Ok(table)
    }

    /// Finalize and hand the table to a presentation sink
    pub fn finalize_into<S: ResultSink + ?Sized>(
        &mut self,
        repeat_count: u32,
        sink: &mut S,
    ) -> Result<(), AnalysisError> {
        let table = self.finalize(repeat_count)?;
        sink.present(&table);
        Ok(())
    }
}
