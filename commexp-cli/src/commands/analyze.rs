use crate::commands::input::{load_config, load_experiment};
use anyhow::{bail, Context, Result};
use colored::*;
use commexp_core::{constants::labels, Experiment, ResultSink, ResultTable};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use tracing::{info, warn};

/// Prints a finalized table as description / value rows
pub struct ConsoleTable;

impl ResultSink for ConsoleTable {
    fn present(&mut self, table: &ResultTable) {
        println!("\n=== Experiment Results ===");
        for row in table.iter() {
            let value = match row.label.as_str() {
                labels::INFORMATION_WITHOUT_CODING => row.value.red(),
                labels::INFORMATION_WITH_CODING_CORRECTED
                | labels::INFORMATION_WITH_CODING_FLAGGED => row.value.green(),
                _ => row.value.normal(),
            };
            println!("{:<48} {}", row.label, value);
        }
        println!();
    }
}

/// Record every run of an experiment file and finalize the result table
pub fn run_analysis(
    input: &str,
    config: Option<&str>,
    repeat: Option<u32>,
) -> Result<ResultTable> {
    let file = load_experiment(input)?;
    let config = load_config(config)?;

    if file.runs.is_empty() {
        bail!("Experiment file {} contains no runs", input);
    }

    let repeat_count = repeat
        .or(file.repeat_count)
        .unwrap_or(file.runs.len() as u32);

    let mut experiment = Experiment::new(file.experiment_setup(), config)
        .with_context(|| "Invalid experiment setup")?;

    let progress = ProgressBar::new(file.runs.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} runs")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut refused = 0usize;
    for (i, run) in file.runs.into_iter().enumerate() {
        if let Err(e) = experiment.record_run(run) {
            refused += 1;
            warn!("Run {} refused: {}", i, e);
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    if refused > 0 {
        warn!("{} runs were refused and are not part of the result", refused);
    }

    let table = experiment
        .finalize(repeat_count)
        .with_context(|| "Failed to finalize experiment")?;

    info!("Finalized {} result rows", table.len());
    Ok(table)
}

pub fn execute(
    input: &str,
    config: Option<&str>,
    output: Option<&str>,
    repeat: Option<u32>,
) -> Result<()> {
    info!("Analyzing experiment: {}", input);

    let table = run_analysis(input, config, repeat)?;
    ConsoleTable.present(&table);

    if let Some(output_path) = output {
        let json = serde_json::to_string_pretty(&table)
            .with_context(|| "Failed to serialize result table")?;

        fs::write(output_path, json)
            .with_context(|| format!("Failed to write output file: {}", output_path))?;

        info!("Result table written to: {}", output_path);
    }

    Ok(())
}
