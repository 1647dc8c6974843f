use crate::commands::input::{load_config, load_experiment};
use anyhow::{Context, Result};
use colored::*;
use commexp_core::analyzer::{analyze_run, Classification, RunReport};
use commexp_core::resync::Resync;
use tracing::info;

/// Analyze a single run of an experiment file and return its per-position trace
pub fn trace_run(input: &str, run_index: usize, config: Option<&str>) -> Result<RunReport> {
    let file = load_experiment(input)?;
    let config = load_config(config)?;

    let run = file.runs.get(run_index).with_context(|| {
        format!(
            "Run {} not found, {} has {} runs",
            run_index,
            input,
            file.runs.len()
        )
    })?;

    analyze_run(run, &config).with_context(|| format!("Failed to analyze run {}", run_index))
}

pub fn execute(input: &str, run_index: usize, config: Option<&str>) -> Result<()> {
    info!("Tracing run {} of {}", run_index, input);

    let report = trace_run(input, run_index, config)?;

    println!("\n=== Position Trace ===");
    println!("{:>5}  {:<4} {:>15}  class", "pos", "char", "cursors");
    for record in &report.positions {
        let cursors = format!(
            "{}/{}/{}",
            record.cursors[0], record.cursors[1], record.cursors[2]
        );
        println!(
            "{:>5}  {:<4} {:>15}  {}",
            record.position,
            format!("{:?}", record.original),
            cursors,
            describe(&record.classification)
        );
    }

    let t = &report.tally;
    println!("\n=== Run Tally ===");
    println!("Changed characters:   {}", t.changed_chars);
    println!(
        "Corrected characters: {} ({} mistaken)",
        t.corrected_chars, t.mistakenly_corrected_chars
    );
    println!(
        "Flagged characters:   {} ({} mistaken)",
        t.flagged_chars, t.mistakenly_flagged_chars
    );
    println!("Resync failures:      {}", t.resync_failures);
    println!();

    Ok(())
}

fn describe(classification: &Classification) -> ColoredString {
    match classification {
        Classification::Intact {
            mistakenly_corrected: false,
            mistakenly_flagged: false,
        } => "intact".normal(),
        Classification::Intact {
            mistakenly_corrected,
            mistakenly_flagged,
        } => {
            let mut parts = Vec::new();
            if *mistakenly_corrected {
                parts.push("mistakenly corrected");
            }
            if *mistakenly_flagged {
                parts.push("mistakenly flagged");
            }
            format!("intact, {}", parts.join(", ")).yellow()
        }
        Classification::Changed {
            corrected,
            flagged,
            resync,
        } => {
            let shifts: Vec<String> = resync.iter().map(describe_resync).collect();
            format!(
                "changed{}{} [resync {}]",
                if *corrected { ", corrected" } else { "" },
                if *flagged { ", flagged" } else { "" },
                shifts.join(" ")
            )
            .red()
        }
        Classification::Skipped => "skipped".dimmed(),
    }
}

fn describe_resync(outcome: &Resync) -> String {
    match outcome {
        Resync::Matched(offset) => format!("+{}", offset),
        Resync::NoMatch => "none".to_string(),
        Resync::EndOfStream => "end".to_string(),
    }
}
