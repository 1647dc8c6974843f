//! Example combining several repeats of the same experiment configuration

use commexp_core::{
    config::RepeatPolicy, AnalysisConfig, Experiment, ExperimentSetup, ResultSink, ResultTable,
    RunInput,
};

/// Prints tables as two aligned columns
struct ConsoleSink;

impl ResultSink for ConsoleSink {
    fn present(&mut self, table: &ResultTable) {
        for row in table.iter() {
            println!("{:<48} {}", row.label, row.value);
        }
        println!();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Commexp Repeated Runs Example\n");

    let runs = [
        RunInput::from_messages("THE QUICK BROWN FOX", "THE QUICK BROWN FOX", "THE QUICK BROWN FOX", "THE QUICK BROWN FOX"),
        RunInput::from_messages("THE QUICK BROWN FOX", "THE QUIXK BROWN FOX", "THE QUICK BROWN FOX", "THE QUI_K BROWN FOX"),
        // 'R' decoded into two characters; the trailing text realigns
        RunInput::from_messages("THE QUICK BROWN FOX", "THE QUICK BÃ\u{80}OWN FOX", "THE QUICK BÃ\u{80}OWN FOX", "THE QUICK B_\u{80}OWN FOX"),
    ];

    for policy in [RepeatPolicy::Total, RepeatPolicy::Average] {
        println!("=== {:?} over {} repeats ===", policy, runs.len());

        let setup = ExperimentSetup::named("User input", "Mock", "Random bit flip");
        let config = AnalysisConfig::default().repeat_policy(policy);
        let mut experiment = Experiment::new(setup, config)?;

        for run in runs.iter().cloned() {
            experiment.record_run(run)?;
        }

        experiment.finalize_into(runs.len() as u32, &mut ConsoleSink)?;
    }

    Ok(())
}
