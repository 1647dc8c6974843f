//! Example analyzing one run of a communication experiment

use commexp_core::{AnalysisConfig, Experiment, ExperimentSetup, RunInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Commexp Single Run Example\n");

    let setup = ExperimentSetup::named("Random digit book", "Hamming (7,4)", "Bit flip");
    let mut experiment = Experiment::new(setup, AnalysisConfig::default())?;

    // One flipped bit turned 'L' into 'M'; the corrector fixed it, the flagger marked it
    let run = RunInput::new(
        "HELLO",
        "0100100001000101010011000100110001001111",
        "0100100001000101010011000100110101001111",
        "HELMO",
        "HELLO",
        "HEL_O",
    );

    let tally = experiment.record_run(run)?;
    println!(
        "Changed: {}, corrected: {}, flagged: {}\n",
        tally.changed_chars, tally.corrected_chars, tally.flagged_chars
    );

    let table = experiment.finalize(1)?;
    for row in table.iter() {
        println!("{:<48} {}", row.label, row.value);
    }

    Ok(())
}
