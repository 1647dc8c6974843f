//! Fuzzing placeholder for commexp-core analysis
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_analyze

use commexp_core::{analyzer::analyze_run, config::AnalysisConfig, RunInput};

/// Split raw bytes into six lossy UTF-8 streams on 0xFF separators
fn split_run(data: &[u8]) -> RunInput {
    let mut parts = data
        .split(|&b| b == 0xFF)
        .map(|part| String::from_utf8_lossy(part).into_owned());

    let mut next = || parts.next().unwrap_or_default();
    RunInput::new(next(), next(), next(), next(), next(), next())
}

pub fn fuzz_analyze(data: &[u8]) {
    let run = split_run(data);

    // Should either succeed or return an error, never panic
    let _ = analyze_run(&run, &AnalysisConfig::default());
}

pub fn fuzz_analyze_window(data: &[u8]) {
    let Some((&window, rest)) = data.split_first() else {
        return;
    };
    let config = AnalysisConfig::default().max_resync_offset(window as usize % 8);
    let _ = analyze_run(&split_run(rest), &config);
}
