use std::fs;
use tempfile::tempdir;

use commexp_cli::commands::{analyze, trace};
use commexp_core::{
    analyzer::Classification, constants::labels, resync::Resync, ResultTable,
};

/// Helper: experiment file with the given runs as (original, changed, corrected, flagged)
fn experiment_json(runs: &[(&str, &str, &str, &str)], repeat_count: Option<u32>) -> String {
    let runs: Vec<serde_json::Value> = runs
        .iter()
        .map(|(original, changed, corrected, flagged)| {
            serde_json::json!({
                "original_message": original,
                "original_code": "01001000",
                "changed_code": "01001001",
                "changed_message": changed,
                "corrected_message": corrected,
                "corrected_flagged_message": flagged,
            })
        })
        .collect();

    let mut doc = serde_json::json!({
        "setup": {
            "information_source": "Random digit book",
            "en_decoder": "Hamming (7,4)",
            "noise_source": "Bit flip"
        },
        "runs": runs,
    });
    if let Some(count) = repeat_count {
        doc["repeat_count"] = serde_json::json!(count);
    }
    serde_json::to_string_pretty(&doc).unwrap()
}

#[test]
fn test_analyze_single_run_writes_table() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");
    let output_path = td.path().join("table.json");

    fs::write(
        &input_path,
        experiment_json(&[("HELLO", "HELXO", "HELLO", "HEL_O")], None),
    )
    .unwrap();

    analyze::execute(
        input_path.to_str().unwrap(),
        None,
        Some(output_path.to_str().unwrap()),
        None,
    )
    .unwrap();

    let table: ResultTable =
        serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();

    assert_eq!(table.len(), 19);
    assert_eq!(table.get(labels::INFORMATION_SOURCE), Some("Random digit book"));
    assert_eq!(table.get(labels::CHANGES), Some("1"));
    assert_eq!(table.get(labels::CHANGED_CHARS), Some("1"));
    assert_eq!(table.get(labels::CORRECTED_CHARS), Some("1"));
    assert_eq!(table.get(labels::FLAGGED_CHARS), Some("1"));
    assert_eq!(table.get(labels::INFORMATION_WITHOUT_CODING), Some("3"));
    assert_eq!(table.get(labels::CORRECTED_FLAGGED_MESSAGE), Some("HEL_O"));
}

#[test]
fn test_analyze_repeats_are_summed() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");

    fs::write(
        &input_path,
        experiment_json(
            &[
                ("HELLO", "HELXO", "HELXO", "HELXO"),
                ("HELLO", "HELLO", "HELLO", "HELLO"),
            ],
            None,
        ),
    )
    .unwrap();

    let table = analyze::run_analysis(input_path.to_str().unwrap(), None, None).unwrap();

    assert_eq!(table.len(), 13);
    assert_eq!(table.get(labels::CHANGES), Some("2"));
    assert_eq!(table.get(labels::INFORMATION), Some("10"));
    assert_eq!(table.get(labels::INFORMATION_WITHOUT_CODING), Some("8"));
}

#[test]
fn test_analyze_average_config() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");
    let config_path = td.path().join("config.json");

    fs::write(
        &input_path,
        experiment_json(
            &[
                ("HELLO", "HELXO", "HELXO", "HELXO"),
                ("HELLO", "HELLO", "HELLO", "HELLO"),
            ],
            None,
        ),
    )
    .unwrap();
    fs::write(&config_path, r#"{ "repeat_policy": "average" }"#).unwrap();

    let table = analyze::run_analysis(
        input_path.to_str().unwrap(),
        Some(config_path.to_str().unwrap()),
        None,
    )
    .unwrap();

    assert_eq!(table.get(labels::CHANGED_CHARS), Some("0.50"));
    assert_eq!(table.get(labels::INFORMATION), Some("5.00"));
}

#[test]
fn test_analyze_repeat_override_keeps_raw_streams() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");

    fs::write(
        &input_path,
        experiment_json(&[("AB", "AB", "AB", "A_")], Some(3)),
    )
    .unwrap();

    let from_file = analyze::run_analysis(input_path.to_str().unwrap(), None, None).unwrap();
    assert_eq!(from_file.len(), 13);

    let overridden = analyze::run_analysis(input_path.to_str().unwrap(), None, Some(1)).unwrap();
    assert_eq!(overridden.len(), 19);
    assert_eq!(overridden.get(labels::MISTAKENLY_FLAGGED_CHARS), Some("1"));
}

#[test]
fn test_analyze_invalid_config_fails() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");
    let config_path = td.path().join("config.json");

    fs::write(&input_path, experiment_json(&[("A", "A", "A", "A")], None)).unwrap();
    fs::write(&config_path, r#"{ "max_resync_offset": 0 }"#).unwrap();

    let result = analyze::run_analysis(
        input_path.to_str().unwrap(),
        Some(config_path.to_str().unwrap()),
        None,
    );
    assert!(result.is_err());
}

#[test]
fn test_analyze_empty_runs_fails() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");

    fs::write(&input_path, experiment_json(&[], None)).unwrap();

    assert!(analyze::run_analysis(input_path.to_str().unwrap(), None, None).is_err());
}

#[test]
fn test_analyze_missing_file() {
    let td = tempdir().unwrap();
    let missing = td.path().join("missing.json");

    assert!(analyze::execute(missing.to_str().unwrap(), None, None, None).is_err());
}

#[test]
fn test_trace_reports_resync() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");

    fs::write(
        &input_path,
        experiment_json(
            &[
                ("HELLO", "HELLO", "HELLO", "HELLO"),
                ("ABCDEFG", "ABXYDEFG", "ABCDEFG", "AB_DEFG"),
            ],
            None,
        ),
    )
    .unwrap();

    let report = trace::trace_run(input_path.to_str().unwrap(), 1, None).unwrap();

    assert_eq!(report.tally.changed_chars, 1);
    assert!(matches!(
        report.positions[2].classification,
        Classification::Changed {
            corrected: true,
            flagged: true,
            resync: [Resync::Matched(2), Resync::Matched(1), Resync::Matched(1)],
        }
    ));
    assert_eq!(report.positions[3].cursors, [4, 3, 3]);

    trace::execute(input_path.to_str().unwrap(), 1, None).unwrap();
}

#[test]
fn test_trace_run_out_of_range() {
    let td = tempdir().unwrap();
    let input_path = td.path().join("experiment.json");

    fs::write(&input_path, experiment_json(&[("A", "A", "A", "A")], None)).unwrap();

    assert!(trace::trace_run(input_path.to_str().unwrap(), 5, None).is_err());
}
