use anyhow::{Context, Result};
use commexp_core::{AnalysisConfig, ExperimentSetup, RunInput};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use tracing::info;

/// Names of the selected experiment elements
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupJson {
    pub information_source: String,
    pub en_decoder: String,
    pub noise_source: String,
}

/// One experiment configuration with all its recorded runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentFile {
    pub setup: SetupJson,
    #[serde(default)]
    pub repeat_count: Option<u32>,
    pub runs: Vec<RunInput>,
}

impl ExperimentFile {
    pub fn experiment_setup(&self) -> ExperimentSetup {
        ExperimentSetup::named(
            self.setup.information_source.as_str(),
            self.setup.en_decoder.as_str(),
            self.setup.noise_source.as_str(),
        )
    }
}

/// Read an experiment file, or stdin for "-"
pub fn load_experiment(path: &str) -> Result<ExperimentFile> {
    let content = if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path))?
    };

    let file: ExperimentFile =
        serde_json::from_str(&content).with_context(|| "Failed to parse experiment JSON")?;

    info!("Loaded {} runs from {}", file.runs.len(), path);
    Ok(file)
}

/// Read an analysis config, falling back to defaults
pub fn load_config(path: Option<&str>) -> Result<AnalysisConfig> {
    let Some(path) = path else {
        return Ok(AnalysisConfig::default());
    };

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path))?;
    let config: AnalysisConfig =
        serde_json::from_str(&content).with_context(|| "Failed to parse config JSON")?;
    config
        .validate()
        .with_context(|| format!("Invalid config in {}", path))?;

    Ok(config)
}
