use crate::detector::CountParams;
use crate::error::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON [`CountReport`](crate::diagnostics::CountReport).
    pub json_out: Option<PathBuf>,
    /// Directory receiving one PNG per trace entry.
    pub trace_dir: Option<PathBuf>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input_path: PathBuf,
    #[serde(default)]
    pub output: OutputConfig,
    /// Seed of the noise and color generator; runs are reproducible per seed.
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub params: CountParams,
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let contents = fs::read_to_string(path)?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<RuntimeConfig> {
    let config: RuntimeConfig = serde_json::from_str(contents)?;
    config.params.validate()?;
    Ok(config)
}
