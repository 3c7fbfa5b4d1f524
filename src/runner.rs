use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// Settings for one algorithm run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunnerConfig {
    /// Registry key of the algorithm.
    pub name: String,
    pub input_dir: PathBuf,
    #[serde(default)]
    pub params: serde_json::Value,
    pub expr_data: String,
    pub cell_data: String,
}

/// A pathway reconstruction algorithm: prepare inputs, run, parse results.
pub trait Algorithm {
    fn name(&self) -> &str;

    fn generate_inputs(&self, config: &RunnerConfig) -> Result<()>;

    fn execute(&self, config: &RunnerConfig) -> Result<()>;

    fn parse_output(&self, config: &RunnerConfig) -> Result<()>;
}

/// Algorithms keyed by name. Build once at startup and share by reference.
#[derive(Default)]
pub struct AlgorithmRegistry {
    algorithms: BTreeMap<String, Box<dyn Algorithm>>,
}

impl AlgorithmRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register under the algorithm's own name, replacing any previous entry.
    pub fn register(&mut self, algorithm: Box<dyn Algorithm>) {
        self.algorithms
            .insert(algorithm.name().to_string(), algorithm);
    }

    pub fn get(&self, name: &str) -> Option<&dyn Algorithm> {
        self.algorithms.get(name).map(|a| a.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.algorithms.keys().map(|k| k.as_str()).collect()
    }
}

/// One configured run bound to its algorithm.
pub struct Runner<'a> {
    config: RunnerConfig,
    algorithm: &'a dyn Algorithm,
}

impl<'a> Runner<'a> {
    pub fn new(config: RunnerConfig, registry: &'a AlgorithmRegistry) -> Result<Self> {
        let algorithm = registry
            .get(&config.name)
            .ok_or_else(|| DatasetError::UnknownAlgorithm(config.name.clone()))?;
        Ok(Runner { config, algorithm })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn generate_inputs(&self) -> Result<()> {
        log::info!("Generating inputs for {}", self.config.name);
        self.algorithm.generate_inputs(&self.config)
    }

    pub fn run(&self) -> Result<()> {
        log::info!("Running {}", self.config.name);
        self.algorithm.execute(&self.config)
    }

    pub fn parse_output(&self) -> Result<()> {
        log::info!("Parsing output of {}", self.config.name);
        self.algorithm.parse_output(&self.config)
    }

    /// All three stages in order, stopping at the first failure.
    pub fn run_all(&self) -> Result<()> {
        self.generate_inputs()?;
        self.run()?;
        self.parse_output()
    }
}
