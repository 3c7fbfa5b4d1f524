use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

/// One dataset entry of a pipeline configuration.
///
/// ```json
/// {
///   "label": "wnt",
///   "edge_files": ["np-union.txt"],
///   "node_files": ["sources.wnt.txt", "targets.wnt.txt"],
///   "other_files": [],
///   "data_dir": "input/wnt"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub label: String,
    /// Only the first edge file is loaded.
    pub edge_files: Vec<PathBuf>,
    #[serde(default)]
    pub node_files: Vec<PathBuf>,
    /// Passed through to downstream consumers untouched.
    #[serde(default)]
    pub other_files: Vec<PathBuf>,
    pub data_dir: PathBuf,
}

/// Top-level config file: a list of dataset entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub datasets: Vec<DatasetConfig>,
}

impl DatasetConfig {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Resolved path of the edge file that will be loaded.
    pub fn edge_file(&self) -> Result<PathBuf> {
        let first = self.edge_files.first().ok_or_else(|| {
            DatasetError::Config(format!("dataset '{}' lists no edge files", self.label))
        })?;
        if self.edge_files.len() > 1 {
            log::warn!(
                "Dataset '{}' lists {} edge files; only {} is loaded",
                self.label,
                self.edge_files.len(),
                first.display()
            );
        }
        Ok(self.data_dir.join(first))
    }

    /// Node files resolved against `data_dir`, in merge order.
    pub fn node_file_paths(&self) -> Vec<PathBuf> {
        self.node_files.iter().map(|f| self.data_dir.join(f)).collect()
    }
}

/// Read every dataset entry from a JSON pipeline config.
pub fn load_datasets(path: &Path) -> Result<Vec<DatasetConfig>> {
    let text = std::fs::read_to_string(path)?;
    let config: PipelineConfig = serde_json::from_str(&text)?;
    Ok(config.datasets)
}
