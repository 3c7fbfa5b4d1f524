use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::DatasetConfig;
use crate::data::filter::{self, ColumnSelection, NodeColumnRequest};
use crate::data::loader::load_interactome;
use crate::data::merge::{build_node_table, node_universe, ConflictPolicy};
use crate::data::model::Table;
use crate::error::{DatasetError, Result};

/// Snapshot layout written by [`Dataset::to_file`].
pub const SNAPSHOT_VERSION: u32 = 1;

/// A loaded network: interactome, merged node attributes, and pass-through files.
///
/// Fully populated at construction and read-only afterwards. Accessors hand out
/// copies (or shared borrows) so callers cannot alter the loaded tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    label: String,
    interactome: Table,
    node_table: Table,
    other_files: Vec<PathBuf>,
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    format_version: u32,
    label: String,
    interactome: Table,
    node_table: Table,
    other_files: Vec<PathBuf>,
}

impl Dataset {
    /// Load a dataset, resolving node column collisions in favour of the
    /// earlier file.
    pub fn load(config: &DatasetConfig) -> Result<Self> {
        Self::load_with_policy(config, ConflictPolicy::default())
    }

    pub fn load_with_policy(config: &DatasetConfig, policy: ConflictPolicy) -> Result<Self> {
        let edge_path = config.edge_file()?;
        let interactome = load_interactome(&edge_path)?;

        let nodes = node_universe(&interactome)?;
        let node_table = build_node_table(&nodes, &config.node_file_paths(), policy)?;

        log::info!(
            "Loaded dataset '{}': {} edges, {} nodes, node columns {:?}",
            config.label,
            interactome.height(),
            node_table.height(),
            node_table.column_names()
        );

        Ok(Dataset {
            label: config.label.clone(),
            interactome,
            node_table,
            other_files: config.other_files.clone(),
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Copy of the edge table.
    pub fn get_interactome(&self) -> Table {
        self.interactome.clone()
    }

    /// Copy of the pass-through file list.
    pub fn get_other_files(&self) -> Vec<PathBuf> {
        self.other_files.clone()
    }

    pub fn node_table(&self) -> &Table {
        &self.node_table
    }

    /// Node identifiers in node table order.
    pub fn node_set(&self) -> Vec<String> {
        self.node_table
            .columns()
            .first()
            .map(|c| c.values.iter().map(|v| v.to_string()).collect())
            .unwrap_or_default()
    }

    /// Nodes with a value in any of `columns`; warns when at most 5% qualify.
    pub fn request_node_columns<C: ColumnSelection + ?Sized>(
        &self,
        columns: &C,
    ) -> Result<NodeColumnRequest> {
        filter::request_node_columns(&self.node_table, columns)
    }

    pub fn contains_node_columns<C: ColumnSelection + ?Sized>(&self, columns: &C) -> bool {
        filter::contains_node_columns(&self.node_table, columns)
    }

    /// Write a versioned JSON snapshot.
    pub fn to_file(&self, path: &Path) -> Result<()> {
        let snapshot = Snapshot {
            format_version: SNAPSHOT_VERSION,
            label: self.label.clone(),
            interactome: self.interactome.clone(),
            node_table: self.node_table.clone(),
            other_files: self.other_files.clone(),
        };
        let json = serde_json::to_string_pretty(&snapshot)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read a snapshot written by [`Dataset::to_file`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        let raw: serde_json::Value = serde_json::from_slice(&bytes)?;
        let version = raw
            .get("format_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        if version != u64::from(SNAPSHOT_VERSION) {
            return Err(DatasetError::UnsupportedSnapshotVersion(
                u32::try_from(version).unwrap_or(u32::MAX),
            ));
        }
        let snapshot: Snapshot = serde_json::from_value(raw)?;
        Ok(Dataset {
            label: snapshot.label,
            interactome: snapshot.interactome,
            node_table: snapshot.node_table,
            other_files: snapshot.other_files,
        })
    }
}
