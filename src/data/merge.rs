use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::loader::load_node_file;
use super::model::{Column, Table, Value};
use super::{INTERACTOR1, INTERACTOR2, NODE_ID};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Conflict policy
// ---------------------------------------------------------------------------

/// What to do when a node file defines a column the node table already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictPolicy {
    /// Earlier-loaded values win; the incoming column is dropped without a
    /// warning. Two files that both carry e.g. `prize` keep only the first.
    #[default]
    KeepExisting,
    /// Incoming values replace the existing column in place.
    KeepIncoming,
    /// Refuse the merge.
    Fail,
}

impl ConflictPolicy {
    /// Pick the values that survive a name collision. Both columns are
    /// already aligned to the node table rows.
    pub fn resolve(self, existing: Column, incoming: Column, source: &Path) -> Result<Column> {
        match self {
            ConflictPolicy::KeepExisting => {
                log::debug!(
                    "Column '{}' from {} shadowed by an earlier node file",
                    incoming.name,
                    source.display()
                );
                Ok(existing)
            }
            ConflictPolicy::KeepIncoming => Ok(incoming),
            ConflictPolicy::Fail => Err(DatasetError::NodeColumnConflict {
                column: incoming.name,
                path: source.to_path_buf(),
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Node universe
// ---------------------------------------------------------------------------

/// Distinct identifiers of both endpoint columns, in order of first appearance
/// (row by row, `Interactor1` before `Interactor2`).
pub fn node_universe(interactome: &Table) -> Result<Vec<String>> {
    let left = &interactome.require(INTERACTOR1)?.values;
    let right = &interactome.require(INTERACTOR2)?.values;

    let mut seen = HashSet::new();
    let mut nodes = Vec::new();
    for (a, b) in left.iter().zip(right) {
        for id in [a, b].into_iter().filter(|v| !v.is_null()) {
            let id = id.to_string();
            if seen.insert(id.clone()) {
                nodes.push(id);
            }
        }
    }
    Ok(nodes)
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Build the node table: one row per node, then each file left-joined in order.
pub fn build_node_table(
    nodes: &[String],
    node_files: &[PathBuf],
    policy: ConflictPolicy,
) -> Result<Table> {
    let ids = nodes.iter().map(|n| Value::String(n.clone())).collect();
    let mut table = Table::from_columns(vec![Column::new(NODE_ID, ids)])?;

    for path in node_files {
        let attributes = load_node_file(path)?;
        table = merge_node_attributes(table, &attributes, path, policy)?;
    }

    let id = table
        .remove_column(NODE_ID)
        .ok_or_else(|| DatasetError::MissingColumn(NODE_ID.to_string()))?;
    table.insert_column(0, id)?;
    Ok(table)
}

/// Left join `incoming` onto `node_table` by `NODEID`.
///
/// Rows of `incoming` for unknown nodes are discarded and nodes without a row
/// in `incoming` get `Null`. Name collisions go through `policy`.
pub fn merge_node_attributes(
    mut node_table: Table,
    incoming: &Table,
    source: &Path,
    policy: ConflictPolicy,
) -> Result<Table> {
    let lookup: HashMap<String, usize> = incoming
        .require(NODE_ID)?
        .values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_null())
        .map(|(row, v)| (v.to_string(), row))
        .rev()
        .collect();

    let matches: Vec<Option<usize>> = node_table
        .require(NODE_ID)?
        .values
        .iter()
        .map(|id| lookup.get(&id.to_string()).copied())
        .collect();

    for column in incoming.columns().iter().filter(|c| c.name != NODE_ID) {
        let values = matches
            .iter()
            .map(|m| m.map_or(Value::Null, |row| column.values[row].clone()))
            .collect();
        let aligned = Column::new(column.name.clone(), values);

        match node_table.column(&aligned.name).cloned() {
            Some(existing) => {
                let kept = policy.resolve(existing, aligned, source)?;
                node_table.replace_values(&kept.name, kept.values)?;
            }
            None => node_table.push_column(aligned)?,
        }
    }
    Ok(node_table)
}
