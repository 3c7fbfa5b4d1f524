use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};

use super::model::{Column, Table, Value};
use super::{DIRECTION, INTERACTOR1, INTERACTOR2, NODE_ID, WEIGHT};
use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Shared TSV reader
// ---------------------------------------------------------------------------

/// Tab-separated reader. Records may vary in width so that shape violations
/// are reported by the caller instead of as a parse error.
fn tsv_reader(path: &Path, has_headers: bool) -> Result<csv::Reader<File>> {
    let reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(has_headers)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

fn read_records(reader: &mut csv::Reader<File>) -> Result<Vec<StringRecord>> {
    reader
        .records()
        .map(|r| r.map_err(DatasetError::from))
        .collect()
}

// ---------------------------------------------------------------------------
// Edge file
// ---------------------------------------------------------------------------

/// Load a headerless edge file into an interactome table.
///
/// * 3 columns – `Interactor1 Interactor2 Weight`, every edge gets `Direction = U`
/// * 4 columns – `Interactor1 Interactor2 Weight Direction`, taken as-is
///
/// Direction values are not validated here; transforms that read them do.
pub fn load_interactome(path: &Path) -> Result<Table> {
    let mut reader = tsv_reader(path, false)?;
    let records = read_records(&mut reader)?;

    let width = records.first().map(|r| r.len()).unwrap_or(0);
    if let Some(bad) = records.iter().find(|r| r.len() != width) {
        return Err(DatasetError::MalformedInteractome {
            path: path.to_path_buf(),
            found: bad.len(),
        });
    }
    if width != 3 && width != 4 {
        return Err(DatasetError::MalformedInteractome {
            path: path.to_path_buf(),
            found: width,
        });
    }

    let field = |idx: usize, parse: fn(&str) -> Value| -> Vec<Value> {
        records.iter().map(|r| parse(&r[idx])).collect()
    };

    let direction = if width == 4 {
        Column::new(DIRECTION, field(3, Value::text))
    } else {
        Column::filled(DIRECTION, Value::from("U"), records.len())
    };

    let table = Table::from_columns(vec![
        Column::new(INTERACTOR1, field(0, Value::text)),
        Column::new(INTERACTOR2, field(1, Value::text)),
        Column::new(WEIGHT, field(2, Value::guess)),
        direction,
    ])?;

    log::debug!(
        "Read {} edges ({} columns) from {}",
        table.height(),
        width,
        path.display()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Node attribute files
// ---------------------------------------------------------------------------

/// Column name for an indicator file: the file name up to its first `.`.
///
/// `sources.wnt.txt` → `sources`
pub fn indicator_column_name(path: &Path) -> String {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match file_name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => file_name,
    }
}

/// Load one node attribute file.
///
/// A file whose header has more than one column must name a `NODEID` column;
/// every other column becomes an attribute with type-guessed cells.
///
/// A single-column file is re-read without a header as a list of identifiers
/// and turned into a boolean indicator column named by
/// [`indicator_column_name`], `true` for each listed node.
///
/// The returned table has `NODEID` first and at most one row per identifier
/// (first occurrence wins).
pub fn load_node_file(path: &Path) -> Result<Table> {
    let mut reader = tsv_reader(path, true)?;
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    if headers.len() == 1 {
        let mut reader = tsv_reader(path, false)?;
        let records = read_records(&mut reader)?;
        let ids = dedup_ids(records.iter().map(|r| r.get(0).unwrap_or("")), path);
        let name = indicator_column_name(path);
        log::debug!(
            "Node file {} is an indicator list of {} nodes → column '{name}'",
            path.display(),
            ids.len()
        );
        let len = ids.len();
        return Table::from_columns(vec![
            Column::new(NODE_ID, ids.into_iter().map(|(_, id)| Value::text(id)).collect()),
            Column::filled(name, Value::Bool(true), len),
        ]);
    }

    let id_idx = headers
        .iter()
        .position(|h| h == NODE_ID)
        .ok_or_else(|| DatasetError::MissingColumn(format!("{NODE_ID} in {}", path.display())))?;

    let records = read_records(&mut reader)?;
    let kept = dedup_ids(records.iter().map(|r| r.get(id_idx).unwrap_or("")), path);

    let mut columns = vec![Column::new(
        NODE_ID,
        kept.iter().map(|(_, id)| Value::text(id)).collect(),
    )];
    for (col_idx, name) in headers.iter().enumerate() {
        if col_idx == id_idx {
            continue;
        }
        let values = kept
            .iter()
            .map(|(row, _)| Value::guess(records[*row].get(col_idx).unwrap_or("")))
            .collect();
        columns.push(Column::new(name.clone(), values));
    }

    log::debug!(
        "Node file {} has {} rows and columns {:?}",
        path.display(),
        kept.len(),
        headers
    );
    Table::from_columns(columns)
}

/// Keep the first row for each non-empty identifier, as `(row index, id)`.
fn dedup_ids<'a>(ids: impl Iterator<Item = &'a str>, path: &Path) -> Vec<(usize, &'a str)> {
    let mut seen = HashSet::new();
    let mut kept = Vec::new();
    for (row, id) in ids.enumerate() {
        if id.is_empty() {
            continue;
        }
        if seen.insert(id) {
            kept.push((row, id));
        } else {
            log::debug!("Duplicate node '{id}' in {} ignored", path.display());
        }
    }
    kept
}
