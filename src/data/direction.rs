//! Edge direction transforms between the `Direction` column (`U`/`D`) and the
//! encodings external pathway tools expect.
//!
//! Every function takes a table by reference and returns a new one; the input
//! is never modified. Identifier and weight columns are only ever copied.

use super::model::{Column, Table, Value};
use super::{DIRECTION, INTERACTOR1, INTERACTOR2};
use crate::error::{DatasetError, Result};

/// Orientation of a single edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Undirected,
    Directed,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Undirected => "U",
            Direction::Directed => "D",
        }
    }

    fn from_value(value: &Value, column: &str) -> Result<Self> {
        if value.matches("U") {
            Ok(Direction::Undirected)
        } else if value.matches("D") {
            Ok(Direction::Directed)
        } else {
            Err(DatasetError::InvalidDirection {
                column: column.to_string(),
                value: value.to_string(),
                expected: "'U' or 'D'".to_string(),
            })
        }
    }
}

impl From<Direction> for Value {
    fn from(d: Direction) -> Self {
        Value::from(d.as_str())
    }
}

/// Parse the `Direction` column, failing on the first value outside {U, D}.
pub fn directions(table: &Table) -> Result<Vec<Direction>> {
    table
        .require(DIRECTION)?
        .values
        .iter()
        .map(|v| Direction::from_value(v, DIRECTION))
        .collect()
}

/// Turn every undirected edge into two directed edges, one per orientation.
///
/// Each original row is emitted first (relabelled `D`), immediately followed
/// by its reversal when it was `U`. Directed rows pass through unchanged, so
/// the result has `directed + 2 * undirected` rows.
pub fn convert_undirected_to_directed(table: &Table) -> Result<Table> {
    let dirs = directions(table)?;
    let left = &table.require(INTERACTOR1)?.values;
    let right = &table.require(INTERACTOR2)?.values;

    let mut order: Vec<(usize, bool)> = Vec::with_capacity(dirs.len() * 2);
    for (row, dir) in dirs.iter().enumerate() {
        order.push((row, false));
        if *dir == Direction::Undirected {
            order.push((row, true));
        }
    }

    let columns = table
        .columns()
        .iter()
        .map(|c| {
            let values = order
                .iter()
                .map(|&(row, reversed)| match c.name.as_str() {
                    DIRECTION => Direction::Directed.into(),
                    INTERACTOR1 if reversed => right[row].clone(),
                    INTERACTOR2 if reversed => left[row].clone(),
                    _ => c.values[row].clone(),
                })
                .collect();
            Column::new(c.name.clone(), values)
        })
        .collect();
    Table::from_columns(columns)
}

/// Relabel every directed edge as undirected.
///
/// Reverse pairs are not merged: a table holding both `A→B` and `B→A` keeps
/// two `U` rows, so this is not the inverse of
/// [`convert_undirected_to_directed`].
pub fn convert_directed_to_undirected(table: &Table) -> Result<Table> {
    let dirs = directions(table)?;
    let mut out = table.clone();
    out.replace_values(DIRECTION, vec![Direction::Undirected.into(); dirs.len()])?;
    Ok(out)
}

/// Insert a column holding `sep` in every row at index `position`.
pub fn add_separator(table: &Table, position: usize, name: &str, sep: &str) -> Result<Table> {
    let mut out = table.clone();
    out.insert_column(position, Column::filled(name, Value::from(sep), table.height()))?;
    Ok(out)
}

/// Encode `Direction` as a separator column: `undir_sep` for `U` rows and
/// `dir_sep` for `D` rows. The `Direction` column itself is kept.
pub fn add_directionality_separators(
    table: &Table,
    position: usize,
    name: &str,
    dir_sep: &str,
    undir_sep: &str,
) -> Result<Table> {
    let values = directions(table)?
        .into_iter()
        .map(|d| match d {
            Direction::Undirected => Value::from(undir_sep),
            Direction::Directed => Value::from(dir_sep),
        })
        .collect();
    let mut out = table.clone();
    out.insert_column(position, Column::new(name, values))?;
    Ok(out)
}

/// Decode a separator column back into a `Direction` column at `position`.
pub fn readd_direction_col_mixed(
    table: &Table,
    position: usize,
    existing_column: &str,
    dir_sep: &str,
    undir_sep: &str,
) -> Result<Table> {
    let values = table
        .require(existing_column)?
        .values
        .iter()
        .map(|v| {
            if v.matches(undir_sep) {
                Ok(Direction::Undirected.into())
            } else if v.matches(dir_sep) {
                Ok(Direction::Directed.into())
            } else {
                Err(DatasetError::InvalidDirection {
                    column: existing_column.to_string(),
                    value: v.to_string(),
                    expected: format!("'{dir_sep}' or '{undir_sep}'"),
                })
            }
        })
        .collect::<Result<Vec<Value>>>()?;
    insert_direction(table, position, values)
}

/// Add a `Direction` column with every edge marked `U`.
pub fn readd_direction_col_undirected(table: &Table, position: usize) -> Result<Table> {
    insert_direction(
        table,
        position,
        vec![Direction::Undirected.into(); table.height()],
    )
}

/// Add a `Direction` column with every edge marked `D`.
pub fn readd_direction_col_directed(table: &Table, position: usize) -> Result<Table> {
    insert_direction(
        table,
        position,
        vec![Direction::Directed.into(); table.height()],
    )
}

// `position` refers to the table as given; a stale Direction column is dropped
// before the new one goes in.
fn insert_direction(table: &Table, position: usize, values: Vec<Value>) -> Result<Table> {
    if position > table.width() {
        return Err(DatasetError::InvalidColumnPosition {
            position,
            width: table.width(),
        });
    }
    let mut out = table.clone();
    let mut position = position;
    if let Some(idx) = out.position(DIRECTION) {
        out.remove_column(DIRECTION);
        if idx < position {
            position -= 1;
        }
    }
    out.insert_column(position, Column::new(DIRECTION, values))?;
    Ok(out)
}
