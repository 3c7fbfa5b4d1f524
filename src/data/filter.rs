use super::model::Table;
use super::NODE_ID;
use crate::error::Result;

/// Hit fractions at or below this are reported as sparse.
pub const WARNING_THRESHOLD: f64 = 0.05;

// ---------------------------------------------------------------------------
// Column selection: one name or many
// ---------------------------------------------------------------------------

/// Anything that names one or more columns.
pub trait ColumnSelection {
    fn names(&self) -> Vec<&str>;
}

impl ColumnSelection for str {
    fn names(&self) -> Vec<&str> {
        vec![self]
    }
}

impl ColumnSelection for String {
    fn names(&self) -> Vec<&str> {
        vec![self.as_str()]
    }
}

impl<S: AsRef<str>> ColumnSelection for [S] {
    fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.as_ref()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> ColumnSelection for [S; N] {
    fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.as_ref()).collect()
    }
}

impl<S: AsRef<str>> ColumnSelection for Vec<S> {
    fn names(&self) -> Vec<&str> {
        self.iter().map(|s| s.as_ref()).collect()
    }
}

impl<T: ColumnSelection + ?Sized> ColumnSelection for &T {
    fn names(&self) -> Vec<&str> {
        (**self).names()
    }
}

// ---------------------------------------------------------------------------
// Completeness
// ---------------------------------------------------------------------------

/// Rows of a node table with at least one requested value filled in.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeColumnRequest {
    /// `NODEID` followed by the requested columns.
    pub table: Table,
    /// Filtered rows over all node table rows; 0 for an empty node table.
    pub hit_fraction: f64,
}

impl NodeColumnRequest {
    pub fn is_sparse(&self) -> bool {
        self.hit_fraction <= WARNING_THRESHOLD
    }
}

/// Keep the nodes that have a value in any of `columns`.
///
/// Unknown column names are an error. A sparse result is only advisory: it is
/// logged at warn level and the filtered rows are still returned.
pub fn request_node_columns<C: ColumnSelection + ?Sized>(
    node_table: &Table,
    columns: &C,
) -> Result<NodeColumnRequest> {
    let requested: Vec<&str> = columns.names().into_iter().filter(|c| *c != NODE_ID).collect();

    let mut selection = vec![NODE_ID];
    selection.extend(requested.iter().copied());
    let selected = node_table.select(&selection)?;

    let mask: Vec<bool> = (0..selected.height())
        .map(|row| {
            selected
                .columns()
                .iter()
                .filter(|c| c.name != NODE_ID)
                .any(|c| !c.values[row].is_null())
        })
        .collect();
    let table = selected.filter_rows(&mask);

    let hit_fraction = if node_table.height() == 0 {
        0.0
    } else {
        table.height() as f64 / node_table.height() as f64
    };

    let request = NodeColumnRequest {
        table,
        hit_fraction,
    };
    if request.is_sparse() {
        log::warn!(
            "Only {:.2}% of nodes had one or more of the following columns filled: {:?}",
            hit_fraction * 100.0,
            requested
        );
    }
    Ok(request)
}

/// Whether every named column exists in the table.
pub fn contains_node_columns<C: ColumnSelection + ?Sized>(node_table: &Table, columns: &C) -> bool {
    columns.names().iter().all(|name| node_table.contains(name))
}
