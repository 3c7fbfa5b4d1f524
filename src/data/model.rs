use std::collections::HashSet;
use std::fmt;
use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

// ---------------------------------------------------------------------------
// Value – a single cell in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring the dtypes a delimited reader infers.
/// `Null` is the "empty" cell: a missing attribute or an unmatched join row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl Value {
    /// Keep a raw field as text (identifiers, direction flags). Missing → `Null`.
    pub fn text(s: &str) -> Self {
        if is_missing(s) {
            Value::Null
        } else {
            Value::String(s.to_string())
        }
    }

    /// Infer the narrowest type for a raw field.
    ///
    /// Missing-value markers become `Null`. Non-finite numbers such as `inf`
    /// stay text so every `Float` is finite.
    pub fn guess(s: &str) -> Self {
        if is_missing(s) {
            return Value::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return Value::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Value::Float(f);
            }
            return Value::String(s.to_string());
        }
        if s == "true" || s == "false" {
            return Value::Bool(s == "true");
        }
        Value::String(s.to_string())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Compare against a sentinel by textual form. `Null` never matches.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Value::String(s) => s == text,
            Value::Null => false,
            other => other.to_string() == text,
        }
    }
}

/// Tokens read as an empty cell, the usual set written by spreadsheet and
/// dataframe tools.
const MISSING_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

// ---------------------------------------------------------------------------
// Column – a named vector of cells
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    /// A column holding the same value in each of `len` rows.
    pub fn filled(name: impl Into<String>, value: Value, len: usize) -> Self {
        Column::new(name, vec![value; len])
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns of equal length
// ---------------------------------------------------------------------------

/// Column-oriented table. Every column has exactly `height` values and column
/// names are unique.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Column>", into = "Vec<Column>")]
pub struct Table {
    columns: Vec<Column>,
    height: usize,
}

impl TryFrom<Vec<Column>> for Table {
    type Error = DatasetError;

    fn try_from(columns: Vec<Column>) -> Result<Self> {
        Table::from_columns(columns)
    }
}

impl From<Table> for Vec<Column> {
    fn from(table: Table) -> Self {
        table.columns
    }
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, checking that names are unique and lengths agree.
    pub fn from_columns(columns: Vec<Column>) -> Result<Self> {
        let mut table = Table::new();
        for column in columns {
            table.push_column(column)?;
        }
        Ok(table)
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Like [`Table::column`] but a missing column is an error.
    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    }

    /// Insert `column` so that it ends up at index `position` (`0..=width`).
    ///
    /// The first column inserted into a zero-width table fixes its height.
    pub fn insert_column(&mut self, position: usize, column: Column) -> Result<()> {
        if position > self.columns.len() {
            return Err(DatasetError::InvalidColumnPosition {
                position,
                width: self.columns.len(),
            });
        }
        if self.contains(&column.name) {
            return Err(DatasetError::DuplicateColumn(column.name));
        }
        if self.columns.is_empty() {
            self.height = column.len();
        } else if column.len() != self.height {
            let found = column.len();
            return Err(DatasetError::ColumnLength {
                column: column.name,
                expected: self.height,
                found,
            });
        }
        self.columns.insert(position, column);
        Ok(())
    }

    pub fn push_column(&mut self, column: Column) -> Result<()> {
        self.insert_column(self.columns.len(), column)
    }

    /// Detach a column by name.
    pub fn remove_column(&mut self, name: &str) -> Option<Column> {
        let idx = self.position(name)?;
        Some(self.columns.remove(idx))
    }

    /// Replace the values of an existing column in place.
    pub fn replace_values(&mut self, name: &str, values: Vec<Value>) -> Result<()> {
        if values.len() != self.height {
            return Err(DatasetError::ColumnLength {
                column: name.to_string(),
                expected: self.height,
                found: values.len(),
            });
        }
        let column = self
            .columns
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))?;
        column.values = values;
        Ok(())
    }

    /// New table with only the named columns, in the given order.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let mut seen = HashSet::new();
        let mut out = Table {
            columns: Vec::with_capacity(names.len()),
            height: self.height,
        };
        for name in names {
            if !seen.insert(*name) {
                continue;
            }
            out.columns.push(self.require(name)?.clone());
        }
        Ok(out)
    }

    /// New table built from the given row indices (repeats allowed).
    pub fn take_rows(&self, indices: &[usize]) -> Table {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                Column::new(
                    c.name.clone(),
                    indices.iter().map(|&i| c.values[i].clone()).collect(),
                )
            })
            .collect();
        Table {
            columns,
            height: indices.len(),
        }
    }

    /// New table holding the rows where `mask` is true.
    pub fn filter_rows(&self, mask: &[bool]) -> Table {
        let indices: Vec<usize> = mask
            .iter()
            .enumerate()
            .filter(|(_, keep)| **keep)
            .map(|(i, _)| i)
            .collect();
        self.take_rows(&indices)
    }

    /// Borrow row `index` as cells in column order.
    pub fn row(&self, index: usize) -> Option<Vec<&Value>> {
        if index >= self.height {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[index]).collect())
    }

    /// Write the table as tab-separated text, optionally with a header row.
    pub fn write_tsv<W: Write>(&self, writer: W, header: bool) -> Result<()> {
        let mut out = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        if header {
            out.write_record(self.column_names())?;
        }
        for i in 0..self.height {
            out.write_record(self.columns.iter().map(|c| c.values[i].to_string()))?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_three() -> Table {
        Table::from_columns(vec![
            Column::new("a", vec!["x".into(), "y".into(), "z".into()]),
            Column::new("b", vec![1.0.into(), Value::Null, 3.0.into()]),
        ])
        .unwrap()
    }

    #[test]
    fn guess_infers_types() {
        assert_eq!(Value::guess("7"), Value::Integer(7));
        assert_eq!(Value::guess("0.5"), Value::Float(0.5));
        assert_eq!(Value::guess("true"), Value::Bool(true));
        assert_eq!(Value::guess("TP53"), Value::String("TP53".into()));
        assert_eq!(Value::guess(""), Value::Null);
    }

    #[test]
    fn missing_markers_are_null() {
        for token in ["NA", "N/A", "nan", "NaN", "null", "#N/A", "None", "<NA>"] {
            assert_eq!(Value::guess(token), Value::Null, "{token}");
            assert_eq!(Value::text(token), Value::Null, "{token}");
        }
        assert_eq!(Value::text("TP53"), Value::from("TP53"));
    }

    #[test]
    fn non_finite_numbers_stay_text() {
        for token in ["inf", "-inf", "infinity", "Infinity"] {
            assert_eq!(Value::guess(token), Value::String(token.to_string()));
        }
    }

    #[test]
    fn matches_compares_text_form() {
        assert!(Value::from("|").matches("|"));
        assert!(Value::Integer(1).matches("1"));
        assert!(!Value::Null.matches(""));
    }

    #[test]
    fn from_columns_rejects_ragged_columns() {
        let err = Table::from_columns(vec![
            Column::new("a", vec![Value::Null]),
            Column::new("b", vec![]),
        ])
        .unwrap_err();
        assert!(matches!(err, DatasetError::ColumnLength { .. }));
    }

    #[test]
    fn insert_column_validates_position_and_name() {
        let mut t = two_by_three();
        let err = t
            .insert_column(3, Column::filled("c", Value::Null, 3))
            .unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidColumnPosition { position: 3, width: 2 }
        ));
        let err = t
            .insert_column(0, Column::filled("a", Value::Null, 3))
            .unwrap_err();
        assert!(matches!(err, DatasetError::DuplicateColumn(_)));

        t.insert_column(1, Column::filled("c", "-".into(), 3)).unwrap();
        assert_eq!(t.column_names(), vec!["a", "c", "b"]);
    }

    #[test]
    fn insert_column_rejects_wrong_length() {
        let mut t = two_by_three();
        match t.insert_column(1, Column::filled("c", Value::Null, 2)) {
            Err(DatasetError::ColumnLength {
                column,
                expected,
                found,
            }) => {
                assert_eq!(column, "c");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("expected column length error, got {other:?}"),
        }
        assert_eq!(t.width(), 2);
    }

    #[test]
    fn filter_and_select() {
        let t = two_by_three();
        let filtered = t.filter_rows(&[true, false, true]);
        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.row(1).unwrap()[0], &Value::from("z"));

        let selected = t.select(&["b"]).unwrap();
        assert_eq!(selected.column_names(), vec!["b"]);
        assert!(t.select(&["nope"]).is_err());
    }

    #[test]
    fn write_tsv_renders_nulls_as_empty() {
        let mut buf = Vec::new();
        two_by_three().write_tsv(&mut buf, true).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "a\tb\nx\t1.0\ny\t\nz\t3.0\n");
    }

    #[test]
    fn serde_round_trip_validates_columns() {
        let t = two_by_three();
        let json = serde_json::to_string(&t).unwrap();
        let back: Table = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);

        let ragged = r#"[{"name":"a","values":["Null"]},{"name":"b","values":[]}]"#;
        assert!(serde_json::from_str::<Table>(ragged).is_err());
    }
}
