use crate::error::{AabwError, AabwResult};
use chrono::NaiveDateTime;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

//==============================================================================
// Cells and Columns
//==============================================================================

/// A single cell value (mixed primitive types)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDateTime),
    /// Empty cell, or an Excel error value such as `#N/A`
    Missing,
}

impl CellValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "Number",
            CellValue::Text(_) => "Text",
            CellValue::Bool(_) => "Boolean",
            CellValue::Date(_) => "Date",
            CellValue::Missing => "Missing",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Bool(b) => write!(f, "{}", b),
            CellValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d %H:%M:%S")),
            CellValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::Date(value)
    }
}

/// A named column of cells
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type of the first non-missing value, `"Missing"` if there is none
    pub fn value_type(&self) -> &'static str {
        self.values
            .iter()
            .find(|value| !value.is_missing())
            .map_or("Missing", CellValue::type_name)
    }
}

//==============================================================================
// Tables
//==============================================================================

/// A two-dimensional grid with ordered, named columns.
///
/// The index column, when one was designated on import, is held apart from
/// the data columns and is never written back out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn with_column(mut self, column: Column) -> Self {
        self.add_column(column);
        self
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|col| col.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|col| col.name.as_str()).collect()
    }

    /// Get the number of rows (length of first column, all should be same)
    pub fn row_count(&self) -> usize {
        self.columns
            .first()
            .or(self.index.as_ref())
            .map_or(0, |col| col.len())
    }

    /// Values of one row across the data columns
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.row_count() {
            return None;
        }
        self.columns.iter().map(|col| col.values.get(idx)).collect()
    }

    /// Validate all columns have the same length
    pub fn validate_lengths(&self) -> Result<(), String> {
        let row_count = self.row_count();
        for column in self.columns.iter().chain(self.index.as_ref()) {
            if column.len() != row_count {
                return Err(format!(
                    "Column '{}' has {} rows, expected {} rows",
                    column.name,
                    column.len(),
                    row_count
                ));
            }
        }
        Ok(())
    }
}

/// Which column of every sheet becomes the table index
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IndexColumn {
    /// All columns are data columns
    #[default]
    None,
    /// Zero-based column position
    Position(usize),
    /// Header name of the column
    Name(String),
}

impl fmt::Display for IndexColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexColumn::None => f.write_str("none"),
            IndexColumn::Position(pos) => write!(f, "#{}", pos),
            IndexColumn::Name(name) => write!(f, "'{}'", name),
        }
    }
}

impl FromStr for IndexColumn {
    type Err = AabwError;

    /// `"3"` selects by position, any other text selects by header name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AabwError::Format("empty index column".to_string()));
        }
        Ok(match s.parse::<usize>() {
            Ok(pos) => IndexColumn::Position(pos),
            Err(_) => IndexColumn::Name(s.to_string()),
        })
    }
}

//==============================================================================
// Record
//==============================================================================

/// Immutable, ordered collection of tables keyed by identifier.
///
/// One field per workbook sheet, in workbook order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Table)>,
}

impl Record {
    /// Build a record, failing on the first repeated identifier.
    pub fn from_fields<I>(fields: I) -> AabwResult<Self>
    where
        I: IntoIterator<Item = (String, Table)>,
    {
        let mut collected: Vec<(String, Table)> = Vec::new();
        for (name, table) in fields {
            if collected.iter().any(|(existing, _)| *existing == name) {
                return Err(AabwError::DuplicateField(name));
            }
            collected.push((name, table));
        }
        Ok(Self { fields: collected })
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, table)| table)
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.fields.iter().map(|(name, table)| (name.as_str(), table))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Index<&str> for Record {
    type Output = Table;

    fn index(&self, name: &str) -> &Table {
        match self.get(name) {
            Some(table) => table,
            None => panic!("record has no field '{}'", name),
        }
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, table) in &self.fields {
            map.serialize_entry(name, table)?;
        }
        map.end()
    }
}
