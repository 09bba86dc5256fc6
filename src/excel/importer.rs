//! Excel importer implementation - workbook → Record

use crate::error::{AabwError, AabwResult};
use crate::excel::identifier::normalize_identifier;
use crate::types::{CellValue, Column, IndexColumn, Record, Table};
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads every sheet of a workbook into a [`Record`]
pub struct ExcelImporter {
    path: PathBuf,
    index_column: IndexColumn,
}

impl ExcelImporter {
    /// Create a new Excel importer
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            index_column: IndexColumn::None,
        }
    }

    /// Index column applied to every sheet
    pub fn with_index_column(mut self, index_column: IndexColumn) -> Self {
        self.index_column = index_column;
        self
    }

    /// Import the workbook, one record field per sheet in workbook order
    pub fn import(&self) -> AabwResult<Record> {
        // The whole file is read up front so the handle is closed before parsing
        let bytes = fs::read(&self.path).map_err(|source| AabwError::WorkbookNotFound {
            path: self.path.clone(),
            source,
        })?;

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
            AabwError::Format(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        let sheet_names = workbook.sheet_names().to_vec();
        let mut fields: Vec<(String, Table)> = Vec::with_capacity(sheet_names.len());
        let mut sources: Vec<&str> = Vec::with_capacity(sheet_names.len());

        for sheet_name in &sheet_names {
            let identifier = normalize_identifier(sheet_name)?;
            if let Some(pos) = fields.iter().position(|(existing, _)| *existing == identifier) {
                return Err(AabwError::DuplicateIdentifier {
                    identifier,
                    first: sources[pos].to_string(),
                    second: sheet_name.clone(),
                });
            }

            let range = workbook.worksheet_range(sheet_name).map_err(|e| {
                AabwError::Format(format!("Failed to read sheet '{}': {}", sheet_name, e))
            })?;
            let table = self.table_from_range(sheet_name, &range)?;

            debug!(
                sheet = %sheet_name,
                field = %identifier,
                columns = table.columns.len(),
                rows = table.row_count(),
                "imported sheet"
            );
            fields.push((identifier, table));
            sources.push(sheet_name);
        }

        let record = Record::from_fields(fields)?;
        info!(
            path = %self.path.display(),
            fields = record.len(),
            "workbook imported"
        );
        Ok(record)
    }

    /// Convert one sheet's used range into a table.
    ///
    /// The first used row is the header, and column positions count from the
    /// first used column rather than column A.
    fn table_from_range(&self, sheet_name: &str, range: &Range<Data>) -> AabwResult<Table> {
        let mut rows = range.rows();
        let header = match rows.next() {
            Some(header) => header,
            None => return Ok(Table::new()), // Empty sheet
        };

        let column_names = self.header_names(header);
        let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); column_names.len()];

        for row in rows {
            for (col, cells) in values.iter_mut().enumerate() {
                let cell = row.get(col).map_or(CellValue::Missing, Self::cell_value);
                cells.push(cell);
            }
        }

        let mut columns: Vec<Column> = column_names
            .into_iter()
            .zip(values)
            .map(|(name, values)| Column::new(name, values))
            .collect();

        let index = match self.resolve_index(&columns) {
            Some(pos) => Some(columns.remove(pos)),
            None if self.index_column == IndexColumn::None => None,
            None => {
                return Err(AabwError::MissingIndexColumn {
                    table: sheet_name.to_string(),
                    index: self.index_column.to_string(),
                })
            }
        };

        Ok(Table { columns, index })
    }

    /// Position of the index column among the parsed columns, if any
    fn resolve_index(&self, columns: &[Column]) -> Option<usize> {
        match &self.index_column {
            IndexColumn::None => None,
            IndexColumn::Position(pos) => (*pos < columns.len()).then_some(*pos),
            IndexColumn::Name(name) => columns.iter().position(|col| col.name == *name),
        }
    }

    /// Column names from the header row.
    ///
    /// Blank headers become `Unnamed: {position}` and repeats get a `.1`,
    /// `.2`, ... suffix so every column name is distinct.
    fn header_names(&self, header: &[Data]) -> Vec<String> {
        let mut names: Vec<String> = Vec::with_capacity(header.len());
        for (idx, cell) in header.iter().enumerate() {
            let base = match cell {
                Data::Empty => format!("Unnamed: {}", idx),
                Data::String(s) if s.trim().is_empty() => format!("Unnamed: {}", idx),
                other => other.to_string(),
            };

            let mut name = base.clone();
            let mut dup = 1;
            while names.contains(&name) {
                name = format!("{}.{}", base, dup);
                dup += 1;
            }
            names.push(name);
        }
        names
    }

    /// Convert a calamine cell into a [`CellValue`]
    fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Int(i) => CellValue::Number(*i as f64),
            Data::Float(f) => CellValue::Number(*f),
            Data::String(s) => CellValue::Text(s.clone()),
            Data::Bool(b) => CellValue::Bool(*b),
            Data::DateTime(dt) => {
                if dt.is_duration() {
                    return CellValue::Number(dt.as_f64());
                }
                dt.as_datetime()
                    .map_or(CellValue::Number(dt.as_f64()), CellValue::Date)
            }
            Data::DateTimeIso(s) => Self::parse_iso_datetime(s)
                .map_or_else(|| CellValue::Text(s.clone()), CellValue::Date),
            Data::DurationIso(s) => CellValue::Text(s.clone()),
            // Empty cells and error values such as #N/A
            _ => CellValue::Missing,
        }
    }

    /// Parse the ISO 8601 timestamps ODS files store for dates
    fn parse_iso_datetime(s: &str) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }
}
