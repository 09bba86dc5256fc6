//! Workbook ↔ Record conversion
//!
//! - Import: workbook (.xlsx, .xlsm, .xlsb, .xls, .ods) → [`Record`], one field per sheet
//! - Export: [`Record`] → .xlsx, one sheet per field, named by the field identifier

mod exporter;
mod identifier;
mod importer;

pub use exporter::ExcelExporter;
pub use identifier::normalize_identifier;
pub use importer::ExcelImporter;

use crate::error::AabwResult;
use crate::types::{IndexColumn, Record};
use std::path::Path;

/// Read every sheet of `path` into a record, applying `index_column` to each sheet
pub fn read_workbook<P: AsRef<Path>>(path: P, index_column: IndexColumn) -> AabwResult<Record> {
    ExcelImporter::new(path)
        .with_index_column(index_column)
        .import()
}

/// Write `record` to `path` as an .xlsx workbook, overwriting any existing file
pub fn write_workbook<P: AsRef<Path>>(record: &Record, path: P) -> AabwResult<()> {
    ExcelExporter::new(record).export(path.as_ref())
}
