//! Excel exporter implementation - Record → workbook

use crate::error::{AabwError, AabwResult};
use crate::types::{CellValue, Record, Table};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;
use tracing::{debug, info};

const DATE_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Writes each record field to its own worksheet
pub struct ExcelExporter<'a> {
    record: &'a Record,
    header_format: Format,
    date_format: Format,
}

impl<'a> ExcelExporter<'a> {
    /// Create a new Excel exporter
    pub fn new(record: &'a Record) -> Self {
        Self {
            record,
            header_format: Format::new().set_bold(),
            date_format: Format::new().set_num_format(DATE_FORMAT),
        }
    }

    /// Export the record to an .xlsx file, replacing anything already there
    pub fn export(&self, output_path: &Path) -> AabwResult<()> {
        if self.record.is_empty() {
            return Err(AabwError::EmptyRecord);
        }

        let mut workbook = Workbook::new();

        for (field, table) in self.record.iter() {
            table.validate_lengths().map_err(|e| {
                AabwError::Format(format!("Field '{}' is not rectangular: {}", field, e))
            })?;
            self.export_table(&mut workbook, field, table)
                .map_err(|message| AabwError::Write {
                    path: output_path.to_path_buf(),
                    message,
                })?;
            debug!(
                sheet = %field,
                columns = table.columns.len(),
                rows = table.row_count(),
                "exported sheet"
            );
        }

        workbook.save(output_path).map_err(|e| AabwError::Write {
            path: output_path.to_path_buf(),
            message: format!("Failed to save Excel file: {}", e),
        })?;

        info!(
            path = %output_path.display(),
            sheets = self.record.len(),
            "workbook exported"
        );
        Ok(())
    }

    /// Export a single table to a worksheet (header row, then data rows)
    fn export_table(
        &self,
        workbook: &mut Workbook,
        sheet_name: &str,
        table: &Table,
    ) -> Result<(), String> {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet_name)
            .map_err(|e| format!("Failed to set worksheet name '{}': {}", sheet_name, e))?;

        // The index column stays out of the written sheet
        for (col_idx, column) in table.columns.iter().enumerate() {
            let col = u16::try_from(col_idx)
                .map_err(|_| format!("Too many columns in '{}'", sheet_name))?;

            worksheet
                .write_string_with_format(0, col, &column.name, &self.header_format)
                .map_err(|e| format!("Failed to write header: {}", e))?;

            for (row_idx, value) in column.values.iter().enumerate() {
                let row = u32::try_from(row_idx + 1)
                    .map_err(|_| format!("Too many rows in '{}'", sheet_name))?;
                self.write_cell_value(worksheet, row, col, value)?;
            }
        }

        Ok(())
    }

    /// Write one cell; missing values leave the cell blank
    fn write_cell_value(
        &self,
        worksheet: &mut Worksheet,
        row: u32,
        col: u16,
        value: &CellValue,
    ) -> Result<(), String> {
        let result = match value {
            CellValue::Number(n) if n.is_finite() => worksheet.write_number(row, col, *n),
            CellValue::Text(s) => worksheet.write_string(row, col, s),
            CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
            CellValue::Date(d) => worksheet.write_datetime_with_format(row, col, d, &self.date_format),
            // NaN and infinities have no xlsx representation
            CellValue::Number(_) | CellValue::Missing => return Ok(()),
        };

        result
            .map(|_| ())
            .map_err(|e| format!("Failed to write cell ({}, {}): {}", row, col, e))
    }
}
