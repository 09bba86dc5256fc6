//! AABW - dataset retrieval and workbook/record conversion
//!
//! This library fetches AABW dataset files on demand and converts Excel
//! workbooks into ordered records of tables (and back).
//!
//! # Features
//!
//! - Cache-or-download retrieval of dataset files
//! - Every sheet of a workbook loaded into one [`Record`], in workbook order
//! - Sheet names normalized into field identifiers (`"Site A"` → `SiteA`)
//! - Optional index column applied uniformly to every sheet
//! - Records written back out as .xlsx, one sheet per field
//!
//! # Example
//!
//! ```no_run
//! use aabw::excel::{read_workbook, write_workbook};
//! use aabw::fetch::retrieve_dataset;
//! use aabw::types::IndexColumn;
//!
//! if retrieve_dataset("stations.xlsx") {
//!     let record = read_workbook("stations.xlsx", IndexColumn::Position(0))?;
//!     for (field, table) in record.iter() {
//!         println!("{}: {} rows", field, table.row_count());
//!     }
//!     write_workbook(&record, "stations_normalized.xlsx")?;
//! }
//! # Ok::<(), aabw::error::AabwError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod fetch;
pub mod types;

// Re-export commonly used types
pub use error::{AabwError, AabwResult};
pub use excel::{normalize_identifier, read_workbook, write_workbook};
pub use fetch::{retrieve_dataset, DatasetFetcher, FetchOutcome};
pub use types::{CellValue, Column, IndexColumn, Record, Table};
