//! Shared fixtures for integration tests

#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::path::Path;

/// A cell in a fixture sheet
pub enum Cell {
    Num(f64),
    Text(&'static str),
    Bool(bool),
    Blank,
}

/// Write a workbook with one sheet per `(name, rows)` entry; row 0 is the header
pub fn write_fixture(path: &Path, sheets: &[(&str, Vec<Vec<Cell>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let (r, c) = (r as u32, c as u16);
                match cell {
                    Cell::Num(n) => {
                        worksheet.write_number(r, c, *n).unwrap();
                    }
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, *s).unwrap();
                    }
                    Cell::Bool(b) => {
                        worksheet.write_boolean(r, c, *b).unwrap();
                    }
                    Cell::Blank => {}
                }
            }
        }
    }
    workbook.save(path).unwrap();
}

/// Two station sheets sharing the same layout
pub fn write_station_fixture(path: &Path) {
    use Cell::*;
    write_fixture(
        path,
        &[
            (
                "Site A",
                vec![
                    vec![Text("station"), Text("depth"), Text("salinity"), Text("flagged")],
                    vec![Text("A1"), Num(4000.0), Num(34.65), Bool(false)],
                    vec![Text("A2"), Num(4250.5), Blank, Bool(true)],
                    vec![Text("A3"), Num(3900.0), Num(34.7), Bool(false)],
                ],
            ),
            (
                "Site B",
                vec![
                    vec![Text("station"), Text("depth"), Text("salinity"), Text("flagged")],
                    vec![Text("B1"), Num(5100.0), Num(34.66), Bool(false)],
                ],
            ),
        ],
    );
}
