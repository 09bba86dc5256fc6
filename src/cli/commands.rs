use crate::error::{AabwError, AabwResult};
use crate::excel::{normalize_identifier, ExcelExporter, ExcelImporter};
use crate::fetch::{DatasetFetcher, FetchOutcome};
use crate::types::{IndexColumn, Record};
use colored::Colorize;
use std::path::PathBuf;

/// Output format for `inspect`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Text,
    /// Full record as JSON
    Json,
    /// Full record as YAML
    Yaml,
}

/// Execute the fetch command
pub fn fetch(files: Vec<String>, base_url: String, dir: PathBuf) -> AabwResult<()> {
    println!("{}", "📥 AABW - Dataset Fetch".bold().green());
    println!("   Source: {}", base_url);
    println!("   Target: {}\n", dir.display());

    let fetcher = DatasetFetcher::new()
        .with_base_url(base_url)
        .with_target_dir(&dir);

    let mut failed = Vec::new();
    for file in &files {
        match fetcher.try_fetch(file) {
            Ok(FetchOutcome::AlreadyPresent) => {
                println!("   {} {} (already present)", "✓".green(), file);
            }
            Ok(FetchOutcome::Downloaded { bytes }) => {
                println!("   {} {} ({} bytes downloaded)", "✓".green(), file, bytes);
            }
            Ok(FetchOutcome::Unavailable { status }) => {
                println!("   {} {} (HTTP {})", "✗".red(), file, status);
                failed.push(file.clone());
            }
            Err(e) => {
                println!("   {} {} ({})", "✗".red(), file, e);
                failed.push(file.clone());
            }
        }
    }
    println!();

    if failed.is_empty() {
        println!("{}", "✅ All datasets available".bold().green());
        Ok(())
    } else {
        Err(AabwError::Network(format!(
            "{} of {} datasets could not be retrieved: {}",
            failed.len(),
            files.len(),
            failed.join(", ")
        )))
    }
}

/// Execute the inspect command
pub fn inspect(
    input: PathBuf,
    index_column: Option<IndexColumn>,
    format: OutputFormat,
) -> AabwResult<()> {
    let record = ExcelImporter::new(&input)
        .with_index_column(index_column.unwrap_or_default())
        .import()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&record)?),
        OutputFormat::Text => print_summary(&input, &record),
    }

    Ok(())
}

fn print_summary(input: &std::path::Path, record: &Record) {
    println!("{}", "📖 AABW - Workbook Record".bold().green());
    println!("   File:   {}", input.display());
    println!("   Fields: {}\n", record.len());

    for (field, table) in record.iter() {
        println!("   📊 {}", field.bright_blue());
        println!(
            "      {} columns, {} rows",
            table.columns.len(),
            table.row_count()
        );
        if let Some(index) = &table.index {
            println!("      index: {}", index.name.cyan());
        }
        if !table.columns.is_empty() {
            let columns: Vec<String> = table
                .columns
                .iter()
                .map(|col| format!("{}: {}", col.name, col.value_type()))
                .collect();
            println!("      columns: {}", columns.join(", "));
        }
    }
    println!();
}

/// Execute the convert command (decode then re-encode under normalized sheet names)
pub fn convert(
    input: PathBuf,
    output: PathBuf,
    index_column: Option<IndexColumn>,
    verbose: bool,
) -> AabwResult<()> {
    println!("{}", "🔄 AABW - Workbook Convert".bold().green());
    println!("   Input:  {}", input.display());
    println!("   Output: {}\n", output.display());

    if verbose {
        println!("{}", "📖 Reading workbook...".cyan());
    }

    let record = ExcelImporter::new(&input)
        .with_index_column(index_column.unwrap_or_default())
        .import()?;

    if verbose {
        println!("   Found {} sheets", record.len());
        for (field, table) in record.iter() {
            println!(
                "   📊 {}: {} columns, {} rows",
                field.bright_blue(),
                table.columns.len(),
                table.row_count()
            );
        }
        println!();
        println!("{}", "💾 Writing workbook...".cyan());
    }

    ExcelExporter::new(&record).export(&output)?;

    println!("{}", "✅ Convert Complete!".bold().green());
    println!("   Excel file: {}\n", output.display());

    Ok(())
}

/// Execute the normalize command
pub fn normalize(names: Vec<String>) -> AabwResult<()> {
    for name in &names {
        let identifier = normalize_identifier(name)?;
        println!("{} → {}", name, identifier.bold());
    }
    Ok(())
}
