use std::path::PathBuf;
use thiserror::Error;

pub type AabwResult<T> = Result<T, AabwError>;

#[derive(Error, Debug)]
pub enum AabwError {
    #[error("Workbook not found: {}: {source}", path.display())]
    WorkbookNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Index column {index} not found in table '{table}'")]
    MissingIndexColumn { table: String, index: String },

    #[error("Write error: {}: {message}", path.display())]
    Write { path: PathBuf, message: String },

    #[error("Record has no fields; a workbook needs at least one sheet")]
    EmptyRecord,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Table name {0:?} does not yield a valid identifier")]
    InvalidTableName(String),

    #[error("Tables '{first}' and '{second}' both normalize to identifier '{identifier}'")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Record already has a field named '{0}'")]
    DuplicateField(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
