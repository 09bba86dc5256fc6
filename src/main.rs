use aabw::cli::{self, OutputFormat};
use aabw::error::AabwResult;
use aabw::fetch::DEFAULT_BASE_URL;
use aabw::types::IndexColumn;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aabw")]
#[command(about = "Fetch AABW datasets and convert workbooks to records of tables")]
#[command(long_about = "AABW - dataset retrieval and workbook conversion

COMMANDS:
  fetch      - Download dataset files unless already present
  inspect    - Load a workbook and show its record (text, JSON or YAML)
  convert    - Rewrite a workbook with normalized sheet names
  normalize  - Show the field identifier for sheet names

EXAMPLES:
  aabw fetch stations.xlsx
  aabw inspect stations.xlsx --index-col 0
  aabw inspect stations.xlsx --format json
  aabw convert stations.xlsx stations_clean.xlsx
  aabw normalize \"Site A\" \"2023-data\"")]
#[command(version)]
struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Download dataset files from the AABW data repository.

Files already present in the target directory are left untouched and no
request is made for them. Anything other than HTTP 200 counts as a failure
and leaves no file behind.

EXAMPLE:
  aabw fetch stations.xlsx casts.xlsx --dir data/")]
    /// Download dataset files unless already present
    Fetch {
        /// Dataset file names
        #[arg(required = true)]
        files: Vec<String>,

        /// Remote folder the files are fetched from
        #[arg(long, env = "AABW_BASE_URL", default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Local directory the files are written to
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Load a workbook and show its record
    Inspect {
        /// Workbook file (.xlsx, .xlsm, .xlsb, .xls, .ods)
        input: PathBuf,

        /// Index column for every sheet: a position (0) or a header name
        #[arg(short, long)]
        index_col: Option<IndexColumn>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    #[command(long_about = "Read a workbook and write it back out as .xlsx.

Each sheet is renamed to its normalized identifier (\"Site A\" → SiteA).
The index column, if one is given, is dropped from the output.")]
    /// Rewrite a workbook with normalized sheet names
    Convert {
        /// Workbook to read
        input: PathBuf,

        /// Output .xlsx path (overwritten)
        output: PathBuf,

        /// Index column for every sheet: a position (0) or a header name
        #[arg(short, long)]
        index_col: Option<IndexColumn>,
    },

    /// Show the field identifier for sheet names
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "aabw=debug" } else { "aabw=warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> AabwResult<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Fetch {
            files,
            base_url,
            dir,
        } => cli::fetch(files, base_url, dir),

        Commands::Inspect {
            input,
            index_col,
            format,
        } => cli::inspect(input, index_col, format),

        Commands::Convert {
            input,
            output,
            index_col,
        } => cli::convert(input, output, index_col, cli.verbose),

        Commands::Normalize { names } => cli::normalize(names),
    }
}
