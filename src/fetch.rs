//! Dataset retrieval
//!
//! Downloads a dataset file from the AABW data repository unless a copy is
//! already present locally.

use crate::error::{AabwError, AabwResult};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Remote folder holding the AABW datasets
pub const DEFAULT_BASE_URL: &str = "https://github.com/gromicho/data/raw/main/AABW";

/// What [`DatasetFetcher::try_fetch`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A local file was already there; no request was made
    AlreadyPresent,
    /// The file was downloaded and written
    Downloaded { bytes: usize },
    /// The server answered with something other than 200
    Unavailable { status: u16 },
}

impl FetchOutcome {
    pub fn is_available(&self) -> bool {
        matches!(
            self,
            FetchOutcome::AlreadyPresent | FetchOutcome::Downloaded { .. }
        )
    }
}

/// Cache-or-download retrieval of dataset files
pub struct DatasetFetcher {
    base_url: String,
    target_dir: PathBuf,
    agent: ureq::Agent,
}

impl Default for DatasetFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetFetcher {
    /// Fetcher for [`DEFAULT_BASE_URL`] writing into the working directory
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            target_dir: PathBuf::from("."),
            agent: ureq::AgentBuilder::new().build(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_target_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.target_dir = dir.as_ref().to_path_buf();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Remote location of `file_name`
    pub fn url_for(&self, file_name: &str) -> String {
        format!("{}/{}", self.base_url, file_name)
    }

    /// Local location of `file_name`
    pub fn local_path(&self, file_name: &str) -> PathBuf {
        self.target_dir.join(file_name)
    }

    /// Make sure `file_name` exists locally, returning true when it does.
    ///
    /// Every failure (non-200 status, unreachable host, local write error)
    /// is logged and reported as `false`.
    pub fn fetch(&self, file_name: &str) -> bool {
        match self.try_fetch(file_name) {
            Ok(outcome) if outcome.is_available() => true,
            Ok(outcome) => {
                warn!(file = %file_name, ?outcome, "dataset not retrieved");
                false
            }
            Err(e) => {
                warn!(file = %file_name, error = %e, "dataset not retrieved");
                false
            }
        }
    }

    /// Like [`fetch`](Self::fetch) but keeps the reason for a failure
    pub fn try_fetch(&self, file_name: &str) -> AabwResult<FetchOutcome> {
        let path = self.local_path(file_name);
        if path.is_file() {
            debug!(path = %path.display(), "dataset already present");
            return Ok(FetchOutcome::AlreadyPresent);
        }

        let url = self.url_for(file_name);
        debug!(%url, "downloading dataset");

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Ok(FetchOutcome::Unavailable { status })
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(AabwError::Network(format!("GET {}: {}", url, err)))
            }
        };

        if response.status() != 200 {
            return Ok(FetchOutcome::Unavailable {
                status: response.status(),
            });
        }

        // Body is read completely before anything touches the disk
        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|e| AabwError::Network(format!("GET {}: {}", url, e)))?;

        if let Err(e) = fs::write(&path, &body) {
            let _ = fs::remove_file(&path);
            return Err(AabwError::Io(e));
        }

        info!(path = %path.display(), bytes = body.len(), "dataset downloaded");
        Ok(FetchOutcome::Downloaded { bytes: body.len() })
    }
}

/// Retrieve `file_name` from the AABW repository into the working directory
/// unless it is already there.
pub fn retrieve_dataset(file_name: &str) -> bool {
    DatasetFetcher::new().fetch(file_name)
}
