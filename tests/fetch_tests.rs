//! Dataset fetch tests against a loopback HTTP responder

use aabw::error::AabwError;
use aabw::fetch::{DatasetFetcher, FetchOutcome};
use std::fs;
use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use tempfile::TempDir;

/// Minimal HTTP/1.1 server answering every request with the same response
struct StubServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    request_lines: Arc<Mutex<Vec<String>>>,
}

impl StubServer {
    fn start(status: &'static str, body: &'static [u8]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let request_lines = Arc::new(Mutex::new(Vec::new()));

        let counter = Arc::clone(&hits);
        let lines = Arc::clone(&request_lines);
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                counter.fetch_add(1, Ordering::SeqCst);

                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut line = String::new();
                if reader.read_line(&mut line).is_ok() {
                    lines.lock().unwrap().push(line.trim_end().to_string());
                }
                // Drain headers
                loop {
                    line.clear();
                    match reader.read_line(&mut line) {
                        Ok(0) | Err(_) => break,
                        Ok(_) if line == "\r\n" => break,
                        Ok(_) => {}
                    }
                }

                let head = format!(
                    "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    status,
                    body.len()
                );
                let _ = stream.write_all(head.as_bytes());
                let _ = stream.write_all(body);
                let _ = stream.flush();
            }
        });

        Self {
            base_url: format!("http://{}/AABW", addr),
            hits,
            request_lines,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn fetcher(&self, dir: &TempDir) -> DatasetFetcher {
        DatasetFetcher::new()
            .with_base_url(&self.base_url)
            .with_target_dir(dir.path())
    }
}

// Not valid UTF-8, so a lossy text path would corrupt it
const XLSX_BYTES: &[u8] = b"PK\x03\x04\x14\x00\x00\x00\xff\xfe binary payload";

#[test]
fn test_fetch_downloads_on_200() {
    let server = StubServer::start("200 OK", XLSX_BYTES);
    let temp_dir = TempDir::new().unwrap();
    let fetcher = server.fetcher(&temp_dir);

    assert!(fetcher.fetch("stations.xlsx"));

    let written = fs::read(temp_dir.path().join("stations.xlsx")).unwrap();
    assert_eq!(written, XLSX_BYTES);
    assert_eq!(server.hits(), 1);
    assert_eq!(
        server.request_lines.lock().unwrap()[0],
        "GET /AABW/stations.xlsx HTTP/1.1"
    );
}

#[test]
fn test_fetch_reports_download_size() {
    let server = StubServer::start("200 OK", XLSX_BYTES);
    let temp_dir = TempDir::new().unwrap();

    let outcome = server.fetcher(&temp_dir).try_fetch("casts.xlsx").unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::Downloaded {
            bytes: XLSX_BYTES.len()
        }
    );
}

#[test]
fn test_fetch_twice_hits_network_once() {
    let server = StubServer::start("200 OK", XLSX_BYTES);
    let temp_dir = TempDir::new().unwrap();
    let fetcher = server.fetcher(&temp_dir);

    assert!(fetcher.fetch("stations.xlsx"));
    assert!(fetcher.fetch("stations.xlsx"));
    assert_eq!(server.hits(), 1);
    assert_eq!(
        fetcher.try_fetch("stations.xlsx").unwrap(),
        FetchOutcome::AlreadyPresent
    );
    assert_eq!(server.hits(), 1);
}

#[test]
fn test_fetch_existing_file_never_requests() {
    let server = StubServer::start("200 OK", XLSX_BYTES);
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("local.xlsx"), b"local copy").unwrap();

    assert!(server.fetcher(&temp_dir).fetch("local.xlsx"));
    assert_eq!(server.hits(), 0);
    // Local content is left alone
    assert_eq!(
        fs::read(temp_dir.path().join("local.xlsx")).unwrap(),
        b"local copy"
    );
}

#[test]
fn test_fetch_404_returns_false() {
    let server = StubServer::start("404 Not Found", b"Not Found");
    let temp_dir = TempDir::new().unwrap();
    let fetcher = server.fetcher(&temp_dir);

    assert!(!fetcher.fetch("missing.xlsx"));
    assert!(!temp_dir.path().join("missing.xlsx").exists());
    assert_eq!(
        fetcher.try_fetch("missing.xlsx").unwrap(),
        FetchOutcome::Unavailable { status: 404 }
    );
}

#[test]
fn test_fetch_server_error_returns_false() {
    let server = StubServer::start("500 Internal Server Error", b"");
    let temp_dir = TempDir::new().unwrap();

    assert!(!server.fetcher(&temp_dir).fetch("broken.xlsx"));
    assert!(!temp_dir.path().join("broken.xlsx").exists());
}

#[test]
fn test_fetch_non_200_success_returns_false() {
    let server = StubServer::start("204 No Content", b"");
    let temp_dir = TempDir::new().unwrap();
    let fetcher = server.fetcher(&temp_dir);

    assert_eq!(
        fetcher.try_fetch("empty.xlsx").unwrap(),
        FetchOutcome::Unavailable { status: 204 }
    );
    assert!(!temp_dir.path().join("empty.xlsx").exists());
}

#[test]
fn test_fetch_unreachable_is_network_error() {
    // Bind then drop to get a port with nothing listening
    let port = TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let temp_dir = TempDir::new().unwrap();
    let fetcher = DatasetFetcher::new()
        .with_base_url(format!("http://127.0.0.1:{}/AABW", port))
        .with_target_dir(temp_dir.path());

    assert!(matches!(
        fetcher.try_fetch("stations.xlsx"),
        Err(AabwError::Network(_))
    ));
    assert!(!fetcher.fetch("stations.xlsx"));
}
