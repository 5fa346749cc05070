use crate::{
    error::{Error, Result},
    jobs::{self, Job, JobStatus},
};
use flume::Receiver;
use once_cell::sync::Lazy;
use std::{
    fs::{self, File},
    io::{BufWriter, ErrorKind, Read, Write},
    path::{Path, PathBuf},
    time::Duration,
};

// ----------------------------------------------------------------------------
// Shared HTTP client state

const VERSION: &str = env!("CARGO_PKG_VERSION");
const PKG_NAME: &str = env!("CARGO_PKG_NAME");

const CONNECTION_PROBE_URL: &str = "https://google.com/generate_204";
const CONNECTION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

const LIMIT: u64 = 100 * 1024 * 1024; // 100MB

pub static HTTP_CLIENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::AgentBuilder::new()
        .user_agent(&format!("{PKG_NAME}/{VERSION}"))
        .build()
});

// ----------------------------------------------------------------------------
// Interface

/// Bytes written so far, and the announced body size if the server sent one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub received: u64,
    pub total: Option<u64>,
}

/// A download running in the background.
pub struct Download {
    progress: Receiver<Progress>,
    job: Job<Result<u64>>,
}

impl Download {
    pub fn progress(&self) -> &Receiver<Progress> {
        &self.progress
    }

    /// Drains pending progress reports, returning the most recent one.
    pub fn latest_progress(&self) -> Option<Progress> {
        self.progress.try_iter().last()
    }

    pub fn check(&mut self) -> JobStatus<Result<u64>> {
        self.job.check()
    }

    /// Blocks until the download ends. `None` if the download thread panicked.
    pub fn wait(self) -> Option<Result<u64>> {
        self.job.wait()
    }
}

/// Whether the probe URL answers at all. An HTTP error status still counts as connected.
pub fn has_connection() -> bool {
    has_connection_to(CONNECTION_PROBE_URL)
}

/// Like [`has_connection`], against any URL.
pub fn has_connection_to(url: &str) -> bool {
    match HTTP_CLIENT
        .get(url)
        .timeout(CONNECTION_PROBE_TIMEOUT)
        .call()
    {
        Ok(_) | Err(ureq::Error::Status(..)) => true,
        Err(err) => {
            log::debug!("connection probe to {url} failed: {err}");
            false
        }
    }
}

pub fn download_string(url: &str) -> Result<String> {
    let response = HTTP_CLIENT.get(url).call().map_err(Box::new)?;
    Ok(response.into_string()?)
}

/// Streams the body at `url` into the file at `path`, reporting progress after each chunk.
/// Returns the number of bytes written.
///
/// The body is written to `{path}.part` first and only renamed to `path` once
/// it has been received completely; on failure the partial file is removed.
pub fn download_file<P>(url: &str, path: &str, progress: P) -> Result<u64>
where
    P: FnMut(Progress),
{
    let response = HTTP_CLIENT.get(url).call().map_err(Box::new)?;

    let total: Option<u64> = response
        .header("Content-Length")
        .and_then(|s| s.parse().ok());
    if total.is_some_and(|len| len > LIMIT) {
        return Err(Error::HttpTooBig);
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let part_path = partial_path(path);
    let received = match stream_to_file(response, &part_path, total, progress) {
        Ok(received) => received,
        Err(err) => {
            let _ = fs::remove_file(&part_path);
            return Err(err);
        }
    };
    if let Err(err) = fs::rename(&part_path, path) {
        let _ = fs::remove_file(&part_path);
        return Err(err.into());
    }

    log::debug!("downloaded {received} bytes from {url} to {}", path.display());
    Ok(received)
}

/// Sibling of `path` holding an unfinished download.
pub fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

fn stream_to_file<P>(
    response: ureq::Response,
    path: &Path,
    total: Option<u64>,
    mut progress: P,
) -> Result<u64>
where
    P: FnMut(Progress),
{
    let mut reader = response.into_reader().take(LIMIT + 1);
    let mut writer = BufWriter::new(File::create(path)?);
    let mut buffer = [0u8; 8192];
    let mut received: u64 = 0;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(read) => read,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        received += read as u64;
        if received > LIMIT {
            return Err(Error::HttpTooBig);
        }
        writer.write_all(&buffer[..read])?;
        progress(Progress { received, total });
    }
    if total.is_some_and(|len| received < len) {
        return Err(Error::Io(ErrorKind::UnexpectedEof.into()));
    }
    writer.flush()?;
    Ok(received)
}

/// Starts [`download_file`] on a background thread.
pub fn download_file_async(url: &str, path: &str) -> Download {
    let (tx, rx) = flume::unbounded();
    let url = url.to_owned();
    let path = path.to_owned();
    let job = jobs::start(move || {
        download_file(&url, &path, |progress| {
            let _ = tx.send(progress);
        })
    });
    Download { progress: rx, job }
}
