use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024; // 10 MB

/// File statistics for the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AuditLogStats {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub current_file: Option<String>,
    pub records_appended: u64,
}

/// Append-only JSONL log: `<base_dir>/<stem>-<timestamp>-<seq>.jsonl`
pub struct AuditLog<R> {
    stem: String,
    base_dir: PathBuf,
    max_file_size: u64,
    file: Mutex<Option<(PathBuf, File)>>,
    records_appended: AtomicU64,
    _record: PhantomData<fn(&R)>,
}

impl<R: Serialize> AuditLog<R> {
    pub fn open(base_dir: impl Into<PathBuf>, stem: &str, max_file_size: u64) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;

        Ok(Self {
            stem: stem.to_string(),
            base_dir,
            max_file_size: max_file_size.max(1),
            file: Mutex::new(None),
            records_appended: AtomicU64::new(0),
            _record: PhantomData,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Append one record as a single line.
    /// Rotates to a new file once the current one reaches the size limit.
    pub fn append(&self, record: &R) -> io::Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut guard = self.file.lock();

        // Reuse the newest file from a previous run if it still has room
        if guard.is_none() {
            if let Some(path) = self.find_latest_log_file()? {
                let file = OpenOptions::new().append(true).open(&path)?;
                if file.metadata()?.len() < self.max_file_size {
                    *guard = Some((path, file));
                }
            }
        }

        let should_rotate = match guard.as_ref() {
            Some((_, file)) => file.metadata()?.len() >= self.max_file_size,
            None => true,
        };
        if should_rotate {
            *guard = Some(self.create_new_file()?);
        }

        if let Some((_, file)) = guard.as_mut() {
            file.write_all(line.as_bytes())?;
            file.flush()?;
        }
        drop(guard);

        self.records_appended.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    pub fn records_appended(&self) -> u64 {
        self.records_appended.load(Ordering::Relaxed)
    }

    pub fn stats(&self) -> io::Result<AuditLogStats> {
        let files = self.log_files()?;
        let mut total_size_bytes = 0u64;
        for path in &files {
            total_size_bytes += fs::metadata(path)?.len();
        }

        let current_file = files
            .last()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .map(str::to_string);

        Ok(AuditLogStats {
            total_files: files.len(),
            total_size_bytes,
            current_file,
            records_appended: self.records_appended(),
        })
    }

    /// This log's files, oldest first (timestamped names sort chronologically)
    pub fn log_files(&self) -> io::Result<Vec<PathBuf>> {
        let prefix = format!("{}-", self.stem);
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.base_dir)?
            .filter_map(|res| res.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().map_or(false, |ext| ext == "jsonl"))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.starts_with(&prefix))
            })
            .collect();

        paths.sort();
        Ok(paths)
    }

    fn find_latest_log_file(&self) -> io::Result<Option<PathBuf>> {
        Ok(self.log_files()?.pop())
    }

    fn create_new_file(&self) -> io::Result<(PathBuf, File)> {
        // timestamp format: YYYY-MM-DD-HHMMSS, then a sequence for same-second rotations
        let timestamp = Utc::now().format("%Y-%m-%d-%H%M%S");

        for seq in 0..10_000u32 {
            let path = self
                .base_dir
                .join(format!("{}-{}-{:04}.jsonl", self.stem, timestamp, seq));
            match OpenOptions::new().append(true).create_new(true).open(&path) {
                Ok(file) => {
                    tracing::debug!("Opened new audit log file {}", path.display());
                    return Ok((path, file));
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e),
            }
        }

        Err(io::Error::new(
            io::ErrorKind::Other,
            "too many audit log files created in one second",
        ))
    }
}

impl<R: Serialize + Send + 'static> AuditLog<R> {
    /// `append` on the blocking thread pool; file I/O stays off the async workers
    pub async fn append_async(self: Arc<Self>, record: R) -> io::Result<()> {
        tokio::task::spawn_blocking(move || self.append(&record))
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    }
}
