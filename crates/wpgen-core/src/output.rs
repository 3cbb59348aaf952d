//! Output destinations for generated mission files.
//!
//! Callers inject an [`OutputNamer`]; nothing here reads the environment.

use std::fs;
use std::io::{BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::error::OutputError;
use crate::export::{write_csv, LitchiRow};

/// Where one unit of output goes, plus a short label for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTarget {
    pub path: PathBuf,
    pub label: String,
}

impl OutputTarget {
    /// File name component, used for download headers.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "waypoints.csv".to_string())
    }
}

/// Produces a destination for a unit of output.
pub trait OutputNamer: Send + Sync {
    fn next_destination(&self) -> Result<OutputTarget, OutputError>;
}

/// Numbered files (`output_1.csv`, `output_2.csv`, ...) backed by a counter
/// file that survives restarts.
#[derive(Debug)]
pub struct RunCounterNamer {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl RunCounterNamer {
    pub const COUNTER_FILE: &'static str = "run_counter.txt";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn counter_path(&self) -> PathBuf {
        self.dir.join(Self::COUNTER_FILE)
    }

    fn read_counter(path: &Path) -> Result<u64, OutputError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(err) => return Err(err.into()),
        };
        let trimmed = contents.trim();
        if trimmed.is_empty() {
            return Ok(0);
        }
        trimmed.parse().map_err(|_| OutputError::CorruptCounter {
            path: path.to_path_buf(),
            contents: trimmed.to_string(),
        })
    }
}

impl OutputNamer for RunCounterNamer {
    fn next_destination(&self) -> Result<OutputTarget, OutputError> {
        // Serialize read-increment-write within this process.
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        fs::create_dir_all(&self.dir)?;
        let counter_path = self.counter_path();
        let run = Self::read_counter(&counter_path)? + 1;
        fs::write(&counter_path, run.to_string())?;

        Ok(OutputTarget {
            path: self.dir.join(format!("output_{run}.csv")),
            label: run.to_string(),
        })
    }
}

/// Uniquely named throwaway files, for hosts without durable storage.
#[derive(Debug, Clone)]
pub struct TempFileNamer {
    dir: PathBuf,
}

impl TempFileNamer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl OutputNamer for TempFileNamer {
    fn next_destination(&self) -> Result<OutputTarget, OutputError> {
        Ok(OutputTarget {
            path: self.dir.join(format!("wpgen-{}.csv", Uuid::new_v4())),
            label: "ephemeral".to_string(),
        })
    }
}

/// Write a header plus `rows` to the target path, creating parent
/// directories as needed.
pub fn write_csv_file(target: &OutputTarget, rows: &[LitchiRow]) -> Result<(), OutputError> {
    if let Some(parent) = target.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = fs::File::create(&target.path)?;
    write_csv(rows, BufWriter::new(file))
}
